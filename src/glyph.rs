use crate::config::Format;
use crate::data::MapCell;

/// What a single board cell shows - the tile plus whatever stands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Glyph {
    pub(crate) tile: MapCell,
    pub(crate) has_box: bool,
    pub(crate) has_player: bool,
}

/// Canonical spelling of every glyph: (tile, box, player, XSB, custom).
const GLYPHS: [(MapCell, bool, bool, &str, &str); 7] = [
    (MapCell::Wall, false, false, "#", "<>"),
    (MapCell::Empty, false, false, " ", "  "),
    (MapCell::Empty, true, false, "$", "B "),
    (MapCell::Empty, false, true, "@", "P "),
    (MapCell::Goal, false, false, ".", " _"),
    (MapCell::Goal, true, false, "*", "B_"),
    (MapCell::Goal, false, true, "+", "P_"),
];

/// Other XSB spellings found in level collections.
const XSB_ALIASES: [(char, char); 6] = [
    ('-', ' '),
    ('_', ' '),
    ('b', '$'),
    ('B', '*'),
    ('p', '@'),
    ('P', '+'),
];

impl Glyph {
    pub(crate) fn new(tile: MapCell, has_box: bool, has_player: bool) -> Self {
        Glyph {
            tile,
            has_box,
            has_player,
        }
    }

    /// Width of one cell in characters.
    pub(crate) fn width(format: Format) -> usize {
        match format {
            Format::Xsb => 1,
            Format::Custom => 2,
        }
    }

    pub(crate) fn decode(format: Format, token: &str) -> Option<Glyph> {
        let mut alias = [0; 4];
        let token = match format {
            Format::Xsb => {
                let mut chars = token.chars();
                let c = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return None,
                };
                match XSB_ALIASES.iter().find(|&&(from, _)| from == c) {
                    Some(&(_, to)) => &*to.encode_utf8(&mut alias),
                    None => token,
                }
            }
            Format::Custom => token,
        };

        GLYPHS
            .iter()
            .find(|&&(.., xsb, custom)| {
                token
                    == match format {
                        Format::Xsb => xsb,
                        Format::Custom => custom,
                    }
            })
            .map(|&(tile, has_box, has_player, ..)| Glyph::new(tile, has_box, has_player))
    }

    /// Walls never hold anything so they always encode as a plain wall.
    pub(crate) fn encode(self, format: Format) -> &'static str {
        let glyph = if self.tile.is_wall() {
            Glyph::new(MapCell::Wall, false, false)
        } else {
            self
        };
        GLYPHS
            .iter()
            .find(|&&(tile, has_box, has_player, ..)| {
                Glyph::new(tile, has_box, has_player) == glyph
            })
            .map_or("?", |&(.., xsb, custom)| match format {
                Format::Xsb => xsb,
                Format::Custom => custom,
            })
    }

    /// An empty floor cell with nothing on it.
    pub(crate) fn is_blank(self) -> bool {
        self == Glyph::new(MapCell::Empty, false, false)
    }
}
