use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::Pos;
use crate::glyph::Glyph;
use crate::map::GoalMap;
use crate::state::State;

/// Renders a board, optionally with boxes and the player on it.
pub struct MapFormatter<'a> {
    map: &'a GoalMap,
    state: Option<&'a State>,
    format: Format,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(map: &'a GoalMap, state: Option<&'a State>, format: Format) -> Self {
        Self { map, state, format }
    }

    fn glyph(&self, pos: Pos) -> Glyph {
        let (has_box, has_player) = match self.state {
            Some(state) => (state.has_box(pos), state.player_pos == pos),
            None => (false, false),
        };
        Glyph::new(self.map.cell(pos), has_box, has_player)
    }
}

impl Display for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (cols, rows) = self.map.dimensions();
        for r in 0..rows {
            let row: Vec<_> = (0..cols).map(|c| self.glyph(Pos::new(r, c))).collect();
            // rows were padded when parsing, the padding isn't part of the level
            let len = row.iter().rposition(|g| !g.is_blank()).map_or(0, |i| i + 1);
            for glyph in &row[..len] {
                write!(f, "{}", glyph.encode(self.format))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
