use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::iter;
use std::str::FromStr;

use crate::config::Format;
use crate::data::{MapCell, Pos, MAX_SIZE};
use crate::glyph::Glyph;
use crate::level::Level;
use crate::map::GoalMap;
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Pos(usize, usize),
    TooLarge,
    MultiplePlayers,
    NoPlayer,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::TooLarge => write!(f, "Map larger than 255 rows/columns"),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::NoPlayer => write!(f, "No player"),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    let format = if level.trim_start().starts_with('<') {
        Format::Custom
    } else {
        Format::Xsb
    };
    parse_format(level, format)
}

/// Both formats share one cell vocabulary, they only spell it differently.
pub(crate) fn parse_format(level: &str, format: Format) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let mut board = Board::default();
    for (r, line) in level.lines().enumerate() {
        let mut row = Vec::new();
        for (c, token) in cells(line, Glyph::width(format)).enumerate() {
            let pos = check_size(r, c)?;
            let glyph = Glyph::decode(format, token).ok_or(ParserErr::Pos(r, c))?;
            board.place(pos, glyph)?;
            row.push(glyph.tile);
        }
        board.rows.push(row);
    }
    board.into_level()
}

fn check_size(r: usize, c: usize) -> Result<Pos, ParserErr> {
    if r >= MAX_SIZE || c >= MAX_SIZE {
        Err(ParserErr::TooLarge)
    } else {
        Ok(Pos::new(r as u8, c as u8))
    }
}

/// Splits a line into cells of `width` characters, the last one may be shorter.
fn cells(line: &str, width: usize) -> impl Iterator<Item = &str> + '_ {
    let mut rest = line;
    iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest.char_indices().nth(width).map_or(rest.len(), |(i, _)| i);
        let (cell, tail) = rest.split_at(end);
        rest = tail;
        Some(cell)
    })
}

#[derive(Default)]
struct Board {
    rows: Vec<Vec<MapCell>>,
    goals: Vec<Pos>,
    boxes: Vec<Pos>,
    player_pos: Option<Pos>,
}

impl Board {
    fn place(&mut self, pos: Pos, glyph: Glyph) -> Result<(), ParserErr> {
        if glyph.tile.is_goal() {
            self.goals.push(pos);
        }
        if glyph.has_box {
            self.boxes.push(pos);
        }
        if glyph.has_player && self.player_pos.replace(pos).is_some() {
            return Err(ParserErr::MultiplePlayers);
        }
        Ok(())
    }

    fn into_level(self) -> Result<Level, ParserErr> {
        let player_pos = self.player_pos.ok_or(ParserErr::NoPlayer)?;
        let grid = Vec2d::new(&self.rows);
        Ok(Level::new(
            GoalMap::new(grid, self.goals),
            State::new(player_pos, self.boxes),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors() {
        let cases = [
            ("", ParserErr::NoPlayer),
            ("<><><>\n<>  <>\n<><><>", ParserErr::NoPlayer),
            ("<><><><>\n<>P X_<>\n<><><><>", ParserErr::Pos(1, 2)),
            // half a cell at the end of the row
            ("<><><>\n<>P <\n<><><>", ParserErr::Pos(1, 2)),
            ("#####\n#@X.#\n#####", ParserErr::Pos(1, 2)),
            ("#####\n#@$+#\n#####", ParserErr::MultiplePlayers),
            ("<><><><>\n<>P P_<>\n<><><><>", ParserErr::MultiplePlayers),
        ];
        for &(level, expected) in cases.iter() {
            assert_eq!(level.parse::<Level>().unwrap_err(), expected, "{:?}", level);
        }

        let mut wide = String::from("@$.");
        wide.push_str(&"#".repeat(300));
        assert_eq!(wide.parse::<Level>().unwrap_err(), ParserErr::TooLarge);
    }

    #[test]
    fn custom_round_trips() {
        let level = r"
<><><><><>
<> _B_<><>
<>B B <><>
<>  P_<><>
<><><><><>
";
        let parsed = parse_format(level, Format::Custom).unwrap();
        assert_eq!(parsed.custom().to_string(), level.trim_start_matches('\n'));
        assert_eq!(
            parsed.goal_positions(),
            &[Pos::new(1, 1), Pos::new(1, 2), Pos::new(3, 2)]
        );
        assert_eq!(
            parsed.initial_box_positions(),
            &[Pos::new(1, 2), Pos::new(2, 1), Pos::new(2, 2)]
        );
        assert_eq!(parsed.initial_player_pos(), Pos::new(3, 2));
    }

    #[test]
    fn xsb_aliases() {
        // lowercase/uppercase letters and dashes are used by some level collections
        let canonical: Level = "#######\n#+$*. #\n#######".parse().unwrap();
        let aliased: Level = "#######\n#PbB.-#\n#######".parse().unwrap();
        assert_eq!(aliased, canonical);
        assert_eq!(aliased.to_string(), "#######\n#+$*. #\n#######\n");
    }

    #[test]
    fn detects_format() {
        let xsb: Level = "#####\n#@$.#\n#####".parse().unwrap();
        let custom: Level = "\n<><><><><>\n<>P B  _<>\n<><><><><>\n".parse().unwrap();
        assert_eq!(xsb, custom);
    }

    #[test]
    fn xsb_original_1() {
        let level = r"
    #####
    #   #
    #$  #
  ###  $##
  #  $ $ #
### # ## #   ######
#   # ## #####  ..#
# $  $          ..#
##### ### #@##  ..#
    #     #########
    #######
";
        let parsed: Level = level.parse().unwrap();
        assert_eq!(parsed.to_string(), level.trim_start_matches('\n'));
        assert_eq!(parsed.initial_box_positions().len(), 6);
        assert_eq!(parsed.goal_positions().len(), 6);
        assert_eq!(parsed.initial_player_pos(), Pos::new(8, 11));
        assert_eq!(parsed.dimensions(), (19, 11));
    }
}
