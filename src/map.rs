use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::{MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// The read-only part of a level - walls and goals.
#[derive(Clone, PartialEq, Eq)]
pub struct GoalMap {
    pub(crate) grid: Vec2d<MapCell>,
    pub(crate) goals: Vec<Pos>,
}

impl GoalMap {
    pub(crate) fn new(grid: Vec2d<MapCell>, goals: Vec<Pos>) -> Self {
        GoalMap { grid, goals }
    }

    /// (width, height)
    pub fn dimensions(&self) -> (u8, u8) {
        (self.grid.cols(), self.grid.rows())
    }

    pub fn cell(&self, pos: Pos) -> MapCell {
        self.grid[pos]
    }

    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    pub(crate) fn format_with_state<'a>(
        &'a self,
        format: Format,
        state: &'a State,
    ) -> MapFormatter<'a> {
        MapFormatter::new(self, Some(state), format)
    }
}

impl Display for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", MapFormatter::new(self, None, Format::Xsb))
    }
}

impl Debug for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    #[test]
    fn formatting_map() {
        let xsb_level: &str = r"
*###*
#@$.#
*###*#
"
        .trim_start_matches('\n');
        let xsb_map: &str = "
.###.
#  .#
.###.#
"
        .trim_start_matches('\n');
        // the `\n\` is necessary because editors remove trailing whitespace
        let xsb_grid: &str = "
.###. \n\
#  .# \n\
.###.#
"
        .trim_start_matches('\n');

        let level: Level = xsb_level.parse().unwrap();
        assert_eq!(format!("{}", level.map), xsb_map);
        assert_eq!(format!("{:?}", level.map), xsb_map);
        assert_eq!(format!("{}", level.map.grid), xsb_grid);
        assert_eq!(level.map.dimensions(), (6, 3));
        assert_eq!(level.map.goals().len(), 5);
    }
}
