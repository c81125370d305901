use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::{MapCell, Pos};
use crate::map::GoalMap;
use crate::map_formatter::MapFormatter;
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;
use crate::state::State;

/// A puzzle as loaded: the board and where everything starts.
#[derive(Clone, PartialEq, Eq)]
pub struct Level {
    pub(crate) map: GoalMap,
    pub(crate) state: State,
}

impl Level {
    pub(crate) fn new(map: GoalMap, state: State) -> Self {
        Level { map, state }
    }

    pub fn map(&self) -> &GoalMap {
        &self.map
    }

    /// (width, height)
    pub fn dimensions(&self) -> (u8, u8) {
        self.map.dimensions()
    }

    pub fn tile_at(&self, pos: Pos) -> MapCell {
        self.map.cell(pos)
    }

    pub fn goal_positions(&self) -> &[Pos] {
        self.map.goals()
    }

    pub fn initial_box_positions(&self) -> &[Pos] {
        &self.state.boxes
    }

    pub fn initial_player_pos(&self) -> Pos {
        self.state.player_pos
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.format(Format::Xsb)
    }

    pub fn custom(&self) -> MapFormatter<'_> {
        self.format(Format::Custom)
    }

    pub fn format(&self, format: Format) -> MapFormatter<'_> {
        self.map.format_with_state(format, &self.state)
    }

    pub fn format_solution<'a>(
        &'a self,
        format: Format,
        moves: &'a Moves,
        include_steps: bool,
    ) -> SolutionFormatter<'a> {
        SolutionFormatter::new(&self.map, &self.state, moves, include_steps, format)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}
