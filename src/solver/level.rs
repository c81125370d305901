use std::fmt::{self, Debug, Formatter};

use crate::config::Format;
use crate::data::Pos;
use crate::map::GoalMap;
use crate::state::{self, State};
use crate::vec2d::Vec2d;

/// A level after preprocessing - everything the search needs that never changes.
pub(crate) struct SolverLevel {
    pub(crate) map: GoalMap,
    pub(crate) state: State,
    /// `true` means a box there can never reach a goal (walls included)
    pub(crate) dead_ends: Vec2d<bool>,
    /// Cells the player can reach when boxes are ignored
    pub(crate) reachable: Vec2d<bool>,
    goals: Vec<Pos>,
    goals_fingerprint: u64,
}

impl SolverLevel {
    pub(crate) fn new(
        map: GoalMap,
        state: State,
        dead_ends: Vec2d<bool>,
        reachable: Vec2d<bool>,
    ) -> Self {
        let mut goals = map.goals.clone();
        goals.sort();
        let goals_fingerprint = state::fingerprint(&goals);
        SolverLevel {
            map,
            state,
            dead_ends,
            reachable,
            goals,
            goals_fingerprint,
        }
    }

    /// Sorted
    pub(crate) fn goals(&self) -> &[Pos] {
        &self.goals
    }

    /// `boxes` must be sorted
    pub(crate) fn is_solved(&self, boxes: &[Pos]) -> bool {
        state::fingerprint(boxes) == self.goals_fingerprint && boxes == &self.goals[..]
    }
}

impl Debug for SolverLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.map.format_with_state(Format::Xsb, &self.state))?;
        write!(f, "{}", self.dead_ends)
    }
}
