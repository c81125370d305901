use std::collections::hash_map::Entry;

use fnv::FnvHashMap;

use crate::data::{MapCell, Pos};
use crate::state::State;
use crate::vec2d::Vec2d;

use super::pathfinding;

/// Remembers which player positions each box configuration was already reached from.
///
/// Two states with the same boxes are the same state
/// if the player can walk from one position to the other.
#[derive(Debug, Default)]
pub(crate) struct BacktrackTable {
    seen: FnvHashMap<Vec<Pos>, Vec<Pos>>,
}

impl BacktrackTable {
    pub(crate) fn new(root: &State) -> Self {
        let mut table = BacktrackTable::default();
        table
            .seen
            .insert(root.boxes.clone(), vec![root.player_pos]);
        table
    }

    /// Returns false if an equivalent state was already recorded.
    pub(crate) fn insert(&mut self, grid: &Vec2d<MapCell>, state: &State) -> bool {
        match self.seen.entry(state.boxes.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(vec![state.player_pos]);
                true
            }
            Entry::Occupied(mut entry) => {
                let mut box_grid = grid.scratchpad();
                for &b in &state.boxes {
                    box_grid[b] = true;
                }
                let reachable = pathfinding::reachable_area(grid, &box_grid, state.player_pos);
                if entry.get().iter().any(|&pos| reachable[pos]) {
                    false
                } else {
                    entry.get_mut().push(state.player_pos);
                    true
                }
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.seen.len()
    }
}
