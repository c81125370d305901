use crate::data::{Pos, DIRECTIONS};
use crate::state::State;
use crate::vec2d::Vec2d;

use super::deadlocks;
use super::level::SolverLevel;

/// Boxes worth pushing from this state.
///
/// If some boxes wall off an area the player can't enter (a corral)
/// and every push the player can make on them goes into that area,
/// nothing outside can change the situation so only those boxes are returned.
/// Corrals next to each other are merged through their shared boxes.
/// Otherwise returns all boxes.
///
/// `box_grid` and `reachable` must describe `state`.
pub(crate) fn corral_boxes(
    level: &SolverLevel,
    state: &State,
    box_grid: &Vec2d<bool>,
    reachable: &Vec2d<bool>,
) -> Vec<Pos> {
    let grid = &level.map.grid;

    let mut corral: Vec<Pos> = grid
        .positions()
        .filter(|&pos| level.reachable[pos] && !reachable[pos] && !box_grid[pos])
        .collect();
    let mut in_corral = grid.scratchpad();
    for &pos in &corral {
        in_corral[pos] = true;
    }

    let mut examined = grid.scratchpad();
    let mut simulated = box_grid.clone();
    let mut boundary = Vec::new();

    // grows while iterating
    let mut i = 0;
    while i < corral.len() {
        let cell = corral[i];
        i += 1;

        for &dir in &DIRECTIONS {
            let box_pos = cell + dir;
            if examined[box_pos] {
                continue;
            }
            examined[box_pos] = true;
            if !box_grid[box_pos] {
                continue;
            }

            simulated[box_pos] = false;
            for &push_dir in &DIRECTIONS {
                let player_pos = box_pos - push_dir;
                let dest = box_pos + push_dir;
                if !reachable[player_pos]
                    || grid[dest].is_wall()
                    || level.dead_ends[dest]
                    || simulated[dest]
                {
                    continue;
                }

                simulated[dest] = true;
                if level.map.goals.iter().all(|&goal| simulated[goal]) {
                    return state.boxes.clone();
                }
                let frozen =
                    deadlocks::is_freeze_deadlock(&level.map, &level.dead_ends, dest, |pos| {
                        simulated[pos]
                    });
                if !frozen && !in_corral[dest] {
                    // the box can leave so this is not a corral we can reason about
                    return state.boxes.clone();
                }
                simulated[dest] = false;
            }
            simulated[box_pos] = true;

            // boxes blocking this one might be blocked by other boxes
            corral.push(box_pos);
            in_corral[box_pos] = true;
            boundary.push(box_pos);
        }
    }

    if boundary.is_empty() {
        return state.boxes.clone();
    }

    let boxes_off_goal = boundary.iter().any(|&b| !grid[b].is_goal());
    let empty_goal = corral
        .iter()
        .any(|&pos| grid[pos].is_goal() && !box_grid[pos]);
    if boxes_off_goal || empty_goal {
        boundary.sort();
        boundary
    } else {
        state.boxes.clone()
    }
}
