use log::debug;

use crate::data::{MapCell, Pos};
use crate::level::Level;
use crate::map::GoalMap;
use crate::state::State;
use crate::vec2d::Vec2d;

use super::deadlocks;
use super::level::SolverLevel;
use super::pathfinding;
use super::SolverErr;

pub(crate) fn process_level(level: &Level) -> Result<SolverLevel, SolverErr> {
    // Guarantees we have here:
    // - the player exists and therefore map is at least 1x1.
    // - rows and cols is <= 255
    // Do some more low level checking so we can omit some checks later.

    let visited = check_border(level)?;

    // make sure all relevant game elements are reachable
    let mut reachable_goals = Vec::new();
    let mut reachable_boxes = Vec::new();
    for &pos in &level.state.boxes {
        if visited[pos] {
            reachable_boxes.push(pos);
        } else if !level.map.goals.contains(&pos) {
            return Err(SolverErr::UnreachableBoxes);
        }
    }
    for &pos in &level.map.goals {
        if visited[pos] {
            reachable_goals.push(pos);
        } else if !level.state.boxes.contains(&pos) {
            return Err(SolverErr::UnreachableGoals);
        }
    }

    // make sure all non-reachable cells are walls
    // so nothing later has to care about them
    let mut processed_grid = level.map.grid.clone();
    for pos in level.map.grid.positions() {
        if !visited[pos] {
            processed_grid[pos] = MapCell::Wall;
        }
    }

    if reachable_boxes.len() != reachable_goals.len() {
        return Err(SolverErr::BoxesGoals);
    }

    let processed_map = GoalMap::new(processed_grid, reachable_goals);
    let clean_state = State::new(level.state.player_pos, reachable_boxes);

    let no_boxes = processed_map.grid.scratchpad();
    let reachable =
        pathfinding::reachable_area(&processed_map.grid, &no_boxes, clean_state.player_pos);
    let dead_ends = deadlocks::find_dead_ends(&processed_map);
    debug!(
        "Processed level: {} boxes, {} dead cells",
        clean_state.boxes.len(),
        processed_map
            .grid
            .positions()
            .filter(|&pos| dead_ends[pos] && !processed_map.grid[pos].is_wall())
            .count()
    );

    Ok(SolverLevel::new(
        processed_map,
        clean_state,
        dead_ends,
        reachable,
    ))
}

/// Flood fill from the player ignoring boxes, fails if it leaves the grid.
fn check_border(level: &Level) -> Result<Vec2d<bool>, SolverErr> {
    let grid = &level.map.grid;
    let mut to_visit = vec![level.state.player_pos];
    let mut visited = grid.scratchpad();
    visited[level.state.player_pos] = true;

    while let Some(cur) = to_visit.pop() {
        let (r, c) = (i32::from(cur.r), i32::from(cur.c));
        let neighbors = [(r + 1, c), (r - 1, c), (r, c + 1), (r, c - 1)];
        for &(nr, nc) in &neighbors {
            // this is the only place we need to check bounds (using signed types)
            // everything after that will be surrounded by walls
            if nr < 0 || nc < 0 || nr >= i32::from(grid.rows()) || nc >= i32::from(grid.cols()) {
                // we got out of bounds without hitting a wall
                return Err(SolverErr::IncompleteBorder);
            }

            let new_pos = Pos::new(nr as u8, nc as u8);
            if !visited[new_pos] && !grid[new_pos].is_wall() {
                visited[new_pos] = true;
                to_visit.push(new_pos);
            }
        }
    }

    Ok(visited)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(level: &str) -> Result<SolverLevel, SolverErr> {
        let level: Level = level.parse().unwrap();
        process_level(&level)
    }

    #[test]
    fn incomplete_border() {
        let level = r"
#####
#@$.
#####
";
        assert_eq!(process(level).unwrap_err(), SolverErr::IncompleteBorder);
    }

    #[test]
    fn unreachable_boxes() {
        let level = r"
########
#@$.#$.#
########
";
        assert_eq!(process(level).unwrap_err(), SolverErr::UnreachableBoxes);
    }

    #[test]
    fn unreachable_goals() {
        let level = r"
#######
#@$.#.#
#######
";
        assert_eq!(process(level).unwrap_err(), SolverErr::UnreachableGoals);
    }

    #[test]
    fn boxes_goals() {
        let level = r"
######
#@$$.#
######
";
        assert_eq!(process(level).unwrap_err(), SolverErr::BoxesGoals);
    }

    #[test]
    fn static_boxes_are_dropped() {
        let level = r"
########
#@$.#*##
########
";
        let solver_level = process(level).unwrap();
        assert_eq!(solver_level.state.boxes, vec![Pos::new(1, 2)]);
        assert_eq!(solver_level.map.goals, vec![Pos::new(1, 3)]);
        assert!(solver_level.map.grid[Pos::new(1, 5)].is_wall());
        assert!(solver_level.reachable[Pos::new(1, 3)]);
        assert!(!solver_level.reachable[Pos::new(1, 5)]);
    }
}
