use std::collections::VecDeque;

use crate::data::{Dir, MapCell, Pos, DIRECTIONS};
use crate::vec2d::Vec2d;

// Both searches assume the grid is surrounded by walls (preprocessing guarantees it)
// so `pos + dir` never leaves the grid.

fn passable(grid: &Vec2d<MapCell>, boxes: &Vec2d<bool>, pos: Pos) -> bool {
    !grid[pos].is_wall() && !boxes[pos]
}

/// All cells the player can walk to from `start` without pushing anything.
pub(crate) fn reachable_area(grid: &Vec2d<MapCell>, boxes: &Vec2d<bool>, start: Pos) -> Vec2d<bool> {
    let mut reachable = grid.scratchpad();
    reachable[start] = true;

    let mut to_visit = VecDeque::new();
    to_visit.push_back(start);

    while let Some(cur) = to_visit.pop_front() {
        for &next in &cur.neighbors() {
            if !reachable[next] && passable(grid, boxes, next) {
                reachable[next] = true;
                to_visit.push_back(next);
            }
        }
    }

    reachable
}

/// The first shortest walk from `src` to `dest`, `None` if boxes or walls are in the way.
pub(crate) fn find_path(
    grid: &Vec2d<MapCell>,
    boxes: &Vec2d<bool>,
    src: Pos,
    dest: Pos,
) -> Option<Vec<Dir>> {
    if src == dest {
        return Some(Vec::new());
    }

    // the direction we came from, for every visited cell
    let mut prevs: Vec2d<Option<Dir>> = grid.scratchpad();
    let mut visited: Vec2d<bool> = grid.scratchpad();
    visited[src] = true;

    let mut to_visit = VecDeque::new();
    to_visit.push_back(src);

    'bfs: while let Some(cur) = to_visit.pop_front() {
        for &dir in &DIRECTIONS {
            let next = cur + dir;
            if visited[next] || !passable(grid, boxes, next) {
                continue;
            }
            visited[next] = true;
            prevs[next] = Some(dir);
            if next == dest {
                break 'bfs;
            }
            to_visit.push_back(next);
        }
    }

    if !visited[dest] {
        return None;
    }

    let mut path = Vec::new();
    let mut cur = dest;
    while let Some(dir) = prevs[cur] {
        path.push(dir);
        cur = cur - dir;
    }
    path.reverse();
    Some(path)
}
