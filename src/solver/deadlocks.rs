use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::GoalMap;
use crate::vec2d::Vec2d;

/// Marks cells from which a box can never reach any goal (walls included).
///
/// Works backwards from goals: a box can get from `cur + dir` to `cur`
/// only if the player has room to stand at `cur + 2 * dir`.
pub(crate) fn find_dead_ends(map: &GoalMap) -> Vec2d<bool> {
    let grid = &map.grid;
    let mut alive = grid.scratchpad();
    let mut to_visit = map.goals.clone();

    while let Some(cur) = to_visit.pop() {
        if alive[cur] || grid[cur].is_wall() {
            continue;
        }
        alive[cur] = true;

        for &dir in &DIRECTIONS {
            if let Some(box_pos) = grid.step(cur, dir) {
                if let Some(player_pos) = grid.step(box_pos, dir) {
                    if !grid[player_pos].is_wall() {
                        to_visit.push(box_pos);
                    }
                }
            }
        }
    }

    let mut dead_ends = grid.scratchpad();
    for pos in grid.positions() {
        dead_ends[pos] = !alive[pos];
    }
    dead_ends
}

/// Whether the box that just arrived at `pos` is stuck for good off a goal,
/// either alone or together with the boxes around it.
///
/// `has_box` describes the boxes after the push.
pub(crate) fn is_freeze_deadlock<F>(
    map: &GoalMap,
    dead_ends: &Vec2d<bool>,
    pos: Pos,
    has_box: F,
) -> bool
where
    F: Fn(Pos) -> bool,
{
    let freeze = Freeze {
        map,
        dead_ends,
        has_box: &has_box,
    };

    let mut visited = Vec::new();
    if !freeze.is_frozen(pos, &mut visited) {
        return false;
    }
    if visited.iter().any(|&b| !map.grid[b].is_goal()) {
        return true;
    }

    // the whole frozen group is on goals but the search stopped at the first blocked box
    // so there might be a stuck box next to them which is not
    let group = visited.clone();
    for &b in &group {
        for &neighbor in &b.neighbors() {
            if has_box(neighbor)
                && !map.grid[neighbor].is_goal()
                && !freeze.is_frozen(neighbor, &mut visited)
            {
                return false;
            }
        }
    }
    visited.iter().any(|&b| !map.grid[b].is_goal())
}

const VERTICAL: [Dir; 2] = [Dir::Up, Dir::Down];
const HORIZONTAL: [Dir; 2] = [Dir::Left, Dir::Right];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

#[derive(Debug)]
struct Frame {
    pos: Pos,
    blocked_x: bool,
    blocked_y: bool,
    axis: Axis,
    next: usize,
}

enum Action {
    Visit(Pos),
    Return(bool),
}

struct Freeze<'a, F> {
    map: &'a GoalMap,
    dead_ends: &'a Vec2d<bool>,
    has_box: &'a F,
}

impl<F: Fn(Pos) -> bool> Freeze<'_, F> {
    fn is_wall(&self, pos: Pos) -> bool {
        self.map.grid[pos].is_wall()
    }

    fn blocked(&self, a: Pos, b: Pos) -> bool {
        (self.dead_ends[a] && self.dead_ends[b]) || self.is_wall(a) || self.is_wall(b)
    }

    /// Either an immediate answer or a new frame to explore.
    fn enter(&self, pos: Pos, visited: &mut Vec<Pos>) -> Result<Frame, bool> {
        // already on the stack or done - no new information, counts as frozen
        if visited.contains(&pos) {
            return Err(true);
        }
        visited.push(pos);

        let blocked_x = self.blocked(pos + Dir::Left, pos + Dir::Right);
        let blocked_y = self.blocked(pos + Dir::Up, pos + Dir::Down);
        if blocked_x && blocked_y {
            return Err(true);
        }
        Ok(Frame {
            pos,
            blocked_x,
            blocked_y,
            axis: Axis::Vertical,
            next: 0,
        })
    }

    /// A box is frozen when it can't move along either axis,
    /// neighboring boxes count as blocking if they are frozen themselves.
    fn is_frozen(&self, start: Pos, visited: &mut Vec<Pos>) -> bool {
        let mut stack = match self.enter(start, visited) {
            Ok(frame) => vec![frame],
            Err(frozen) => return frozen,
        };
        let mut returned = None;

        while let Some(frame) = stack.last_mut() {
            if let Some(frozen) = returned.take() {
                match frame.axis {
                    Axis::Vertical => frame.blocked_y = frozen,
                    Axis::Horizontal => frame.blocked_x = frozen,
                }
            }

            let action = loop {
                match frame.axis {
                    Axis::Vertical => {
                        if !frame.blocked_y && frame.next < VERTICAL.len() {
                            let neighbor = frame.pos + VERTICAL[frame.next];
                            frame.next += 1;
                            if (self.has_box)(neighbor) {
                                break Action::Visit(neighbor);
                            }
                        } else if !frame.blocked_y {
                            break Action::Return(false);
                        } else if frame.blocked_x {
                            break Action::Return(true);
                        } else {
                            frame.axis = Axis::Horizontal;
                            frame.next = 0;
                        }
                    }
                    Axis::Horizontal => {
                        if !frame.blocked_x && frame.next < HORIZONTAL.len() {
                            let neighbor = frame.pos + HORIZONTAL[frame.next];
                            frame.next += 1;
                            if (self.has_box)(neighbor) {
                                break Action::Visit(neighbor);
                            }
                        } else {
                            break Action::Return(frame.blocked_x);
                        }
                    }
                }
            };

            match action {
                Action::Visit(neighbor) => match self.enter(neighbor, visited) {
                    Ok(child) => stack.push(child),
                    Err(frozen) => returned = Some(frozen),
                },
                Action::Return(frozen) => {
                    stack.pop();
                    if stack.is_empty() {
                        return frozen;
                    }
                    returned = Some(frozen);
                }
            }
        }

        unreachable!("The loop returns when the last frame is popped")
    }
}
