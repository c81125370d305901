mod backtracking;
mod corral;
mod deadlocks;
mod level;
mod node;
mod pathfinding;
mod preprocessing;
mod stats;
mod strategy;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use log::{debug, info, warn};
use tokio::sync::mpsc;
use typed_arena::Arena;

use crate::config::SearchConfig;
use crate::data::{Pos, DIRECTIONS};
use crate::level::Level;
use crate::moves::{Move, Moves};
use crate::Solve;

use self::backtracking::BacktrackTable;
use self::level::SolverLevel;
use self::node::{OpenSet, SearchNode};
use self::strategy::Schedule;

pub use self::stats::Stats;
pub use self::strategy::Strategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    IncompleteBorder,
    UnreachableBoxes,
    UnreachableGoals,
    BoxesGoals,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::IncompleteBorder => write!(f, "Incomplete border"),
            SolverErr::UnreachableBoxes => write!(
                f,
                "Unreachable boxes - some boxes are not on goal but can't be reached"
            ),
            SolverErr::UnreachableGoals => write!(
                f,
                "Unreachable goals - some goals don't have a box but can't be reached"
            ),
            SolverErr::BoxesGoals => write!(f, "Different number of reachable boxes and goals"),
        }
    }
}

impl Error for SolverErr {}

pub struct SolverOk {
    pub moves: Option<Moves>,
    pub stats: Stats,
}

impl SolverOk {
    fn new(moves: Option<Moves>, stats: Stats) -> Self {
        Self { moves, stats }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "No solution")?,
            Some(ref moves) => writeln!(f, "{}", moves)?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, config: &SearchConfig, print_status: bool) -> Result<SolverOk, SolverErr> {
        solve(self, config, print_status)
    }
}

fn solve(level: &Level, config: &SearchConfig, print_status: bool) -> Result<SolverOk, SolverErr> {
    debug!("Processing level...");
    let solver_level = preprocessing::process_level(level)?;
    debug!("Processed level");

    let arena = Arena::new();
    let mut search = Search::new(&solver_level, &arena, config, print_status);
    loop {
        match search.step() {
            Progress::Searching => {}
            Progress::Solved(node) => return Ok(search.finish(Some(node))),
            Progress::Unsolvable => return Ok(search.finish(None)),
        }
    }
}

/// Same as `Solve::solve` but gives other tasks a chance to run after every expanded node.
pub async fn solve_async(level: &Level, config: &SearchConfig) -> Result<SolverOk, SolverErr> {
    let solver_level = preprocessing::process_level(level)?;

    let arena = Arena::new();
    let mut search = Search::new(&solver_level, &arena, config, false);
    loop {
        match search.step() {
            Progress::Searching => tokio::task::yield_now().await,
            Progress::Solved(node) => return Ok(search.finish(Some(node))),
            Progress::Unsolvable => return Ok(search.finish(None)),
        }
    }
}

/// Solves levels as they arrive and sends back the keys to press,
/// `None` when a level has no solution or can't be solved.
///
/// Runs until `levels` is closed or nobody listens for the keys anymore.
pub async fn run_solver(
    mut levels: mpsc::Receiver<Level>,
    keys: mpsc::Sender<Option<String>>,
    config: SearchConfig,
) {
    while let Some(level) = levels.recv().await {
        let result = match solve_async(&level, &config).await {
            Ok(SolverOk {
                moves: Some(moves), ..
            }) => Some(moves.keys()),
            Ok(_) => {
                info!("No solution");
                None
            }
            Err(err) => {
                warn!("Can't solve level: {}", err);
                None
            }
        };
        if keys.send(result).await.is_err() {
            debug!("Keys receiver closed");
            return;
        }
    }
    debug!("Levels sender closed");
}

enum Progress<'a> {
    Searching,
    Solved(&'a SearchNode<'a>),
    Unsolvable,
}

struct Search<'a> {
    level: &'a SolverLevel,
    arena: &'a Arena<SearchNode<'a>>,
    open: OpenSet<'a>,
    backtrack: BacktrackTable,
    schedule: Schedule,
    expanded: u32,
    stats: Stats,
    print_status: bool,
}

impl<'a> Search<'a> {
    fn new(
        level: &'a SolverLevel,
        arena: &'a Arena<SearchNode<'a>>,
        config: &SearchConfig,
        print_status: bool,
    ) -> Self {
        debug!("Search called");

        let schedule = Schedule::new(config);
        let mut open = OpenSet::new(schedule.strategy());
        let mut stats = Stats::new();

        let h = heuristic(level.goals(), &level.state.boxes);
        let root = arena.alloc(SearchNode::root(level.state.clone(), h));
        stats.add_created(root.depth);
        open.push(root);

        Search {
            level,
            arena,
            open,
            backtrack: BacktrackTable::new(&level.state),
            schedule,
            expanded: 0,
            stats,
            print_status,
        }
    }

    /// Expands one node.
    fn step(&mut self) -> Progress<'a> {
        let node = match self.open.pop() {
            Some(node) => node,
            None => return Progress::Unsolvable,
        };

        // only the root can get here solved, children are checked when they're created
        if self.level.is_solved(&node.state.boxes) {
            return Progress::Solved(node);
        }

        self.expanded += 1;
        if self.stats.add_expanded(node.depth) && self.print_status {
            println!("Expanded new depth: {}", node.depth);
            println!("{:?}", self.stats);
        }

        if let Some(strategy) = self.schedule.update(self.expanded) {
            info!(
                "Switching to {} after {} expanded nodes ({} open)",
                strategy,
                self.expanded,
                self.open.len()
            );
            self.stats.add_switch(self.expanded, strategy);
            self.open.set_strategy(strategy);
        }

        match self.expand(node) {
            Some(solved) => Progress::Solved(solved),
            None => Progress::Searching,
        }
    }

    /// Queues all acceptable pushes from `node`, returns a child if it's solved.
    fn expand(&mut self, node: &'a SearchNode<'a>) -> Option<&'a SearchNode<'a>> {
        let level = self.level;
        let grid = &level.map.grid;
        let state = &node.state;

        let mut box_grid = grid.scratchpad();
        for &b in &state.boxes {
            box_grid[b] = true;
        }
        let reachable = pathfinding::reachable_area(grid, &box_grid, state.player_pos);

        for box_pos in corral::corral_boxes(level, state, &box_grid, &reachable) {
            for &dir in &DIRECTIONS {
                let player_pos = box_pos - dir;
                let dest = box_pos + dir;
                if !reachable[player_pos]
                    || grid[dest].is_wall()
                    || box_grid[dest]
                    || level.dead_ends[dest]
                {
                    continue;
                }

                let steps = match pathfinding::find_path(grid, &box_grid, state.player_pos, player_pos)
                {
                    Some(steps) => steps,
                    None => continue,
                };
                let mut moves: Moves = steps.into_iter().map(|d| Move::new(d, false)).collect();
                moves.add(Move::new(dir, true));

                let new_state = state.push(box_pos, dir);
                let depth = node.depth + 1;

                if level.is_solved(&new_state.boxes) {
                    debug!("Solved, {} expanded", self.expanded);
                    let solved = SearchNode::child(node, new_state, (box_pos, dir), moves, 0);
                    self.stats.add_created(depth);
                    let solved: &'a SearchNode<'a> = self.arena.alloc(solved);
                    return Some(solved);
                }

                if !self.backtrack.insert(grid, &new_state) {
                    self.stats.add_duplicate(depth);
                    continue;
                }
                if deadlocks::is_freeze_deadlock(&level.map, &level.dead_ends, dest, |pos| {
                    new_state.has_box(pos)
                }) {
                    self.stats.add_frozen(depth);
                    continue;
                }

                let h = heuristic(level.goals(), &new_state.boxes);
                let child = SearchNode::child(node, new_state, (box_pos, dir), moves, h);
                self.stats.add_created(depth);
                self.open.push(self.arena.alloc(child));
            }
        }

        None
    }

    fn finish(self, solved: Option<&'a SearchNode<'a>>) -> SolverOk {
        let moves = solved.map(|node| node.path());
        match moves {
            Some(ref moves) => info!(
                "Solved: {} moves, {} pushes, {} expanded",
                moves.move_cnt(),
                moves.push_cnt(),
                self.expanded
            ),
            None => info!("No solution, {} expanded", self.expanded),
        }
        debug!("Box configurations seen: {}", self.backtrack.len());
        SolverOk::new(moves, self.stats)
    }
}

/// Sum over goals of the distance to the nearest box not yet taken by another goal.
///
/// Greedy so not a minimal matching and not admissible, less is better.
fn heuristic(goals: &[Pos], boxes: &[Pos]) -> u32 {
    let mut taken = vec![false; boxes.len()];
    let mut total = 0;
    for &goal in goals {
        let mut nearest: Option<(usize, u16)> = None;
        for (i, &b) in boxes.iter().enumerate() {
            if taken[i] {
                continue;
            }
            let dist = b.dist(goal);
            if nearest.map_or(true, |(_, min)| dist < min) {
                nearest = Some((i, dist));
            }
        }
        if let Some((i, dist)) = nearest {
            taken[i] = true;
            total += u32::from(dist);
        }
    }
    total
}
