use std::fmt::{self, Display, Formatter};

use crate::config::SearchConfig;

use super::node::SearchNode;

/// Order in which open nodes are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// fewest pushes first
    Breadth,
    /// `2h + depth + cost`
    Weighted,
    /// `2h + depth / 3`
    Greedy,
}

impl Strategy {
    /// Lower is expanded first.
    pub(crate) fn priority(self, node: &SearchNode<'_>) -> u64 {
        let h = u64::from(node.h);
        let depth = u64::from(node.depth);
        let cost = u64::from(node.cost);
        match self {
            Strategy::Breadth => depth,
            Strategy::Weighted => 2 * h + depth + cost,
            // multiplied by 3 to avoid fractions
            Strategy::Greedy => 6 * h + depth,
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Strategy::Breadth => write!(f, "breadth"),
            Strategy::Weighted => write!(f, "weighted"),
            Strategy::Greedy => write!(f, "greedy"),
        }
    }
}

/// Decides when the search stops being exhaustive.
///
/// Each switch happens at most once and there is no way back.
#[derive(Debug)]
pub(crate) struct Schedule {
    strategy: Strategy,
    weighted_from: u32,
    greedy_after: u32,
    weighted_started: bool,
    switching: bool,
}

impl Schedule {
    pub(crate) fn new(config: &SearchConfig) -> Self {
        Schedule {
            strategy: Strategy::Breadth,
            weighted_from: config.weighted_from,
            greedy_after: config.greedy_after,
            weighted_started: false,
            switching: true,
        }
    }

    pub(crate) fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the new strategy if it changed.
    pub(crate) fn update(&mut self, expanded: u32) -> Option<Strategy> {
        if !self.switching {
            return None;
        }

        if !self.weighted_started {
            if self.weighted_from <= expanded && expanded <= self.greedy_after {
                self.weighted_started = true;
                self.strategy = Strategy::Weighted;
                return Some(self.strategy);
            }
        } else if expanded > self.greedy_after {
            self.strategy = Strategy::Greedy;
            self.switching = false;
            return Some(self.strategy);
        }
        None
    }
}
