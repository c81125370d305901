use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Custom,
    Xsb,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Format::Custom => write!(f, "custom"),
            Format::Xsb => write!(f, "xsb"),
        }
    }
}

/// When the search gives up on breadth-first order.
///
/// The strategy switches to weighted once the number of expanded nodes
/// first falls into `weighted_from..=greedy_after` and to greedy once it
/// exceeds `greedy_after`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub weighted_from: u32,
    pub greedy_after: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            weighted_from: 7_000,
            greedy_after: 12_000,
        }
    }
}
