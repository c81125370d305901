use std::fmt::{self, Debug, Display, Formatter};

use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

use super::strategy::Strategy;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created: Vec<u32>,
    expanded: Vec<u32>,
    duplicates: Vec<u32>,
    frozen: Vec<u32>,
    switches: Vec<(u32, Strategy)>,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn total_created(&self) -> u32 {
        self.created.iter().sum()
    }

    pub fn total_expanded(&self) -> u32 {
        self.expanded.iter().sum()
    }

    /// Rejected because the same boxes were already reached from the same area
    pub fn total_duplicates(&self) -> u32 {
        self.duplicates.iter().sum()
    }

    /// Rejected as freeze deadlocks
    pub fn total_frozen(&self) -> u32 {
        self.frozen.iter().sum()
    }

    /// After how many expanded nodes the search changed strategy
    pub fn switches(&self) -> &[(u32, Strategy)] {
        &self.switches
    }

    pub(crate) fn add_created(&mut self, depth: u16) -> bool {
        Self::add(&mut self.created, depth)
    }

    pub(crate) fn add_expanded(&mut self, depth: u16) -> bool {
        Self::add(&mut self.expanded, depth)
    }

    pub(crate) fn add_duplicate(&mut self, depth: u16) -> bool {
        Self::add(&mut self.duplicates, depth)
    }

    pub(crate) fn add_frozen(&mut self, depth: u16) -> bool {
        Self::add(&mut self.frozen, depth)
    }

    pub(crate) fn add_switch(&mut self, expanded: u32, strategy: Strategy) {
        self.switches.push((expanded, strategy));
    }

    fn add(counts: &mut Vec<u32>, depth: u16) -> bool {
        let depth = usize::from(depth);
        let mut ret = false;

        // while because some depths might be skipped
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(Row::new(
            ["Depth", "Created", "Expanded", "Duplicates", "Frozen"]
                .iter()
                .map(|title| Cell::new(title))
                .collect(),
        ));

        let get = |counts: &[u32], depth: usize| counts.get(depth).cloned().unwrap_or(0);
        // created is the longest except when only the root was created
        let depths = self.created.len().max(self.expanded.len());
        for depth in 0..depths {
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}:", depth)),
                Cell::new(&get(&self.created, depth).separated_string()),
                Cell::new(&get(&self.expanded, depth).separated_string()),
                Cell::new(&get(&self.duplicates, depth).separated_string()),
                Cell::new(&get(&self.frozen, depth).separated_string()),
            ]));
        }
        table
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", self.total_created().separated_string())?;
        writeln!(f, "Expanded total: {}", self.total_expanded().separated_string())?;
        writeln!(f, "Duplicates total: {}", self.total_duplicates().separated_string())?;
        writeln!(f, "Freeze deadlocks total: {}", self.total_frozen().separated_string())?;
        for &(expanded, strategy) in &self.switches {
            writeln!(
                f,
                "Switched to {} after {} expanded",
                strategy,
                expanded.separated_string()
            )?;
        }
        writeln!(f)?;
        write!(f, "{}", self.table())
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created)?;
        writeln!(f, "expanded by depth: {:?}", self.expanded)?;
        writeln!(f, "duplicates by depth: {:?}", self.duplicates)?;
        writeln!(f, "frozen by depth: {:?}", self.frozen)?;
        writeln!(f, "switches: {:?}", self.switches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting() {
        let mut stats = Stats::new();
        assert!(stats.add_created(0));
        assert!(stats.add_created(2));
        assert!(!stats.add_created(1));
        assert!(!stats.add_created(2));
        assert!(stats.add_expanded(0));
        assert!(stats.add_duplicate(1));
        stats.add_switch(7000, Strategy::Weighted);

        assert_eq!(stats.total_created(), 4);
        assert_eq!(stats.total_expanded(), 1);
        assert_eq!(stats.total_duplicates(), 1);
        assert_eq!(stats.total_frozen(), 0);
        assert_eq!(stats.switches(), &[(7000, Strategy::Weighted)]);

        let out = stats.to_string();
        assert!(out.contains("States created total: 4\n"));
        assert!(out.contains("Switched to weighted after 7,000 expanded\n"));
        assert!(out.contains("Depth"));
    }
}
