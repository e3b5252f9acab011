use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};

use separator::Separatable;

use crate::state::State;

/// One discovered board configuration plus its search bookkeeping.
/// Nodes live in an arena (a plain `Vec`), `prev` is an index into it.
#[derive(Debug)]
pub(crate) struct SearchNode {
    pub(crate) state: State,
    pub(crate) prev: Option<usize>,
    /// g - steps from the start state. Every step costs 1,
    /// pushing or pulling doesn't cost extra.
    pub(crate) dist: i32,
    /// h - cached estimator output.
    pub(crate) h: i32,
    /// f - comparison key, computed from g and h per the active cost method.
    pub(crate) f: i32,
    pub(crate) closed: bool,
}

impl SearchNode {
    pub(crate) fn new(state: State, prev: Option<usize>, dist: i32, h: i32, f: i32) -> Self {
        SearchNode {
            state,
            prev,
            dist,
            h,
            f,
            closed: false,
        }
    }
}

/// Heap entry - the arena owns the node data, the heap only orders indices.
/// A relaxation leaves the old entry in the heap; it's recognized as stale
/// when popped because its f no longer matches the node's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenEntry {
    pub(crate) f: i32,
    pub(crate) dist: i32,
    pub(crate) order: u64,
    pub(crate) node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // ties broken by lowest g, then insertion order, so results
        // are deterministic
        self.f
            .cmp(&other.f)
            .then_with(|| self.dist.cmp(&other.dist))
            .then_with(|| self.order.cmp(&other.order))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<i32>,
    visited_states: Vec<i32>,
    duplicate_states: Vec<i32>,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats {
            created_states: vec![],
            visited_states: vec![],
            duplicate_states: vec![],
        }
    }

    pub fn total_created(&self) -> i32 {
        self.created_states.iter().sum::<i32>()
    }

    pub fn total_unique_visited(&self) -> i32 {
        self.visited_states.iter().sum::<i32>()
    }

    pub fn total_reached_duplicates(&self) -> i32 {
        self.duplicate_states.iter().sum::<i32>()
    }

    pub(crate) fn add_created(&mut self, dist: i32) -> bool {
        Self::add(&mut self.created_states, dist)
    }

    pub(crate) fn add_unique_visited(&mut self, dist: i32) -> bool {
        Self::add(&mut self.visited_states, dist)
    }

    pub(crate) fn add_reached_duplicate(&mut self, dist: i32) -> bool {
        Self::add(&mut self.duplicate_states, dist)
    }

    fn add(counts: &mut Vec<i32>, dist: i32) -> bool {
        let mut new_depth = false;

        // while because some depths might be skipped
        while dist as usize >= counts.len() {
            counts.push(0);
            new_depth = true;
        }
        counts[dist as usize] += 1;
        new_depth
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "total created / unique visited / reached duplicates:")?;
        writeln!(
            f,
            "{:<16}{:<17}{}",
            self.total_created().separated_string(),
            self.total_unique_visited().separated_string(),
            self.total_reached_duplicates().separated_string()
        )
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let visited = self.total_unique_visited();
        let duplicates = self.total_reached_duplicates();
        let left = created - visited;
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Unique visited total: {}", visited.separated_string())?;
        writeln!(
            f,
            "Reached duplicates total: {}",
            duplicates.separated_string()
        )?;
        writeln!(
            f,
            "Created but not visited total: {}",
            left.separated_string()
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<15}{:<15}{:<15}{}",
            "Depth", "Created", "Unique", "Duplicates"
        )?;
        // created_states should be the longest vec
        for i in 0..self.created_states.len() {
            let depth = format!("{}:", i);
            let visited = self.visited_states.get(i).cloned().unwrap_or(0);
            let duplicates = self.duplicate_states.get(i).cloned().unwrap_or(0);
            writeln!(
                f,
                "{:<15}{:<15}{:<15}{}",
                depth,
                self.created_states[i].separated_string(),
                visited.separated_string(),
                duplicates.separated_string()
            )?;
        }
        Ok(())
    }
}
