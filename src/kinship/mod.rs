//! Transborder ethnic-kinship (TEK) membership table and edge-list builder.
//!
//! Two states share a kinship tie when at least one ethnic group has members
//! in both. The builder turns the (state, group) membership table into an
//! undirected edge list with at most one edge per unordered state pair, the
//! edge label carrying every shared group name.
//!
//! # Examples
//!
//! ```
//! use contagio::kinship::{KinshipTable, Membership};
//!
//! let table = KinshipTable::new(vec![
//!     Membership::new(200, 1, "Kurds", "Middle East"),
//!     Membership::new(300, 1, "Kurds", "Middle East"),
//!     Membership::new(400, 1, "Kurds", "Middle East"),
//! ]);
//!
//! let edges = table.edge_list();
//! assert_eq!(edges.len(), 3); // triangle
//! ```

use std::collections::{BTreeMap, HashSet};

/// One row of the kinship membership table: a group with members in a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    /// Numeric state code.
    pub state: u32,
    /// Kinship group identifier.
    pub group: u32,
    /// Group name (as published in the source dataset).
    pub name: String,
    /// World region of the group.
    pub region: String,
}

impl Membership {
    /// Convenience constructor.
    #[must_use]
    pub fn new(state: u32, group: u32, name: &str, region: &str) -> Self {
        Self {
            state,
            group,
            name: name.to_string(),
            region: region.to_string(),
        }
    }
}

/// Undirected kinship edge between two states.
///
/// `groups` concatenates the names of every group the pair shares,
/// `", "`-separated, in group-id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KinshipEdge {
    /// Smaller state code of the pair.
    pub source: u32,
    /// Larger state code of the pair.
    pub target: u32,
    /// Concatenated shared group names.
    pub groups: String,
}

/// The full kinship membership table.
#[derive(Debug, Clone, Default)]
pub struct KinshipTable {
    rows: Vec<Membership>,
}

impl KinshipTable {
    /// Build a table from membership rows.
    #[must_use]
    pub fn new(rows: Vec<Membership>) -> Self {
        Self { rows }
    }

    /// Number of membership rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the membership rows.
    #[must_use]
    pub fn rows(&self) -> &[Membership] {
        &self.rows
    }

    /// Distinct states appearing in the table.
    #[must_use]
    pub fn states(&self) -> Vec<u32> {
        let mut states: Vec<u32> = self
            .rows
            .iter()
            .map(|r| r.state)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        states.sort_unstable();
        states
    }

    /// Restrict the table to rows whose state is in `active`.
    ///
    /// Used by the per-year constructor: only states with a panel row that
    /// year participate in the network.
    #[must_use]
    pub fn restrict_to(&self, active: &HashSet<u32>) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .filter(|r| active.contains(&r.state))
                .cloned()
                .collect(),
        }
    }

    /// Build the undirected edge list from shared group membership.
    ///
    /// Within each group every unordered pair of member states is emitted
    /// exactly once (quadratic in group size, fine at this data scale).
    /// Pairs tied by several groups collapse to one edge whose label
    /// concatenates the group names in group-id order.
    #[must_use]
    pub fn edge_list(&self) -> Vec<KinshipEdge> {
        // Group id -> (name, sorted deduped member states). BTreeMap keeps
        // the output deterministic in group-id order.
        let mut groups: BTreeMap<u32, (String, Vec<u32>)> = BTreeMap::new();
        for row in &self.rows {
            let entry = groups
                .entry(row.group)
                .or_insert_with(|| (row.name.clone(), Vec::new()));
            entry.1.push(row.state);
        }

        let mut labels: BTreeMap<(u32, u32), Vec<String>> = BTreeMap::new();

        for (name, members) in groups.values_mut() {
            members.sort_unstable();
            members.dedup();

            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    labels
                        .entry((members[i], members[j]))
                        .or_default()
                        .push(name.clone());
                }
            }
        }

        labels
            .into_iter()
            .map(|((source, target), names)| KinshipEdge {
                source,
                target,
                groups: names.join(", "),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kurds(state: u32) -> Membership {
        Membership::new(state, 7, "Kurds", "Middle East")
    }

    #[test]
    fn test_triangle_group() {
        let table = KinshipTable::new(vec![kurds(640), kurds(645), kurds(630)]);
        let edges = table.edge_list();
        assert_eq!(edges.len(), 3);
        for e in &edges {
            assert!(e.source < e.target);
            assert_eq!(e.groups, "Kurds");
        }
    }

    #[test]
    fn test_no_duplicate_pairs_within_group() {
        // Duplicate membership rows must not produce duplicate edges.
        let table = KinshipTable::new(vec![kurds(640), kurds(640), kurds(645)]);
        let edges = table.edge_list();
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn test_multi_group_pair_concatenates_labels() {
        let table = KinshipTable::new(vec![
            Membership::new(100, 1, "Alpha", "R"),
            Membership::new(200, 1, "Alpha", "R"),
            Membership::new(100, 2, "Beta", "R"),
            Membership::new(200, 2, "Beta", "R"),
        ]);
        let edges = table.edge_list();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].groups, "Alpha, Beta");
    }

    #[test]
    fn test_restrict_to_active_states() {
        let table = KinshipTable::new(vec![kurds(640), kurds(645), kurds(630)]);
        let active: HashSet<u32> = [640, 645].into_iter().collect();
        let restricted = table.restrict_to(&active);
        assert_eq!(restricted.len(), 2);
        assert_eq!(restricted.edge_list().len(), 1);
    }

    #[test]
    fn test_single_member_group_yields_no_edges() {
        let table = KinshipTable::new(vec![kurds(640)]);
        assert!(table.edge_list().is_empty());
    }

    #[test]
    fn test_states_sorted_distinct() {
        let table = KinshipTable::new(vec![kurds(645), kurds(640), kurds(645)]);
        assert_eq!(table.states(), vec![640, 645]);
    }

    #[test]
    fn test_empty_table() {
        let table = KinshipTable::default();
        assert!(table.is_empty());
        assert!(table.edge_list().is_empty());
        assert!(table.states().is_empty());
    }
}
