//! Per-year kinship network construction and spillover metric computation.
//!
//! This is the core of the pipeline: for every study year, build the
//! kinship network over the states active that year, then compute per state
//! the closed-neighborhood clustering coefficient and the count of wars
//! among direct neighbors in the prior year. The 58 yearly networks are
//! independent; each is dropped once its metrics are extracted, since the
//! sovereign state set changes from year to year.
//!
//! # Examples
//!
//! ```
//! use contagio::kinship::{KinshipTable, Membership};
//! use contagio::panel::Panel;
//! use contagio::spillover::{compute_metrics, MetricConfig};
//!
//! let mut panel = Panel::new(&["war"]);
//! for state in [100, 200, 300] {
//!     panel.push_row(state, 1989).unwrap();
//!     panel.push_row(state, 1990).unwrap();
//!     panel.set(state, 1989, "war", 0.0).unwrap();
//! }
//!
//! let kinship = KinshipTable::new(vec![
//!     Membership::new(100, 1, "Alpha", "R"),
//!     Membership::new(200, 1, "Alpha", "R"),
//!     Membership::new(300, 1, "Alpha", "R"),
//! ]);
//!
//! let metrics =
//!     compute_metrics(&panel, &kinship, "war", 1990..=1990, &MetricConfig::default()).unwrap();
//! // Three states in one shared group form a triangle: clustering 1.0 each.
//! assert!(metrics.rows().iter().all(|r| (r.clustering - 1.0).abs() < 1e-9));
//! ```

use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::kinship::{KinshipEdge, KinshipTable};
use crate::panel::Panel;

/// Sentinel constants and output precision for the per-state metrics.
///
/// Isolated states get small non-zero sentinels rather than true zero so
/// the downstream regression can still separate "no network position" from
/// "dense but conflict-free neighborhood".
///
/// # Examples
///
/// ```
/// use contagio::spillover::MetricConfig;
///
/// let config = MetricConfig::default().with_isolated_clustering(0.05);
/// assert_eq!(config.isolated_clustering, 0.05);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MetricConfig {
    /// Clustering value for states with zero kinship neighbors.
    pub isolated_clustering: f64,
    /// Clustering value when the ego subgraph admits no triads
    /// (e.g. exactly one neighbor). Distinct from the isolated sentinel so
    /// the two cases stay distinguishable downstream.
    pub undefined_clustering: f64,
    /// Neighborhood-conflict value for states with zero neighbors.
    pub isolated_neighbor_conflict: f64,
    /// Decimal places kept on defined clustering coefficients.
    pub decimals: u32,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            isolated_clustering: 0.01,
            undefined_clustering: 0.02,
            isolated_neighbor_conflict: 0.001,
            decimals: 2,
        }
    }
}

impl MetricConfig {
    /// Set the isolated-state clustering sentinel.
    #[must_use]
    pub fn with_isolated_clustering(mut self, value: f64) -> Self {
        self.isolated_clustering = value;
        self
    }

    /// Set the undefined-clustering sentinel.
    #[must_use]
    pub fn with_undefined_clustering(mut self, value: f64) -> Self {
        self.undefined_clustering = value;
        self
    }

    /// Set the isolated-state neighborhood-conflict sentinel.
    #[must_use]
    pub fn with_isolated_neighbor_conflict(mut self, value: f64) -> Self {
        self.isolated_neighbor_conflict = value;
        self
    }

    /// Set the number of decimals kept on defined clustering values.
    #[must_use]
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }
}

/// The kinship network of a single study year.
///
/// Node ids are contiguous indices into the sorted active-state list; the
/// original state codes and edge labels stay available for inspection.
#[derive(Debug, Clone)]
pub struct YearNetwork {
    year: i32,
    states: Vec<u32>,
    index: HashMap<u32, NodeId>,
    graph: Graph,
    edges: Vec<KinshipEdge>,
}

impl YearNetwork {
    /// Build the network for `year` from the kinship table and the states
    /// active that year.
    ///
    /// The kinship table is first restricted to `active_states`; states
    /// without any surviving shared group become isolated nodes.
    #[must_use]
    pub fn build(year: i32, kinship: &KinshipTable, active_states: &[u32]) -> Self {
        let mut states = active_states.to_vec();
        states.sort_unstable();
        states.dedup();

        let index: HashMap<u32, NodeId> =
            states.iter().enumerate().map(|(i, &s)| (s, i)).collect();

        let active: HashSet<u32> = states.iter().copied().collect();
        let edges = kinship.restrict_to(&active).edge_list();

        let id_edges: Vec<(NodeId, NodeId)> = edges
            .iter()
            .map(|e| (index[&e.source], index[&e.target]))
            .collect();
        let graph = Graph::from_edges(&id_edges, states.len());

        Self {
            year,
            states,
            index,
            graph,
            edges,
        }
    }

    /// Study year of this network.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Sorted state codes backing the node ids.
    #[must_use]
    pub fn states(&self) -> &[u32] {
        &self.states
    }

    /// The underlying graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Labeled kinship edges (state codes, shared group names).
    #[must_use]
    pub fn edges(&self) -> &[KinshipEdge] {
        &self.edges
    }

    /// Node id of a state code, if the state is active this year.
    #[must_use]
    pub fn node_of(&self, state: u32) -> Option<NodeId> {
        self.index.get(&state).copied()
    }

    /// State code of a node id.
    #[must_use]
    pub fn state_of(&self, node: NodeId) -> u32 {
        self.states[node]
    }
}

/// One computed metric row, keyed (state, year).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    /// Numeric state code.
    pub state: u32,
    /// Study year.
    pub year: i32,
    /// Closed-neighborhood clustering coefficient (or sentinel).
    pub clustering: f64,
    /// Prior-year war incidence summed over direct neighbors (or sentinel).
    pub neighbor_wars: f64,
}

/// Accumulator of per-state-year metrics across the study horizon.
#[derive(Debug, Clone, Default)]
pub struct MetricTable {
    rows: Vec<MetricRow>,
}

impl MetricTable {
    /// Borrow the metric rows.
    #[must_use]
    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    /// Number of metric rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Left-join the metrics onto the panel as two named columns.
    ///
    /// Only existing panel rows are written; the panel row count never
    /// changes. Metric rows without a panel counterpart are counted and
    /// reported at warn level (they indicate an active-state list that
    /// drifted from the panel).
    ///
    /// # Errors
    ///
    /// Returns an error if a panel write fails.
    pub fn join_onto(
        &self,
        panel: &mut Panel,
        clustering_column: &str,
        neighbor_wars_column: &str,
    ) -> Result<()> {
        panel.ensure_column(clustering_column);
        panel.ensure_column(neighbor_wars_column);

        let mut unmatched = 0usize;
        for row in &self.rows {
            if panel.get(row.state, row.year, clustering_column).is_none() {
                unmatched += 1;
                continue;
            }
            panel.set(row.state, row.year, clustering_column, row.clustering)?;
            panel.set(
                row.state,
                row.year,
                neighbor_wars_column,
                row.neighbor_wars,
            )?;
        }

        if unmatched > 0 {
            warn!(unmatched, "metric rows without matching panel row");
        }
        Ok(())
    }
}

/// Run the year loop over `years`, computing both spillover metrics for
/// every active state of every year.
///
/// `war_column` is the panel's war-incidence flag; the neighborhood count
/// for year Y sums the flag at Y-1 (conflict spills over with a lag).
/// Years with no active states are skipped.
///
/// # Errors
///
/// Currently infallible in practice; the `Result` keeps the signature
/// stable while the panel read path evolves.
pub fn compute_metrics(
    panel: &Panel,
    kinship: &KinshipTable,
    war_column: &str,
    years: RangeInclusive<i32>,
    config: &MetricConfig,
) -> Result<MetricTable> {
    let mut table = MetricTable::default();

    for year in years {
        let active = panel.active_states(year);
        if active.is_empty() {
            continue;
        }

        let network = YearNetwork::build(year, kinship, &active);
        debug!(
            year,
            states = network.states().len(),
            edges = network.edges().len(),
            "year network built"
        );

        for node in 0..network.graph().num_nodes() {
            let state = network.state_of(node);
            let degree = network.graph().degree(node);

            let clustering = if degree == 0 {
                config.isolated_clustering
            } else {
                match network.graph().ego_transitivity(node) {
                    Some(t) => round_to(t, config.decimals),
                    None => config.undefined_clustering,
                }
            };

            let neighbor_wars = if degree == 0 {
                config.isolated_neighbor_conflict
            } else {
                network
                    .graph()
                    .neighbors(node)
                    .iter()
                    .filter_map(|&n| panel.get(network.state_of(n), year - 1, war_column))
                    .filter(|v| v.is_finite())
                    .sum()
            };

            table.rows.push(MetricRow {
                state,
                year,
                clustering,
                neighbor_wars,
            });
        }
    }

    info!(rows = table.len(), "spillover metrics computed");
    Ok(table)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
