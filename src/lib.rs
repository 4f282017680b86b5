//! Contagio: conflict-spillover analysis pipeline.
//!
//! Contagio studies whether the density of transborder ethnic-kinship ties
//! between states predicts the spread of intrastate armed conflict to
//! neighboring states. It merges country-year panels, rebuilds the kinship
//! network for every study year, computes per-state network metrics, and
//! evaluates a ladder of logistic regressions by k-fold cross-validation.
//!
//! # Quick Start
//!
//! ```
//! use contagio::kinship::{KinshipTable, Membership};
//! use contagio::panel::Panel;
//! use contagio::spillover::{compute_metrics, MetricConfig};
//!
//! // Three states tied by one shared ethnic group form a triangle.
//! let mut panel = Panel::new(&["war"]);
//! for state in [100, 200, 300] {
//!     panel.push_row(state, 1989).unwrap();
//!     panel.push_row(state, 1990).unwrap();
//!     panel.set(state, 1989, "war", 0.0).unwrap();
//! }
//! let kinship = KinshipTable::new(vec![
//!     Membership::new(100, 1, "Alpha", "R"),
//!     Membership::new(200, 1, "Alpha", "R"),
//!     Membership::new(300, 1, "Alpha", "R"),
//! ]);
//!
//! let metrics =
//!     compute_metrics(&panel, &kinship, "war", 1990..=1990, &MetricConfig::default()).unwrap();
//! metrics.join_onto(&mut panel, "clustering", "neighbor_wars").unwrap();
//! assert_eq!(panel.get(100, 1990, "clustering"), Some(1.0));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Vector and Matrix types backing the regression harness
//! - [`data`]: CSV ingestion of the source tables
//! - [`panel`]: the state-year panel with logged imputation policies
//! - [`kinship`]: TEK membership table and edge-list builder
//! - [`graph`]: undirected CSR graph with ego transitivity
//! - [`spillover`]: per-year network construction and metric computation
//! - [`classification`]: binary logistic regression
//! - [`model_selection`]: k-fold cross-validation
//! - [`metrics`]: accuracy, precision/recall, log loss
//! - [`study`]: the model-specification ladder

pub mod classification;
pub mod data;
pub mod error;
pub mod graph;
pub mod kinship;
pub mod metrics;
pub mod model_selection;
pub mod panel;
pub mod prelude;
pub mod primitives;
pub mod spillover;
pub mod study;
pub mod traits;

pub use error::{ContagioError, Result};
