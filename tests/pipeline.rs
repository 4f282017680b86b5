//! End-to-end pipeline tests: CSV tables in, cross-validated models out.
//!
//! Exercises the full path the study takes: ingest the source tables,
//! assemble the panel, run the year loop over the kinship networks, join
//! the metrics back, impute, drop incomplete rows, and evaluate a model
//! ladder.

use std::io::Write;

use tempfile::NamedTempFile;

use contagio::data::{assemble_panel, kinship_table, read_records, KinshipRecord};
use contagio::prelude::*;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write CSV");
    file
}

/// Panel of `states` over `years` with war flags taken from `wars`.
fn synthetic_panel(states: &[u32], years: &[i32], wars: &[(u32, i32)]) -> Panel {
    let mut panel = Panel::new(&["polity", "gdp_pc", "war"]);
    for &state in states {
        for &year in years {
            panel.push_row(state, year).unwrap();
            panel.set(state, year, "polity", 0.0).unwrap();
            panel.set(state, year, "gdp_pc", 1000.0).unwrap();
            let at_war = wars.contains(&(state, year));
            panel
                .set(state, year, "war", if at_war { 1.0 } else { 0.0 })
                .unwrap();
        }
    }
    panel
}

fn triangle_kinship() -> KinshipTable {
    KinshipTable::new(vec![
        Membership::new(100, 1, "Alpha", "R"),
        Membership::new(200, 1, "Alpha", "R"),
        Membership::new(300, 1, "Alpha", "R"),
    ])
}

#[test]
fn csv_to_kinship_edges() {
    let file = write_csv(
        "state,group,name,region\n\
         100,1,Alpha,R\n\
         200,1,Alpha,R\n\
         300,1,Alpha,R\n",
    );
    let records: Vec<KinshipRecord> = read_records(file.path()).unwrap();
    let table = kinship_table(records);

    let edges = table.edge_list();
    assert_eq!(edges.len(), 3);
}

#[test]
fn year_graph_node_count_equals_active_states() {
    let years: Vec<i32> = (1980..=1990).collect();
    let panel = synthetic_panel(&[100, 200, 300, 400, 500], &years, &[]);
    let kinship = triangle_kinship();

    for &year in &years {
        let active = panel.active_states(year);
        let network = YearNetwork::build(year, &kinship, &active);
        assert_eq!(network.graph().num_nodes(), active.len());
    }
}

#[test]
fn metrics_join_preserves_row_count_and_fills_horizon() {
    let years: Vec<i32> = (1985..=1990).collect();
    let panel_states = [100, 200, 300, 999];
    let mut panel = synthetic_panel(&panel_states, &years, &[(200, 1988)]);
    let kinship = triangle_kinship();
    let config = MetricConfig::default();
    let rows_before = panel.n_rows();

    let metrics = compute_metrics(&panel, &kinship, "war", 1986..=1990, &config).unwrap();
    metrics
        .join_onto(&mut panel, "clustering", "neighbor_wars")
        .unwrap();

    assert_eq!(panel.n_rows(), rows_before);
    // 5 computed years x 4 states.
    assert_eq!(metrics.len(), 20);

    // Triangle members carry clustering 1.0; the isolated state carries
    // sentinels.
    assert_eq!(panel.get(100, 1990, "clustering"), Some(1.0));
    assert_eq!(
        panel.get(999, 1990, "clustering"),
        Some(config.isolated_clustering)
    );
    assert_eq!(
        panel.get(999, 1990, "neighbor_wars"),
        Some(config.isolated_neighbor_conflict)
    );

    // 200 was at war in 1988: its neighbors see that in 1989, not 1988.
    assert_eq!(panel.get(100, 1989, "neighbor_wars"), Some(1.0));
    assert_eq!(panel.get(100, 1988, "neighbor_wars"), Some(0.0));

    // The first panel year is outside the computed horizon.
    assert!(panel.get(100, 1985, "clustering").unwrap().is_nan());
}

#[test]
fn full_study_over_synthetic_tables() {
    // Panel with enough rows to cross-validate: 10 states, 6 years.
    let states: Vec<u32> = (1..=10).map(|i| i * 100).collect();
    let years: Vec<i32> = (1985..=1990).collect();
    // States 100-300 share a group and keep fighting; spillover exists.
    let wars: Vec<(u32, i32)> = (1985..=1989).flat_map(|y| [(100, y), (200, y)]).collect();
    let mut panel = synthetic_panel(&states, &years, &wars);
    let kinship = triangle_kinship();

    let metrics = compute_metrics(
        &panel,
        &kinship,
        "war",
        1986..=1990,
        &MetricConfig::default(),
    )
    .unwrap();
    metrics
        .join_onto(&mut panel, "clustering", "neighbor_wars")
        .unwrap();

    panel.lag_column("war", "war_prev").unwrap();
    panel.impute_with_state_mean("polity", 0.0).unwrap();
    panel.impute_with_state_mean("gdp_pc", 1000.0).unwrap();
    panel
        .retain_complete(&["polity", "gdp_pc", "war", "war_prev", "clustering"])
        .unwrap();
    assert!(panel.n_rows() > 0);

    let specs = vec![
        ModelSpec::new("controls", &["polity", "gdp_pc", "war_prev"], "war"),
        ModelSpec::new(
            "with-network",
            &["polity", "gdp_pc", "war_prev", "clustering", "neighbor_wars"],
            "war",
        ),
    ];
    let template = LogisticRegression::new()
        .with_learning_rate(0.1)
        .with_max_iter(500);
    let kfold = KFold::new(5).with_random_state(42);

    let results = run_study(&panel, &specs, &template, &kfold).unwrap();
    assert_eq!(results.len(), 2);
    for r in &results {
        assert_eq!(r.cv.scores.len(), 5);
        assert!(r.cv.mean() >= 0.0 && r.cv.mean() <= 1.0);
    }
}

#[test]
fn imputation_is_exhaustive_for_observed_states() {
    let mut panel = Panel::new(&["gdp_pc"]);
    for year in 1980..1990 {
        panel.push_row(100, year).unwrap();
    }
    panel.set(100, 1980, "gdp_pc", 500.0).unwrap();
    panel.set(100, 1981, "gdp_pc", 700.0).unwrap();

    let summary = panel.impute_with_state_mean("gdp_pc", 0.0).unwrap();
    assert_eq!(summary.mean_imputed, 8);
    assert_eq!(summary.fallback_imputed, 0);
    for year in 1982..1990 {
        assert_eq!(panel.get(100, year, "gdp_pc"), Some(600.0));
    }
}
