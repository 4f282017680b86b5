//! CSV ingestion for the study's source tables.
//!
//! All inputs are small country-year tables read once at startup: the
//! country-code crosswalk, kinship-group membership, polity scores,
//! per-capita GDP, and war incidence. Records deserialize through serde;
//! parse failures carry the file line so a broken row is findable.

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;

use crate::error::{ContagioError, Result};
use crate::kinship::{KinshipTable, Membership};
use crate::panel::Panel;

/// Country-code crosswalk row: numeric code to letter codes and name.
#[derive(Debug, Clone, Deserialize)]
pub struct CrosswalkRecord {
    /// Numeric state code.
    pub state: u32,
    /// Two-letter country code.
    pub iso2: String,
    /// Three-letter country code.
    pub iso3: String,
    /// Display name.
    pub name: String,
}

/// Kinship membership row as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct KinshipRecord {
    /// Numeric state code.
    pub state: u32,
    /// Kinship group identifier.
    pub group: u32,
    /// Group name.
    pub name: String,
    /// World region.
    pub region: String,
}

/// Polity (political regime) score row.
#[derive(Debug, Clone, Deserialize)]
pub struct PolityRecord {
    /// Numeric state code.
    pub state: u32,
    /// Calendar year.
    pub year: i32,
    /// Polity score, absent in interregnum years.
    pub polity: Option<f64>,
}

/// Per-capita GDP row.
#[derive(Debug, Clone, Deserialize)]
pub struct GdpRecord {
    /// Numeric state code.
    pub state: u32,
    /// Calendar year.
    pub year: i32,
    /// GDP per capita, absent for missing survey years.
    pub gdp_pc: Option<f64>,
}

/// War incidence row with the flag breakdown used by the study.
#[derive(Debug, Clone, Deserialize)]
pub struct WarRecord {
    /// Numeric state code.
    pub state: u32,
    /// Calendar year.
    pub year: i32,
    /// Any intrastate war this year (0/1).
    pub war: Option<f64>,
    /// Territorial war flag.
    pub war_terr: Option<f64>,
    /// Governmental war flag.
    pub war_gov: Option<f64>,
    /// Ethnic war flag.
    pub war_eth: Option<f64>,
    /// Count of prior wars.
    pub war_hist: Option<f64>,
    /// Years since the last war ended.
    pub peace_years: Option<f64>,
}

/// Read every record of a CSV file with headers.
///
/// # Errors
///
/// Returns [`ContagioError::Io`] if the file cannot be opened and
/// [`ContagioError::CsvParse`] with the offending line for record
/// failures.
///
/// # Examples
///
/// ```no_run
/// use contagio::data::{read_records, KinshipRecord};
///
/// let rows: Vec<KinshipRecord> = read_records("data/kinship.csv").unwrap();
/// ```
pub fn read_records<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| match e.kind() {
        csv::ErrorKind::Io(_) => {
            ContagioError::Other(format!("failed to open {}: {e}", path.display()))
        }
        _ => ContagioError::CsvParse {
            line: 1,
            column: "headers".to_string(),
            message: e.to_string(),
        },
    })?;

    let mut records = Vec::new();
    // Line 1 is the header row.
    let mut line = 2usize;
    for result in reader.deserialize() {
        let record: T = result.map_err(|e| ContagioError::CsvParse {
            line,
            column: "record".to_string(),
            message: e.to_string(),
        })?;
        records.push(record);
        line += 1;
    }

    info!(path = %path.display(), rows = records.len(), "loaded CSV table");
    Ok(records)
}

/// In-memory crosswalk from numeric state codes to letter codes.
#[derive(Debug, Clone, Default)]
pub struct Crosswalk {
    by_state: HashMap<u32, CrosswalkRecord>,
}

impl Crosswalk {
    /// Build from crosswalk records; later duplicates win.
    #[must_use]
    pub fn new(records: Vec<CrosswalkRecord>) -> Self {
        Self {
            by_state: records.into_iter().map(|r| (r.state, r)).collect(),
        }
    }

    /// Look up the record for a state code.
    #[must_use]
    pub fn get(&self, state: u32) -> Option<&CrosswalkRecord> {
        self.by_state.get(&state)
    }

    /// Three-letter code for a state, if known.
    #[must_use]
    pub fn iso3(&self, state: u32) -> Option<&str> {
        self.by_state.get(&state).map(|r| r.iso3.as_str())
    }

    /// Number of mapped states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_state.len()
    }

    /// Whether the crosswalk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_state.is_empty()
    }
}

/// Convert kinship records into the membership table.
#[must_use]
pub fn kinship_table(records: Vec<KinshipRecord>) -> KinshipTable {
    KinshipTable::new(
        records
            .into_iter()
            .map(|r| Membership {
                state: r.state,
                group: r.group,
                name: r.name,
                region: r.region,
            })
            .collect(),
    )
}

/// Merge the three country-year tables into one panel.
///
/// The panel's key set is the union of (state, year) keys across the
/// inputs; values absent from a table stay NaN for the imputation pass.
///
/// # Errors
///
/// Returns an error on duplicate (state, year) keys within one table.
pub fn assemble_panel(
    polity: &[PolityRecord],
    gdp: &[GdpRecord],
    war: &[WarRecord],
) -> Result<Panel> {
    let mut panel = Panel::new(&[
        "polity",
        "gdp_pc",
        "war",
        "war_terr",
        "war_gov",
        "war_eth",
        "war_hist",
        "peace_years",
    ]);

    fn ensure_row(panel: &mut Panel, state: u32, year: i32) -> Result<()> {
        if panel.get(state, year, "polity").is_none() {
            panel.push_row(state, year)?;
        }
        Ok(())
    }

    for r in polity {
        ensure_row(&mut panel, r.state, r.year)?;
        if let Some(v) = r.polity {
            panel.set(r.state, r.year, "polity", v)?;
        }
    }

    for r in gdp {
        ensure_row(&mut panel, r.state, r.year)?;
        if let Some(v) = r.gdp_pc {
            panel.set(r.state, r.year, "gdp_pc", v)?;
        }
    }

    for r in war {
        ensure_row(&mut panel, r.state, r.year)?;
        let flags = [
            ("war", r.war),
            ("war_terr", r.war_terr),
            ("war_gov", r.war_gov),
            ("war_eth", r.war_eth),
            ("war_hist", r.war_hist),
            ("peace_years", r.peace_years),
        ];
        for (column, value) in flags {
            if let Some(v) = value {
                panel.set(r.state, r.year, column, v)?;
            }
        }
    }

    info!(rows = panel.n_rows(), "panel assembled");
    Ok(panel)
}
