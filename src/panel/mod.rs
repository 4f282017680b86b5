//! State-year panel: the merged country-year dataset.
//!
//! Rows are keyed by (state code, year) and hold named f64 columns. Missing
//! values are `f64::NAN` until an imputation policy runs; every imputation
//! is explicit and logged through `tracing`, never a silent fill.
//!
//! # Examples
//!
//! ```
//! use contagio::panel::Panel;
//!
//! let mut panel = Panel::new(&["polity", "war"]);
//! panel.push_row(640, 1990).unwrap();
//! panel.set(640, 1990, "polity", -7.0).unwrap();
//!
//! assert_eq!(panel.n_rows(), 1);
//! assert_eq!(panel.get(640, 1990, "polity"), Some(-7.0));
//! assert!(panel.get(640, 1990, "war").unwrap().is_nan());
//! ```

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{ContagioError, Result};
use crate::primitives::{Matrix, Vector};

/// Counts from one per-column imputation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImputationSummary {
    /// Column the pass ran on.
    pub column: String,
    /// Cells filled with the state's historical mean.
    pub mean_imputed: usize,
    /// Cells filled with the residual fallback constant.
    pub fallback_imputed: usize,
}

/// Country-year panel with named f64 columns.
#[derive(Debug, Clone)]
pub struct Panel {
    states: Vec<u32>,
    years: Vec<i32>,
    columns: Vec<(String, Vec<f64>)>,
    index: HashMap<(u32, i32), usize>,
}

impl Panel {
    /// Create an empty panel with the given column names.
    #[must_use]
    pub fn new(column_names: &[&str]) -> Self {
        Self {
            states: Vec::new(),
            years: Vec::new(),
            columns: column_names
                .iter()
                .map(|&n| (n.to_string(), Vec::new()))
                .collect(),
            index: HashMap::new(),
        }
    }

    /// Number of state-year rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.states.len()
    }

    /// Column names in declaration order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Whether a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Append a row for (state, year), all columns NaN.
    ///
    /// # Errors
    ///
    /// Returns an error if the key already exists; (state, year) is unique.
    pub fn push_row(&mut self, state: u32, year: i32) -> Result<usize> {
        if self.index.contains_key(&(state, year)) {
            return Err(ContagioError::Other(format!(
                "duplicate state-year row ({state}, {year})"
            )));
        }
        let idx = self.states.len();
        self.states.push(state);
        self.years.push(year);
        for (_, col) in &mut self.columns {
            col.push(f64::NAN);
        }
        self.index.insert((state, year), idx);
        Ok(idx)
    }

    /// Add a NaN-filled column if it does not exist yet.
    pub fn ensure_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns
                .push((name.to_string(), vec![f64::NAN; self.states.len()]));
        }
    }

    /// Set a cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the row or column does not exist.
    pub fn set(&mut self, state: u32, year: i32, column: &str, value: f64) -> Result<()> {
        let row = *self
            .index
            .get(&(state, year))
            .ok_or_else(|| ContagioError::Other(format!("no row for ({state}, {year})")))?;
        let col = self
            .columns
            .iter_mut()
            .find(|(n, _)| n == column)
            .ok_or_else(|| self::missing_column(column))?;
        col.1[row] = value;
        Ok(())
    }

    /// Read a cell; `None` when the row does not exist.
    #[must_use]
    pub fn get(&self, state: u32, year: i32, column: &str) -> Option<f64> {
        let row = *self.index.get(&(state, year))?;
        self.columns
            .iter()
            .find(|(n, _)| n == column)
            .map(|(_, col)| col[row])
    }

    /// Borrow a full column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column does not exist.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, col)| col.as_slice())
            .ok_or_else(|| self::missing_column(name))
    }

    /// Row keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = (u32, i32)> + '_ {
        self.states
            .iter()
            .copied()
            .zip(self.years.iter().copied())
    }

    /// Distinct states with a row in `year`, sorted.
    #[must_use]
    pub fn active_states(&self, year: i32) -> Vec<u32> {
        let mut states: Vec<u32> = self
            .keys()
            .filter(|&(_, y)| y == year)
            .map(|(s, _)| s)
            .collect();
        states.sort_unstable();
        states.dedup();
        states
    }

    /// Inclusive (min, max) year range, `None` for an empty panel.
    #[must_use]
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.years.iter().copied().min()?;
        let max = self.years.iter().copied().max()?;
        Some((min, max))
    }

    /// Write `dest(state, year) = source(state, year - 1)` for every row.
    ///
    /// Rows with no prior-year observation stay NaN. Creates `dest` if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` does not exist.
    pub fn lag_column(&mut self, source: &str, dest: &str) -> Result<()> {
        let src: Vec<f64> = self.column(source)?.to_vec();
        self.ensure_column(dest);

        let lagged: Vec<f64> = (0..self.n_rows())
            .map(|i| {
                let key = (self.states[i], self.years[i] - 1);
                self.index.get(&key).map_or(f64::NAN, |&prev| src[prev])
            })
            .collect();

        let col = self
            .columns
            .iter_mut()
            .find(|(n, _)| n == dest)
            .expect("dest column just ensured");
        col.1 = lagged;
        Ok(())
    }

    /// Impute missing cells with the state's historical mean, then a
    /// residual fallback constant.
    ///
    /// Each filled cell emits a debug event; the pass emits one info
    /// summary. The returned summary carries the counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the column does not exist.
    pub fn impute_with_state_mean(
        &mut self,
        column: &str,
        fallback: f64,
    ) -> Result<ImputationSummary> {
        let col_idx = self
            .columns
            .iter()
            .position(|(n, _)| n == column)
            .ok_or_else(|| self::missing_column(column))?;

        // Per-state mean over observed values.
        let mut sums: HashMap<u32, (f64, usize)> = HashMap::new();
        for (i, &v) in self.columns[col_idx].1.iter().enumerate() {
            if v.is_finite() {
                let entry = sums.entry(self.states[i]).or_insert((0.0, 0));
                entry.0 += v;
                entry.1 += 1;
            }
        }

        let mut mean_imputed = 0;
        let mut fallback_imputed = 0;

        for i in 0..self.states.len() {
            let v = self.columns[col_idx].1[i];
            if v.is_finite() {
                continue;
            }
            let state = self.states[i];
            let year = self.years[i];
            let filled = match sums.get(&state) {
                Some(&(sum, n)) if n > 0 => {
                    let mean = sum / n as f64;
                    debug!(state, year, column, value = mean, policy = "state_mean");
                    mean_imputed += 1;
                    mean
                }
                _ => {
                    debug!(state, year, column, value = fallback, policy = "fallback");
                    fallback_imputed += 1;
                    fallback
                }
            };
            self.columns[col_idx].1[i] = filled;
        }

        info!(
            column,
            mean_imputed, fallback_imputed, "imputation pass complete"
        );

        Ok(ImputationSummary {
            column: column.to_string(),
            mean_imputed,
            fallback_imputed,
        })
    }

    /// Drop rows with a non-finite value in any of `required` columns.
    ///
    /// Returns the number of rows dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a listed column does not exist.
    pub fn retain_complete(&mut self, required: &[&str]) -> Result<usize> {
        let mut col_indices = Vec::with_capacity(required.len());
        for &name in required {
            col_indices.push(
                self.columns
                    .iter()
                    .position(|(n, _)| n == name)
                    .ok_or_else(|| self::missing_column(name))?,
            );
        }

        let keep: Vec<bool> = (0..self.n_rows())
            .map(|i| col_indices.iter().all(|&c| self.columns[c].1[i].is_finite()))
            .collect();
        let dropped = keep.iter().filter(|&&k| !k).count();

        if dropped > 0 {
            self.states = filter_by(&self.states, &keep);
            self.years = filter_by(&self.years, &keep);
            for (_, col) in &mut self.columns {
                *col = filter_by(col, &keep);
            }
            self.index.clear();
            for i in 0..self.states.len() {
                self.index.insert((self.states[i], self.years[i]), i);
            }
        }

        info!(dropped, required = ?required, "dropped incomplete rows");
        Ok(dropped)
    }

    /// Assemble a feature matrix from named columns, rows in panel order.
    ///
    /// # Errors
    ///
    /// Returns an error if a column does not exist or the panel is empty.
    pub fn to_matrix(&self, feature_columns: &[&str]) -> Result<Matrix> {
        if self.n_rows() == 0 {
            return Err(ContagioError::empty_input("panel"));
        }
        let mut cols = Vec::with_capacity(feature_columns.len());
        for &name in feature_columns {
            cols.push(self.column(name)?);
        }

        let mut data = Vec::with_capacity(self.n_rows() * cols.len());
        for i in 0..self.n_rows() {
            for col in &cols {
                data.push(col[i]);
            }
        }
        Matrix::from_vec(self.n_rows(), cols.len(), data)
    }

    /// A single column as a target vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the column does not exist.
    pub fn target(&self, column: &str) -> Result<Vector> {
        Ok(Vector::from_slice(self.column(column)?))
    }
}

fn filter_by<T: Copy>(values: &[T], keep: &[bool]) -> Vec<T> {
    values
        .iter()
        .zip(keep.iter())
        .filter(|(_, &k)| k)
        .map(|(&v, _)| v)
        .collect()
}

fn missing_column(name: &str) -> ContagioError {
    ContagioError::MissingColumn {
        column: name.to_string(),
        hint: "check panel column names".to_string(),
    }
}
