//! Fuel and ignition table generation.
//!
//! Every generated table is a 16×16 grid laid out as rows of load bins and
//! columns of RPM bins, sharing the canonical axes below so that VE, AFR and
//! spark tables line up cell for cell in the page encoder.
//!
//! | Axis | Unit | Values |
//! |------|------|--------|
//! | RPM (columns) | rev/min | `600, 900, 1200, 1600, 2000, 2400, 2800, 3200, 3600, 4000, 4400, 4800, 5400, 6000, 6600, 7200` |
//! | Load (rows) | kPa | `20, 30, 40, …, 170` |
//!
//! [`TableGrid`] itself accepts any shape so that callers can hand in
//! hand-edited tables; only the page encoder insists on 16×16.

mod curve;
mod generate;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::notice::Notice;

pub use curve::resample;
pub use generate::TableGenerator;

/// Number of bins on each axis.
pub const GRID_SIZE: usize = 16;

/// Canonical RPM axis.
pub const RPM_BINS: [u32; GRID_SIZE] = [
    600, 900, 1200, 1600, 2000, 2400, 2800, 3200, 3600, 4000, 4400, 4800, 5400, 6000, 6600, 7200,
];

/// Canonical load axis (manifold pressure, kPa).
pub const LOAD_BINS: [u32; GRID_SIZE] = [
    20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120, 130, 140, 150, 160, 170,
];

/// The three generated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    /// Volumetric efficiency, percent.
    Ve,
    /// Air/fuel ratio target.
    Afr,
    /// Spark advance, degrees BTDC.
    Spark,
}

impl TableKind {
    /// All kinds in artifact order.
    pub const ALL: [TableKind; 3] = [TableKind::Ve, TableKind::Afr, TableKind::Spark];

    /// Section name used in the text rendition.
    pub const fn section_name(self) -> &'static str {
        match self {
            TableKind::Ve => "VETable1",
            TableKind::Afr => "AFRTable1",
            TableKind::Spark => "SparkTable1",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Ve => write!(f, "VE"),
            TableKind::Afr => write!(f, "AFR"),
            TableKind::Spark => write!(f, "spark"),
        }
    }
}

/// Which profile a table was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUse {
    pub requested: String,
    pub resolved: String,
}

impl ProfileUse {
    pub fn fell_back(&self) -> bool {
        self.requested != self.resolved
    }
}

/// A table of cells indexed `[load row][rpm column]` plus its axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGrid {
    kind: TableKind,
    rpm_bins: Vec<u32>,
    load_bins: Vec<u32>,
    cells: Vec<Vec<f64>>,
    profile: Option<ProfileUse>,
}

impl TableGrid {
    /// Wraps caller-provided cells. Shape is not checked here.
    pub fn new(kind: TableKind, rpm_bins: Vec<u32>, load_bins: Vec<u32>, cells: Vec<Vec<f64>>) -> Self {
        Self {
            kind,
            rpm_bins,
            load_bins,
            cells,
            profile: None,
        }
    }

    /// A canonical-axis table with every cell set to `value`.
    pub fn filled(kind: TableKind, value: f64) -> Self {
        Self::new(
            kind,
            RPM_BINS.to_vec(),
            LOAD_BINS.to_vec(),
            vec![vec![value; GRID_SIZE]; GRID_SIZE],
        )
    }

    pub(crate) fn with_profile(mut self, requested: &str, resolved: &str) -> Self {
        self.profile = Some(ProfileUse {
            requested: requested.to_string(),
            resolved: resolved.to_string(),
        });
        self
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn rpm_bins(&self) -> &[u32] {
        &self.rpm_bins
    }

    pub fn load_bins(&self) -> &[u32] {
        &self.load_bins
    }

    /// Rows of cells, one per load bin.
    pub fn cells(&self) -> &[Vec<f64>] {
        &self.cells
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(row).and_then(|cells| cells.get(column)).copied()
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Column count of the widest row.
    pub fn columns(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// True when the grid is exactly 16×16 with no ragged rows.
    pub fn is_canonical_shape(&self) -> bool {
        self.cells.len() == GRID_SIZE && self.cells.iter().all(|row| row.len() == GRID_SIZE)
    }

    /// Cells in row-major order (load row outer, RPM column inner).
    pub fn row_major(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    pub fn profile(&self) -> Option<&ProfileUse> {
        self.profile.as_ref()
    }

    /// Notice describing a profile substitution, if one happened.
    pub fn fallback_notice(&self) -> Option<Notice> {
        self.profile
            .as_ref()
            .filter(|profile| profile.fell_back())
            .map(|profile| Notice::UnknownProfileFallback {
                table: self.kind,
                requested: profile.requested.clone(),
                substituted: profile.resolved.clone(),
            })
    }
}

/// The VE, AFR and spark tables of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSet {
    pub ve: TableGrid,
    pub afr: TableGrid,
    pub spark: TableGrid,
}

impl TableSet {
    pub fn get(&self, kind: TableKind) -> &TableGrid {
        match kind {
            TableKind::Ve => &self.ve,
            TableKind::Afr => &self.afr,
            TableKind::Spark => &self.spark,
        }
    }

    /// Tables in artifact order.
    pub fn iter(&self) -> impl Iterator<Item = &TableGrid> {
        TableKind::ALL.into_iter().map(move |kind| self.get(kind))
    }

    /// Profile substitutions made while generating the set.
    pub fn notices(&self) -> Vec<Notice> {
        self.iter().filter_map(TableGrid::fallback_notice).collect()
    }
}
