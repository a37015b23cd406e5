//! Recovered conditions reported alongside a generated artifact.
//!
//! None of these stop a run. They are logged at `warn` when they occur and
//! handed to the caller so the documentation step can surface them.

use core::fmt;

use serde::Serialize;

use crate::catalog::FiringOrderSource;
use crate::tables::TableKind;

/// A condition the generator absorbed instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Notice {
    /// A component value was missing and an estimated default was used.
    MissingSpecFallback { field: &'static str, value: f64 },
    /// A profile name was unknown and the default profile was substituted.
    UnknownProfileFallback {
        table: TableKind,
        requested: String,
        substituted: String,
    },
    /// The firing order did not come from an exact family match.
    FiringOrderFallback {
        cylinders: u8,
        family: String,
        source: FiringOrderSource,
    },
    /// A table had the wrong shape; its page was left zero-filled.
    GridShapeMismatch {
        table: TableKind,
        page: usize,
        rows: usize,
        columns: usize,
    },
    /// No table was supplied for a page; the page was left zero-filled.
    GridAbsent { table: TableKind, page: usize },
    /// A page buffer had the wrong length and was replaced with zeros.
    BufferLengthViolation { page: usize, length: usize },
    /// A page set did not hold exactly 16 buffers and was padded or truncated.
    PageCountMismatch { found: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::MissingSpecFallback { field, value } => {
                write!(f, "{field} not specified, using estimated {value}")
            }
            Notice::UnknownProfileFallback {
                table,
                requested,
                substituted,
            } => write!(
                f,
                "unknown {table} profile '{requested}', using '{substituted}'"
            ),
            Notice::FiringOrderFallback {
                cylinders,
                family,
                source,
            } => match source {
                FiringOrderSource::EightCylinderFallback => write!(
                    f,
                    "no firing order for {cylinders} cylinders, using the 8-cylinder default"
                ),
                _ => write!(
                    f,
                    "no firing order for family '{family}', using the {cylinders}-cylinder default"
                ),
            },
            Notice::GridShapeMismatch {
                table,
                page,
                rows,
                columns,
            } => write!(
                f,
                "{table} table is {rows}x{columns}, expected 16x16; page {page} left empty"
            ),
            Notice::GridAbsent { table, page } => {
                write!(f, "{table} table missing; page {page} left empty")
            }
            Notice::BufferLengthViolation { page, length } => write!(
                f,
                "page {page} was {length} bytes, expected 2048; replaced with zeros"
            ),
            Notice::PageCountMismatch { found } => {
                write!(f, "page set held {found} pages, expected 16")
            }
        }
    }
}
