use core::fmt::{self, Write};

use chrono::{DateTime, Utc};

use super::error::{finite, SerError, SerResult, Section};
use crate::config::GeneratorConfig;
use crate::derive::{ConstantValue, DerivedParameters};
use crate::tables::{TableGrid, TableSet};

const SAFETY_WARNING: &str =
    "# SAFETY WARNING: This is a baseline tune. Professional tuning recommended.";

/// Renders the `key=value` rendition.
pub(crate) fn render(
    config: &GeneratorConfig,
    parameters: &DerivedParameters,
    tables: &TableSet,
    now: DateTime<Utc>,
) -> SerResult<String> {
    let mut out = String::new();

    lines(&mut out, Section::Header, |out| {
        writeln!(out, "[MegaSquirt]")?;
        writeln!(out, "signature={}", config.text_signature)?;
        writeln!(out, "fileVersion={}", config.text_file_version)?;
        writeln!(out)
    })?;

    let mut constants = String::from("[Constants]\n");
    for constant in parameters.constants() {
        let value = match &constant.value {
            ConstantValue::Number(value) => {
                finite(Section::Constants, constant.key, *value)?.to_string()
            }
            ConstantValue::List(values) => join_finite(values, Section::Constants, constant.key)?,
        };
        lines(&mut constants, Section::Constants, |out| {
            writeln!(out, "{}={}", constant.key, value)
        })?;
    }
    out.push_str(&constants);
    out.push('\n');

    for grid in tables.iter() {
        render_table(&mut out, grid)?;
    }

    lines(&mut out, Section::Trailer, |out| {
        writeln!(out, "# Generated by {}", config.author)?;
        writeln!(out, "# Generated on: {}", now.format("%Y-%m-%d %H:%M:%S UTC"))?;
        write!(out, "{SAFETY_WARNING}")
    })?;
    Ok(out)
}

fn render_table(out: &mut String, grid: &TableGrid) -> SerResult<()> {
    let section = Section::Table(grid.kind());
    let x_bins = join(grid.rpm_bins());
    let y_bins = join(grid.load_bins());
    let cells: Vec<f64> = grid.row_major().collect();
    let z_bins = join_finite(&cells, section, "zBins")?;
    lines(out, section, |out| {
        writeln!(out, "[{}]", grid.kind().section_name())?;
        writeln!(out, "xBins={x_bins}")?;
        writeln!(out, "yBins={y_bins}")?;
        writeln!(out, "zBins={z_bins}")?;
        writeln!(out)
    })
}

fn lines(
    out: &mut String,
    section: Section,
    body: impl FnOnce(&mut String) -> fmt::Result,
) -> SerResult<()> {
    body(out).map_err(|_| SerError::Format { section })
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn join_finite(values: &[f64], section: Section, field: &'static str) -> SerResult<String> {
    let values = values
        .iter()
        .map(|&value| finite(section, field, value))
        .collect::<SerResult<Vec<_>>>()?;
    Ok(join(&values))
}
