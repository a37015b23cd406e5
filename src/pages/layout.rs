use crate::tables::{TableKind, GRID_SIZE};

/// Bytes occupied by one mapped table.
pub const TABLE_BYTES: usize = GRID_SIZE * GRID_SIZE;

/// Where a table lives in the page set and how its cells are scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry {
    pub table: TableKind,
    /// Zero-based page index.
    pub page: usize,
    pub offset: usize,
    pub scale: f64,
}

impl LayoutEntry {
    /// Converts a cell value to its stored byte, saturating at both ends.
    pub fn encode_cell(&self, value: f64) -> u8 {
        // `as` saturates and maps NaN to zero.
        (value * self.scale).round().clamp(0.0, 255.0) as u8
    }

    pub fn decode_cell(&self, byte: u8) -> f64 {
        f64::from(byte) / self.scale
    }
}

/// MS2/Extra 3.4.x table map.
pub const LAYOUT: [LayoutEntry; 3] = [
    LayoutEntry {
        table: TableKind::Ve,
        page: 3,
        offset: 0x0000,
        scale: 1.0,
    },
    LayoutEntry {
        table: TableKind::Afr,
        page: 9,
        offset: 0x0000,
        scale: 10.0,
    },
    LayoutEntry {
        table: TableKind::Spark,
        page: 11,
        offset: 0x0000,
        scale: 1.0,
    },
];

pub fn layout_for(table: TableKind) -> &'static LayoutEntry {
    match table {
        TableKind::Ve => &LAYOUT[0],
        TableKind::Afr => &LAYOUT[1],
        TableKind::Spark => &LAYOUT[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn afr_cells_saturate() {
        let afr = layout_for(TableKind::Afr);
        assert_eq!(afr.encode_cell(14.7), 147);
        assert_eq!(afr.encode_cell(26.0), 255);
        assert_eq!(afr.encode_cell(-3.0), 0);
        assert_eq!(afr.encode_cell(f64::NAN), 0);
    }

    #[test]
    fn mapped_regions_fit_in_a_page() {
        for entry in LAYOUT {
            assert!(entry.offset + TABLE_BYTES <= crate::pages::PAGE_SIZE);
        }
    }
}
