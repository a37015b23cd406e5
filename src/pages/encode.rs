use tracing::{debug, warn};

use super::{LayoutEntry, PageSet, LAYOUT, TABLE_BYTES};
use crate::notice::Notice;
use crate::tables::{TableGrid, TableSet};

/// Page images plus the conditions recovered while building them.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedPages {
    pub pages: PageSet,
    pub notices: Vec<Notice>,
}

/// Writes table grids into their mapped page regions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageEncoder;

impl PageEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encodes grids into a fresh zero-filled page set.
    ///
    /// Grids are matched to the layout by [`TableGrid::kind`]; when several
    /// grids share a kind the first one wins. Mapped tables without a grid,
    /// and grids that are not exactly 16×16, leave their page zero-filled.
    pub fn encode<'g>(&self, grids: impl IntoIterator<Item = &'g TableGrid>) -> EncodedPages {
        self.encode_into(PageSet::zeroed(), grids)
    }

    pub fn encode_tables(&self, tables: &TableSet) -> EncodedPages {
        self.encode(tables.iter())
    }

    /// Encodes grids over caller-supplied pages.
    ///
    /// The set is normalized to 16 × 2048 bytes first. Only the mapped table
    /// regions are overwritten; every other byte is kept.
    pub fn encode_into<'g>(
        &self,
        mut pages: PageSet,
        grids: impl IntoIterator<Item = &'g TableGrid>,
    ) -> EncodedPages {
        let grids: Vec<&TableGrid> = grids.into_iter().collect();
        let mut notices = pages.normalize();

        for entry in &LAYOUT {
            let Some(grid) = grids.iter().copied().find(|grid| grid.kind() == entry.table) else {
                notices.push(Notice::GridAbsent {
                    table: entry.table,
                    page: entry.page,
                });
                continue;
            };
            if !grid.is_canonical_shape() {
                notices.push(Notice::GridShapeMismatch {
                    table: entry.table,
                    page: entry.page,
                    rows: grid.rows(),
                    columns: grid.columns(),
                });
                continue;
            }
            if let Some(page) = pages.page_mut(entry.page) {
                write_table(page.as_mut_bytes(), entry, grid);
                debug!(table = %entry.table, page = entry.page, "encoded table");
            }
        }

        for notice in &notices {
            warn!(%notice, "recovered during page encoding");
        }
        EncodedPages { pages, notices }
    }
}

fn write_table(bytes: &mut [u8], entry: &LayoutEntry, grid: &TableGrid) {
    let region = &mut bytes[entry.offset..entry.offset + TABLE_BYTES];
    for (slot, cell) in region.iter_mut().zip(grid.row_major()) {
        *slot = entry.encode_cell(cell);
    }
}
