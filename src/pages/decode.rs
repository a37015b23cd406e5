use super::{ByteReader, LayoutEntry, PageBuffer, PageSet, LAYOUT};
use crate::artifact::{SerError, SerResult, Section};
use crate::tables::{TableGrid, TableSet, GRID_SIZE, LOAD_BINS, RPM_BINS};

/// Reads a mapped table back out of its page, undoing the scale.
///
/// Values come back quantised to the stored resolution, so a decoded cell is
/// within half a unit (`0.5 / scale`) of the clamped original.
pub fn decode_table(page: &PageBuffer, entry: &LayoutEntry) -> SerResult<TableGrid> {
    let section = Section::Page(entry.page);
    let mut reader = ByteReader::at(page.as_bytes(), entry.offset);
    let mut cells = Vec::with_capacity(GRID_SIZE);
    for _ in 0..GRID_SIZE {
        let row = reader.read_array::<GRID_SIZE>(section, "table row")?;
        cells.push(row.iter().map(|&byte| entry.decode_cell(byte)).collect());
    }
    Ok(TableGrid::new(
        entry.table,
        RPM_BINS.to_vec(),
        LOAD_BINS.to_vec(),
        cells,
    ))
}

/// Decodes all three mapped tables from a page set.
pub fn decode_page_set(pages: &PageSet) -> SerResult<TableSet> {
    let decode = |entry: &LayoutEntry| -> SerResult<TableGrid> {
        let page = pages
            .page(entry.page)
            .ok_or_else(|| SerError::unexpected_end(Section::Page(entry.page), "page"))?;
        decode_table(page, entry)
    };
    Ok(TableSet {
        ve: decode(&LAYOUT[0])?,
        afr: decode(&LAYOUT[1])?,
        spark: decode(&LAYOUT[2])?,
    })
}
