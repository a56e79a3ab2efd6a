//! Cell normalization: raw text cells become typed values.

use empirica_model::Table;

/// Normalize every cell in place.
///
/// Text cells are re-coerced (blank → missing, numeric text → number,
/// date text → date); typed cells are left alone, so the pass is idempotent.
pub fn normalize_table(table: &mut Table) {
    let mut converted = 0usize;
    table.for_each_cell_mut(|cell| {
        if cell.as_text().is_some() {
            let value = std::mem::take(cell).normalize();
            if value.as_text().is_none() {
                converted += 1;
            }
            *cell = value;
        }
    });
    tracing::debug!(converted, "normalized text cells");
}

/// Owned variant of [`normalize_table`].
#[must_use]
pub fn normalized(mut table: Table) -> Table {
    normalize_table(&mut table);
    table
}
