use super::{Projection, LAST_ROW};
use crate::table::{CompletedTable, ROW_LEN};
use tracing::warn;

/// Characters per grid cell
pub const CELL_WIDTH: usize = 5;

/// Column ruler placed under the header
pub fn ruler() -> String {
    let columns: String = (0..ROW_LEN).map(|column| format!("  {column:X}  |")).collect();
    format!("/*{:8}|{columns}{:5}*/", "", "")
}

/// Right-aligns `value` to `CELL_WIDTH`, keeping only the last
/// `CELL_WIDTH` characters of longer values.
pub fn fit_cell(value: &str) -> String {
    let len = value.chars().count();
    if len <= CELL_WIDTH {
        return format!("{value:>width$}", width = CELL_WIDTH);
    }
    warn!(value, "grid cell truncated to {CELL_WIDTH} characters");
    value.chars().skip(len - CELL_WIDTH).collect()
}

/// Renders one projection of `table` as a 16x16 C initializer.
///
/// Row `r`, column `c` holds opcode `r << 4 | c`. Every row but the last
/// ends with a separating comma.
pub fn render_grid(header: &str, table: &CompletedTable, projection: Projection) -> String {
    // Action names sit one column further right than the other projections
    let lead = if projection == Projection::Action { " " } else { "" };

    let mut out = format!("\n{header}\n{}\n", ruler());
    for (row, records) in table.rows() {
        let cells: Vec<String> = records
            .iter()
            .map(|record| fit_cell(&projection.value(record)))
            .collect();
        let separator = if row == LAST_ROW { ' ' } else { ',' };
        out.push_str(&format!(
            "/* {row:X} */ {lead}  {}{separator} /* {row:X} */\n",
            cells.join(",")
        ));
    }
    out.push_str("};\n");
    out
}
