use super::LAST_ROW;
use crate::descriptor::OpcodeRecord;
use crate::error::TableError;
use crate::mode::FormatRegistry;
use crate::table::{CompletedTable, ROW_LEN};

/// `"<action> <template>"`; the template is left unevaluated for the
/// disassembler to fill in.
pub fn render_mnemonic(
    record: &OpcodeRecord,
    registry: &FormatRegistry,
) -> Result<String, TableError> {
    let format = registry.resolve(record.mode, record.opcode)?;
    Ok(format!("{} {}", record.action, format.template))
}

/// Renders the disassembly strings of `table` as a quoted C list, with a
/// `// $RX` marker opening each row of 16.
pub fn render_mnemonics(
    header: &str,
    table: &CompletedTable,
    registry: &FormatRegistry,
) -> Result<String, TableError> {
    let mut out = format!("\n{header}\n");
    for (row, records) in table.rows() {
        out.push_str(&format!("\t// ${row:X}X\n"));
        for (column, record) in records.iter().enumerate() {
            let last = row == LAST_ROW && column == ROW_LEN - 1;
            out.push_str(&format!(
                "\t/* ${row:X}{column:X} */ \"{}\"{}",
                render_mnemonic(record, registry)?,
                if last { "" } else { ",\n" }
            ));
        }
        if row != LAST_ROW {
            out.push('\n');
        }
    }
    out.push_str("};\n");
    Ok(out)
}
