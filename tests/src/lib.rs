//! Reference suite for the bundled descriptor sources.
//!
//! The recorded opcode map (`fixtures/mnemonics_c816.txt`) holds the
//! disassembly string of every 65C816 opcode, one quoted string per line in
//! opcode order. Each test regenerates the table from the bundled sources
//! and compares one or more entries against it.
//!
//! Run with `cargo test -p optable-suite`.

use std::sync::Once;

use anyhow::{bail, Context, Result};
use optable_core::{
    emit::render_mnemonic, BundledDescriptors, CpuVariant, FormatRegistry, TableError, TABLE_SIZE,
};
use thiserror::Error;
use tracing::{debug, info};

const REFERENCE_MAP: &str = include_str!("../fixtures/mnemonics_c816.txt");

static TRACING_INIT: Once = Once::new();

/// Initialise tracing once per test binary
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("reference line {line_no} is not a quoted string: `{line}`")]
    Unquoted { line_no: usize, line: String },
    #[error("reference map has {0} entries, expected 256")]
    EntryCount(usize),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Parses the recorded 65C816 map into 256 unquoted strings.
pub fn reference_map() -> Result<Vec<String>, SuiteError> {
    let entries = REFERENCE_MAP
        .lines()
        .enumerate()
        .map(|(index, line)| {
            line.strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .map(str::to_owned)
                .ok_or_else(|| SuiteError::Unquoted {
                    line_no: index + 1,
                    line: line.to_owned(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if entries.len() != TABLE_SIZE {
        return Err(SuiteError::EntryCount(entries.len()));
    }
    Ok(entries)
}

/// Disassembly strings of `variant`, built from the bundled sources.
pub fn generated_map(variant: CpuVariant) -> Result<Vec<String>, SuiteError> {
    let table = variant.build_table(&BundledDescriptors)?;
    let registry = FormatRegistry::standard();
    let entries = table
        .records()
        .iter()
        .map(|record| render_mnemonic(record, &registry))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(%variant, entries = entries.len(), "generated mnemonic map");
    Ok(entries)
}

/// Compares one opcode of the bundled 65C816 table against the reference.
pub fn run_check(opcode: u8) -> Result<()> {
    info!("Checking opcode ${:02X}", opcode);
    let reference = reference_map().context("Failed to load reference map")?;
    let generated =
        generated_map(CpuVariant::Wdc65C816).context("Failed to build 65C816 table")?;
    let index = usize::from(opcode);
    if reference[index] != generated[index] {
        bail!(
            "opcode ${:02X}: expected \"{}\", generated \"{}\"",
            opcode,
            reference[index],
            generated[index]
        );
    }
    Ok(())
}

#[cfg(test)]
mod opcode_map;
