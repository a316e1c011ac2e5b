//! CPU variants and the end-to-end generation pipeline.
use crate::emit::{render_grid, render_mnemonics, Projection};
use crate::error::TableError;
use crate::mode::FormatRegistry;
use crate::store::DescriptorStore;
use crate::table::{CompletedTable, OpcodeTable};
use std::fmt;
use tracing::{info, instrument};

/// Descriptor source every variant starts from
pub const BASE_SOURCE: &str = "6502.opcodes";

/// First line of both generated artifacts
pub const PROVENANCE: &str = "/* Generated by optablegen */";

/// Supported CPU variants, each the base set plus one extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuVariant {
    Wdc65C02,
    Wdc65C816,
}

impl CpuVariant {
    pub const ALL: [Self; 2] = [Self::Wdc65C02, Self::Wdc65C816];

    /// Suffix of the generated C identifiers
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Wdc65C02 => "c02",
            Self::Wdc65C816 => "c816",
        }
    }

    pub const fn extension_source(self) -> &'static str {
        match self {
            Self::Wdc65C02 => "65c02.opcodes",
            Self::Wdc65C816 => "65c816.opcodes",
        }
    }

    pub fn grid_header(self, projection: Projection) -> String {
        let suffix = self.suffix();
        match projection {
            Projection::AddressingMode => format!("static void (*addrtable_{suffix}[256])() = {{"),
            Projection::Action => format!("static void (*optable_{suffix}[256])() = {{"),
            Projection::Cycles => format!("static const uint32_t ticktable_{suffix}[256] = {{"),
        }
    }

    pub fn mnemonic_header(self) -> String {
        format!("static const char *mnemonics_{}[256] = {{", self.suffix())
    }

    /// Merges the base source and this variant's extension into a fresh
    /// table, then fills the gaps.
    #[instrument(skip(store), fields(store = %store.describe()), level = "debug")]
    pub fn build_table(self, store: &dyn DescriptorStore) -> Result<CompletedTable, TableError> {
        let mut table = OpcodeTable::new(self.to_string());
        for source in [BASE_SOURCE, self.extension_source()] {
            let text = store.load(source)?;
            table.merge_source(source, &text)?;
        }
        info!(variant = %self, defined = table.occupied(), "opcode table built");
        Ok(table.fill_defaults())
    }
}

impl fmt::Display for CpuVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wdc65C02 => f.write_str("65C02"),
            Self::Wdc65C816 => f.write_str("65C816"),
        }
    }
}

/// The two generated files, fully rendered in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Dispatch grids (`tables.h`)
    pub tables: String,
    /// Disassembly strings (`mnemonics.h`)
    pub mnemonics: String,
}

impl Artifacts {
    pub const TABLES_FILE: &'static str = "tables.h";
    pub const MNEMONICS_FILE: &'static str = "mnemonics.h";
}

/// Builds every variant's table and renders both artifacts.
///
/// Nothing is returned unless every source parses and merges cleanly.
#[instrument(skip_all, fields(store = %store.describe()))]
pub fn generate(store: &dyn DescriptorStore) -> Result<Artifacts, TableError> {
    let tables = CpuVariant::ALL
        .iter()
        .map(|&variant| variant.build_table(store).map(|table| (variant, table)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut dispatch = format!("{PROVENANCE}\n");
    for projection in Projection::ALL {
        for (variant, table) in &tables {
            dispatch.push_str(&render_grid(
                &variant.grid_header(projection),
                table,
                projection,
            ));
        }
    }

    let registry = FormatRegistry::standard();
    let mut mnemonics = format!("{PROVENANCE}\n");
    for (variant, table) in &tables {
        mnemonics.push_str(&render_mnemonics(
            &variant.mnemonic_header(),
            table,
            &registry,
        )?);
    }

    info!(variants = tables.len(), "artifacts rendered");
    Ok(Artifacts {
        tables: dispatch,
        mnemonics,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mode::AddressingMode;
    use crate::store::BundledDescriptors;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(CpuVariant::Wdc65C02, Projection::AddressingMode, "static void (*addrtable_c02[256])() = {")]
    #[test_case(CpuVariant::Wdc65C816, Projection::Action, "static void (*optable_c816[256])() = {")]
    #[test_case(CpuVariant::Wdc65C02, Projection::Cycles, "static const uint32_t ticktable_c02[256] = {")]
    fn test_grid_headers(variant: CpuVariant, projection: Projection, expected: &str) {
        assert_eq!(variant.grid_header(projection), expected);
    }

    #[test]
    fn test_mnemonic_header() {
        assert_eq!(
            CpuVariant::Wdc65C816.mnemonic_header(),
            "static const char *mnemonics_c816[256] = {"
        );
    }

    #[test]
    fn test_variants_differ_where_extensions_differ() {
        let c02 = CpuVariant::Wdc65C02.build_table(&BundledDescriptors).unwrap();
        let c816 = CpuVariant::Wdc65C816.build_table(&BundledDescriptors).unwrap();

        assert_eq!(c02[0x0F].action, "bbr0");
        assert_eq!(c02[0x0F].mode, AddressingMode::ZeroPageRelative);
        assert_eq!(c816[0x0F].action, "ora");
        assert_eq!(c816[0x0F].mode, AddressingMode::AbsoluteLong);

        // Shared base opcodes agree
        assert_eq!(c02[0xA9], c816[0xA9]);
    }

    #[test]
    fn test_artifacts_start_with_provenance() {
        let artifacts = generate(&BundledDescriptors).unwrap();
        assert!(artifacts.tables.starts_with("/* Generated by optablegen */\n\n"));
        assert!(artifacts.mnemonics.starts_with("/* Generated by optablegen */\n\n"));
    }
}
