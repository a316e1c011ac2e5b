//! Opcode descriptor compiler for 65xx CPU cores.
//!
//! Descriptor sources are merged per CPU variant into a 256-slot table,
//! gaps are filled with `nop`, and the completed tables are rendered as
//! C dispatch grids and a disassembly mnemonic list.
pub mod descriptor;
pub mod emit;
pub mod error;
pub mod mode;
pub mod store;
pub mod table;
pub mod variant;

// Re-export common types
pub use descriptor::{parse_record, OpcodeRecord};
pub use emit::{render_grid, render_mnemonics, Projection};
pub use error::{FormatError, FormatFault, TableError};
pub use mode::{AddressingMode, AddressingModeFormat, FormatRegistry, OperandSize};
pub use store::{BundledDescriptors, DescriptorStore, DirectoryDescriptors};
pub use table::{CompletedTable, OpcodeTable, TABLE_SIZE};
pub use variant::{generate, Artifacts, CpuVariant};
