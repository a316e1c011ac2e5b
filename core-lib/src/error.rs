use crate::mode::AddressingMode;
use thiserror::Error;

/// Why a descriptor line was rejected by the grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatFault {
    /// Expected `ACTION MODE CYCLES $HEX`, got this many fields
    FieldCount(usize),
    /// Action is not a bare word
    Action,
    /// Mode token is not a known addressing mode
    UnknownMode(String),
    /// Cycle count is not a single decimal digit
    Cycles,
    /// Opcode is not `$` followed by hex digits in 0..=0xFF
    Opcode,
}

impl std::fmt::Display for FormatFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected 4 fields, found {n}"),
            Self::Action => f.write_str("action must be a bare word"),
            Self::UnknownMode(token) => write!(f, "unknown addressing mode `{token}`"),
            Self::Cycles => f.write_str("cycle count must be a single decimal digit"),
            Self::Opcode => f.write_str("opcode must be `$` followed by hex in 00..ff"),
        }
    }
}

/// A descriptor line that does not match the grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed descriptor line `{line}`: {fault}")]
pub struct FormatError {
    /// The raw offending line
    pub line: String,
    pub fault: FormatFault,
}

/// Errors that abort table generation
#[derive(Debug, Error)]
pub enum TableError {
    #[error("{source_name}:{line_no}: {error}")]
    Format {
        source_name: String,
        line_no: usize,
        #[source]
        error: FormatError,
    },
    #[error("duplicate opcode ${opcode:02x}: claimed by {first}, redefined by {second}")]
    DuplicateOpcode {
        opcode: u8,
        first: String,
        second: String,
    },
    #[error("no registry entry for addressing mode `{mode}` (opcode ${opcode:02x})")]
    Configuration { mode: AddressingMode, opcode: u8 },
    #[error("cannot read descriptor source {name}")]
    Source {
        name: String,
        #[source]
        error: std::io::Error,
    },
}
