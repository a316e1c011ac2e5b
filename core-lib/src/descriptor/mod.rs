//! Descriptor grammar.
//!
//! One instruction encoding per line:
//!
//! ```text
//! ; comment
//! lda     immm    2   $a9
//! ```
//!
//! Fields are `ACTION MODE CYCLES $HEX`, separated by any run of
//! whitespace. Blank lines and lines whose first non-blank character is
//! `;` are skipped before the grammar sees them, so an indented comment is
//! still a comment rather than a malformed line.
use crate::error::{FormatError, FormatFault};
use crate::mode::{AddressingMode, UnknownMode};

pub const COMMENT_MARKER: char = ';';

/// Action given to opcodes no descriptor claims
pub const NOP_ACTION: &str = "nop";
pub const NOP_CYCLES: u8 = 1;

/// One instruction encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeRecord {
    pub opcode: u8,
    /// Operation name, kept verbatim (also the emulator's handler name)
    pub action: String,
    pub mode: AddressingMode,
    /// Base machine cycles
    pub cycles: u8,
}

impl OpcodeRecord {
    pub fn new(opcode: u8, action: impl Into<String>, mode: AddressingMode, cycles: u8) -> Self {
        Self {
            opcode,
            action: action.into(),
            mode,
            cycles,
        }
    }

    /// Gap-fill record: `nop`, implied, one cycle
    pub fn nop(opcode: u8) -> Self {
        Self::new(opcode, NOP_ACTION, AddressingMode::Implied, NOP_CYCLES)
    }
}

/// True for lines the grammar should see (not blank, not a comment)
pub fn is_admissible(line: &str) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with(COMMENT_MARKER)
}

/// Admissible lines of `source` with their 1-based line numbers
pub fn admissible_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| is_admissible(line))
        .map(|(index, line)| (index + 1, line))
}

/// Parses one admissible descriptor line.
///
/// Either every field is valid and a record is returned, or the whole line
/// is rejected; nothing is half-parsed.
pub fn parse_record(line: &str) -> Result<OpcodeRecord, FormatError> {
    parse_fields(line).map_err(|fault| FormatError {
        line: line.to_owned(),
        fault,
    })
}

fn parse_fields(line: &str) -> Result<OpcodeRecord, FormatFault> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let count = fields.len();
    let [action, mode, cycles, opcode]: [&str; 4] = fields
        .try_into()
        .map_err(|_| FormatFault::FieldCount(count))?;

    Ok(OpcodeRecord {
        action: parse_action(action)?.to_owned(),
        mode: parse_mode(mode)?,
        cycles: parse_cycles(cycles)?,
        opcode: parse_opcode(opcode)?,
    })
}

fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn parse_action(token: &str) -> Result<&str, FormatFault> {
    if is_word(token) {
        Ok(token)
    } else {
        Err(FormatFault::Action)
    }
}

fn parse_mode(token: &str) -> Result<AddressingMode, FormatFault> {
    token
        .parse()
        .map_err(|UnknownMode(token)| FormatFault::UnknownMode(token))
}

fn parse_cycles(token: &str) -> Result<u8, FormatFault> {
    match token.as_bytes() {
        [digit @ b'0'..=b'9'] => Ok(digit - b'0'),
        _ => Err(FormatFault::Cycles),
    }
}

fn parse_opcode(token: &str) -> Result<u8, FormatFault> {
    let digits = token.strip_prefix('$').ok_or(FormatFault::Opcode)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FormatFault::Opcode);
    }
    u8::from_str_radix(digits, 16).map_err(|_| FormatFault::Opcode)
}
