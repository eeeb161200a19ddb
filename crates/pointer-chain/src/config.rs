//! Formatting and resolution options
//!
//! Both option structs deserialize with defaults for every missing field, so a
//! caller can embed them in its own configuration file.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Address width of a 32-bit target, in bytes
pub const ADDRESS_SIZE_32: usize = 4;

/// Address width of a 64-bit target, in bytes
pub const ADDRESS_SIZE_64: usize = 8;

/// How offsets are rendered by the formatter. Not stored on the pointer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum OffsetPrinting {
    /// Negative offsets are shown as `- <magnitude>`
    #[default]
    Signed,
    /// Every offset is shown as `+ <two's complement value>`
    Unsigned,
}

impl OffsetPrinting {
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed)
    }

    pub fn from_signed(signed: bool) -> Self {
        if signed { Self::Signed } else { Self::Unsigned }
    }
}

/// Options for rendering pointers as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub offset_printing: OffsetPrinting,
    /// Width of every hex number in bytes (two digits per byte)
    pub address_size: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            offset_printing: OffsetPrinting::Signed,
            address_size: ADDRESS_SIZE_64,
        }
    }
}

impl FormatOptions {
    pub fn new(offset_printing: OffsetPrinting, address_size: usize) -> Self {
        Self {
            offset_printing,
            address_size,
        }
    }

    pub fn with_offset_printing(mut self, offset_printing: OffsetPrinting) -> Self {
        self.offset_printing = offset_printing;
        self
    }

    pub fn with_address_size(mut self, address_size: usize) -> Self {
        self.address_size = address_size;
        self
    }
}

/// Options for walking a pointer chain through a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Subtracted from every address before it is looked up in the snapshot
    pub starting_offset: u64,
    /// Fail the walk when a normalized address is visited twice
    pub exclude_cycles: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            starting_offset: 0,
            exclude_cycles: true,
        }
    }
}

impl ResolveOptions {
    pub fn new(starting_offset: u64, exclude_cycles: bool) -> Self {
        Self {
            starting_offset,
            exclude_cycles,
        }
    }

    pub fn with_starting_offset(mut self, starting_offset: u64) -> Self {
        self.starting_offset = starting_offset;
        self
    }

    pub fn with_exclude_cycles(mut self, exclude_cycles: bool) -> Self {
        self.exclude_cycles = exclude_cycles;
        self
    }
}
