//! Structured memory pointers.
//!
//! A pointer is a base address plus an ordered list of signed offsets:
//!
//! - **Base**: an absolute address, or a module name together with the absolute
//!   address it resolved to when the expression was written
//! - **Offsets**: applied outermost first; each one is added to the value read
//!   at the current address
//!
//! ## Text form
//!
//! ```text
//! [[0x81234560] + 0x10] - 0x4
//! [[Module.so+0x40 (=0x81234560)] + 0x10] + 0x8
//! ```

mod format;
mod parser;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ADDRESS_SIZE_64;
use crate::error::Error;

pub use format::{format_list, to_hexadecimal};
pub use parser::{parse, parse_list};

/// Starting address of a pointer chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base {
    Absolute(u64),
    ModuleRelative {
        /// Module expression as written, e.g. `Module.so+0x40`
        name: String,
        resolved: u64,
    },
}

impl Base {
    /// Absolute address the chain starts at
    pub fn address(&self) -> u64 {
        match self {
            Self::Absolute(address) => *address,
            Self::ModuleRelative { resolved, .. } => *resolved,
        }
    }

    pub fn module_name(&self) -> Option<&str> {
        match self {
            Self::Absolute(_) => None,
            Self::ModuleRelative { name, .. } => Some(name),
        }
    }
}

/// Multi-level pointer: a base followed by the offsets of each dereference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryPointer {
    base: Base,
    offsets: Vec<i64>,
}

impl MemoryPointer {
    pub fn new(base: Base, offsets: Vec<i64>) -> Self {
        Self { base, offsets }
    }

    pub fn absolute(base_address: u64, offsets: Vec<i64>) -> Self {
        Self::new(Base::Absolute(base_address), offsets)
    }

    pub fn module_relative(name: impl Into<String>, resolved: u64, offsets: Vec<i64>) -> Self {
        Self::new(
            Base::ModuleRelative {
                name: name.into(),
                resolved,
            },
            offsets,
        )
    }

    /// Append one more dereference level
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offsets.push(offset);
        self
    }

    pub fn base(&self) -> &Base {
        &self.base
    }

    pub fn base_address(&self) -> u64 {
        self.base.address()
    }

    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    /// Number of dereference levels
    pub fn depth(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_module_relative(&self) -> bool {
        matches!(self.base, Base::ModuleRelative { .. })
    }
}

impl fmt::Display for MemoryPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(true, ADDRESS_SIZE_64))
    }
}

impl FromStr for MemoryPointer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
