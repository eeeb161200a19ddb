//! # pointer-chain
//!
//! Multi-level memory pointers as used by memory scanning tools.
//!
//! This crate provides:
//! - Parsing of bracketed pointer expressions (`[[0x81234560] + 0x10] - 0x4`)
//! - Resolution of a pointer chain against a memory snapshot, with cycle detection
//! - Rendering of pointers and pointer lists back to text
//!
//! Acquiring snapshots and searching for candidate pointers are left to the caller.

pub mod chain;
pub mod config;
pub mod error;
pub mod pointer;
pub mod prelude;

pub use chain::{FollowMode, Resolution, Snapshot, Unresolved, reaching};
pub use config::{ADDRESS_SIZE_32, ADDRESS_SIZE_64, FormatOptions, OffsetPrinting, ResolveOptions};
pub use error::{Error, Result};
pub use pointer::{Base, MemoryPointer, format_list, parse, parse_list, to_hexadecimal};
