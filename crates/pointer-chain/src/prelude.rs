//! Prelude module for convenient imports
//!
//! ```ignore
//! use pointer_chain::prelude::*;
//! ```

// Data model
pub use crate::pointer::{Base, MemoryPointer};

// Resolution
pub use crate::chain::{FollowMode, Resolution, Snapshot, Unresolved};

// Options
pub use crate::config::{FormatOptions, OffsetPrinting, ResolveOptions};

// Error handling
pub use crate::error::{Error, Result};
