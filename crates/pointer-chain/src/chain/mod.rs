//! Pointer chain resolution.
//!
//! A chain is walked through a [`Snapshot`] owned by the caller. Failure to
//! resolve is an ordinary [`Resolution::Unresolved`] value, so callers scanning
//! many candidates can move on without error handling.

#[cfg(test)]
pub mod mock;
mod resolver;
mod snapshot;

pub use resolver::{FollowMode, Resolution, Unresolved, reaching};
pub use snapshot::Snapshot;

#[cfg(test)]
pub use mock::MockSnapshotBuilder;
