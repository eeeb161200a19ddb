//! Pointer chain resolution against a snapshot

use std::fmt;

use tracing::trace;

use super::Snapshot;
use crate::config::ResolveOptions;
use crate::pointer::MemoryPointer;

/// Why a chain did not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unresolved {
    /// The base address is not mapped in the snapshot
    BaseNotMapped,
    /// The address reached after `depth` offsets is not mapped
    BrokenLink { depth: usize },
    /// The address reached after `depth` offsets was already visited
    Cycle { depth: usize },
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseNotMapped => write!(f, "base address not mapped"),
            Self::BrokenLink { depth } => write!(f, "broken link after {} offsets", depth),
            Self::Cycle { depth } => write!(f, "cycle after {} offsets", depth),
        }
    }
}

/// Outcome of following a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Resolved(u64),
    Unresolved(Unresolved),
}

impl Resolution {
    pub fn address(self) -> Option<u64> {
        match self {
            Self::Resolved(address) => Some(address),
            Self::Unresolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn reaches(&self, target: u64) -> bool {
        matches!(self, Self::Resolved(address) if *address == target)
    }
}

impl From<Resolution> for Option<u64> {
    fn from(resolution: Resolution) -> Self {
        resolution.address()
    }
}

/// What the walk returns once the offsets are exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FollowMode {
    /// The address produced by applying the last offset
    #[default]
    Address,
    /// The value stored before the last offset is applied
    RawValue,
}

impl MemoryPointer {
    /// Walk the chain through `snapshot`.
    ///
    /// Every lookup uses `address - starting_offset`. With no offsets the
    /// normalized base address is returned; otherwise the final address is
    /// returned as computed, without normalization.
    pub fn follow_chain<S: Snapshot + ?Sized>(
        &self,
        snapshot: &S,
        options: &ResolveOptions,
        mode: FollowMode,
    ) -> Resolution {
        let start = options.starting_offset;
        let offsets = self.offsets();

        let mut current = self.base_address().wrapping_sub(start);
        let Some(mut value) = snapshot.value_at(current) else {
            return self.unresolved(Unresolved::BaseNotMapped);
        };

        // Chains are a few levels deep; a linear scan beats hashing here
        let mut visited = Vec::with_capacity(offsets.len() + 1);
        visited.push(current);

        let last = offsets.len().saturating_sub(1);
        for (index, &offset) in offsets.iter().enumerate() {
            if mode == FollowMode::RawValue && index == last {
                return Resolution::Resolved(value);
            }

            let next = value.wrapping_add_signed(offset);
            let normalized = next.wrapping_sub(start);
            if visited.contains(&normalized) {
                if options.exclude_cycles {
                    return self.unresolved(Unresolved::Cycle { depth: index + 1 });
                }
            } else {
                visited.push(normalized);
            }

            if index == last {
                current = next;
                break;
            }

            current = normalized;
            value = match snapshot.value_at(current) {
                Some(value) => value,
                None => return self.unresolved(Unresolved::BrokenLink { depth: index + 1 }),
            };
        }

        Resolution::Resolved(current)
    }

    /// Check whether the chain resolves to exactly `target_address`
    pub fn reaches_destination<S: Snapshot + ?Sized>(
        &self,
        snapshot: &S,
        target_address: u64,
        options: &ResolveOptions,
    ) -> bool {
        self.follow_chain(snapshot, options, FollowMode::Address)
            .reaches(target_address)
    }

    fn unresolved(&self, reason: Unresolved) -> Resolution {
        trace!(
            "Pointer chain from {:#x} ({} offsets) unresolved: {}",
            self.base_address(),
            self.depth(),
            reason
        );
        Resolution::Unresolved(reason)
    }
}

/// Candidates from `pointers` that reach `target_address`, in input order
pub fn reaching<'a, S: Snapshot + ?Sized>(
    pointers: &'a [MemoryPointer],
    snapshot: &'a S,
    target_address: u64,
    options: ResolveOptions,
) -> impl Iterator<Item = &'a MemoryPointer> {
    pointers
        .iter()
        .filter(move |pointer| pointer.reaches_destination(snapshot, target_address, &options))
}
