//! Snapshot builder for tests

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MockSnapshotBuilder {
    values: HashMap<u64, u64>,
}

impl MockSnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` at `address`
    pub fn value(mut self, address: u64, value: u64) -> Self {
        self.values.insert(address, value);
        self
    }

    /// Lay out a chain: `base` holds `links[0]`, `links[0] + offsets[0]` holds
    /// `links[1]`, and so on
    pub fn chain(mut self, base: u64, links: &[u64], offsets: &[i64]) -> Self {
        let mut address = base;
        for (index, &link) in links.iter().enumerate() {
            self.values.insert(address, link);
            if let Some(&offset) = offsets.get(index) {
                address = link.wrapping_add_signed(offset);
            }
        }
        self
    }

    pub fn build(self) -> HashMap<u64, u64> {
        self.values
    }
}
