// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use primitives::LogEntry;
use std::collections::BTreeSet;
use tvm_types::Address;

/// Tracks execution changes for the post-execution process in the runtime,
/// such as generating the receipt, emitting log triggers and deleting
/// self-destructed contracts.
#[derive(Debug, Default)]
pub struct Substate {
    /// Any accounts that have suicided.
    pub suicides: BTreeSet<Address>,
    /// Any logs.
    pub logs: Vec<LogEntry>,
    /// Energy returned by `SSTORE` clearing slots. Recorded only.
    pub sstore_refund: u64,
    /// Created contracts.
    pub contracts_created: Vec<Address>,
}

impl Substate {
    pub fn accrue(&mut self, s: Self) {
        self.suicides.extend(s.suicides);
        self.logs.extend(s.logs);
        self.sstore_refund = self.sstore_refund.saturating_add(s.sstore_refund);
        self.contracts_created.extend(s.contracts_created);
    }

    pub fn new() -> Self { Substate::default() }

    /// Drops everything a failed or reverted execution produced.
    pub fn clear(&mut self) {
        self.suicides.clear();
        self.logs.clear();
        self.sstore_refund = 0;
    }
}
