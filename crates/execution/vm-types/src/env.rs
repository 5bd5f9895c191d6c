// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Environment information for transaction execution.

use primitives::{BlockContext, BlockNumber};
use tvm_types::{Address, H256};

/// Information concerning the execution environment for a
/// message-call/contract-creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    /// The block number.
    pub number: BlockNumber,
    /// The block producer.
    pub author: Address,
    /// The block timestamp in seconds.
    pub timestamp: u64,
    /// The hash of the parent block.
    pub last_hash: H256,
    /// The slot of the block, the clock of resource recovery.
    pub slot: u64,
}

impl From<&BlockContext> for Env {
    fn from(block: &BlockContext) -> Self {
        Env {
            number: block.number,
            author: block.witness,
            timestamp: block.timestamp / 1000,
            last_hash: block.parent_hash,
            slot: block.slot(),
        }
    }
}
