// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use tvm_parameters::energy::BLOCK_PRODUCED_INTERVAL_MS;
use tvm_types::{Address, H256};

pub type BlockNumber = u64;

/// The block enclosing a transaction under execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockContext {
    pub number: BlockNumber,
    /// Block timestamp in milliseconds.
    pub timestamp: u64,
    pub witness: Address,
    pub parent_hash: H256,
    /// The block is being produced by this node.
    pub generated_by_myself: bool,
    /// The producer has already signed the block.
    pub has_witness_signature: bool,
}

impl BlockContext {
    /// The slot the block belongs to, used as the clock of resource
    /// recovery.
    pub fn slot(&self) -> u64 { self.timestamp / BLOCK_PRODUCED_INTERVAL_MS }

    /// True if this node is producing the block and has not signed it yet.
    pub fn is_producing(&self) -> bool {
        self.generated_by_myself && !self.has_witness_signature
    }
}
