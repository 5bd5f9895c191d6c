// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{CallFrameArena, CallStackInfo};
use crate::state::State;
use tvm_types::{cal_contract_address, Address, CreateContractAddressType, H256};

/// Derives the addresses of contracts created by `CREATE` inside one
/// transaction.
#[derive(Debug, Clone)]
pub struct CreateNonce {
    root_transaction_id: H256,
    nonce: u64,
}

impl CreateNonce {
    pub fn new(root_transaction_id: H256) -> Self {
        CreateNonce {
            root_transaction_id,
            nonce: 0,
        }
    }

    pub fn next_address(&mut self) -> Address {
        let address = cal_contract_address(
            CreateContractAddressType::FromRootTransactionAndNonce {
                root_transaction_id: self.root_transaction_id,
                nonce: self.nonce,
            },
        );
        self.nonce += 1;
        address
    }
}

/// The global resources and utilities shared across all frames.
pub struct RuntimeRes<'a> {
    /// The ledger state including information such as the balance of each
    /// account.
    pub state: &'a mut State,

    /// Metadata about the frame call stack.
    pub callstack: &'a mut CallStackInfo,

    /// The call tree recorded for the result.
    pub internal_txs: &'a mut CallFrameArena,

    pub create_nonce: &'a mut CreateNonce,
}

#[cfg(test)]
pub mod runtime_res_test {
    use super::{CreateNonce, RuntimeRes, State};
    use crate::stack::{CallFrameArena, CallStackInfo};
    use tvm_types::H256;

    pub struct OwnedRuntimeRes<'a> {
        state: &'a mut State,
        callstack: CallStackInfo,
        pub internal_txs: CallFrameArena,
        create_nonce: CreateNonce,
    }

    impl<'a> From<&'a mut State> for OwnedRuntimeRes<'a> {
        fn from(state: &'a mut State) -> Self {
            OwnedRuntimeRes {
                state,
                callstack: CallStackInfo::new(),
                internal_txs: CallFrameArena::new(),
                create_nonce: CreateNonce::new(H256::zero()),
            }
        }
    }

    impl<'a> OwnedRuntimeRes<'a> {
        pub fn as_res<'b>(&'b mut self) -> RuntimeRes<'b> {
            RuntimeRes {
                state: &mut *self.state,
                callstack: &mut self.callstack,
                internal_txs: &mut self.internal_txs,
                create_nonce: &mut self.create_nonce,
            }
        }
    }
}
