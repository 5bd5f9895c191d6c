// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{Address, H256};
use keccak_hash::keccak;

/// Specifies how an address is calculated for a new contract.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum CreateContractAddressType {
    /// Address of a contract deployed by a top-level transaction, calculated
    /// from the raw transaction bytes and the owner address.
    FromRawTransactionAndOwner {
        raw_transaction: Vec<u8>,
        owner: Address,
    },
    /// Address of a contract deployed by the `CREATE` instruction, calculated
    /// from the root transaction id and a per-transaction nonce.
    FromRootTransactionAndNonce { root_transaction_id: H256, nonce: u64 },
}

/// Calculate new contract address: the hash of the concatenated seed,
/// truncated to the address width.
pub fn cal_contract_address(
    address_scheme: CreateContractAddressType,
) -> Address {
    let buffer = match address_scheme {
        CreateContractAddressType::FromRawTransactionAndOwner {
            mut raw_transaction,
            owner,
        } => {
            raw_transaction.extend_from_slice(owner.as_bytes());
            raw_transaction
        }
        CreateContractAddressType::FromRootTransactionAndNonce {
            root_transaction_id,
            nonce,
        } => {
            let mut buffer = root_transaction_id.as_bytes().to_vec();
            buffer.extend_from_slice(&nonce.to_be_bytes());
            buffer
        }
    };
    Address::from(keccak(&buffer))
}
