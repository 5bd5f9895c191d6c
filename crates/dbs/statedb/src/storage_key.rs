// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use tvm_types::{Address, H256};

const ACCOUNT_PREFIX: u8 = b'a';
const CONTRACT_PREFIX: u8 = b'c';
const CODE_PREFIX: u8 = b'd';
const STORAGE_PREFIX: u8 = b's';
const GLOBAL_PREFIX: u8 = b'g';

/// A typed key of the durable store. Every key starts with a one byte
/// space prefix followed by the address, so that all entries of an address
/// in one space share a common prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey<'a> {
    AccountKey(&'a Address),
    ContractKey(&'a Address),
    CodeKey(&'a Address),
    StorageKey {
        address: &'a Address,
        storage_key: &'a H256,
    },
    /// All storage slots of one contract.
    StorageRootKey(&'a Address),
    GlobalParamKey(&'static [u8]),
}

impl<'a> StorageKey<'a> {
    pub fn new_account_key(address: &'a Address) -> Self {
        StorageKey::AccountKey(address)
    }

    pub fn new_contract_key(address: &'a Address) -> Self {
        StorageKey::ContractKey(address)
    }

    pub fn new_code_key(address: &'a Address) -> Self {
        StorageKey::CodeKey(address)
    }

    pub fn new_storage_key(
        address: &'a Address, storage_key: &'a H256,
    ) -> Self {
        StorageKey::StorageKey {
            address,
            storage_key,
        }
    }

    pub fn new_storage_root_key(address: &'a Address) -> Self {
        StorageKey::StorageRootKey(address)
    }

    pub fn to_key_bytes(&self) -> Vec<u8> {
        let with_address = |prefix: u8, address: &Address| {
            let mut key = Vec::with_capacity(1 + Address::len_bytes());
            key.push(prefix);
            key.extend_from_slice(address.as_bytes());
            key
        };
        match self {
            StorageKey::AccountKey(address) => {
                with_address(ACCOUNT_PREFIX, address)
            }
            StorageKey::ContractKey(address) => {
                with_address(CONTRACT_PREFIX, address)
            }
            StorageKey::CodeKey(address) => with_address(CODE_PREFIX, address),
            StorageKey::StorageKey {
                address,
                storage_key,
            } => {
                let mut key = with_address(STORAGE_PREFIX, address);
                key.extend_from_slice(storage_key.as_bytes());
                key
            }
            StorageKey::StorageRootKey(address) => {
                with_address(STORAGE_PREFIX, address)
            }
            StorageKey::GlobalParamKey(name) => {
                let mut key = vec![GLOBAL_PREFIX];
                key.extend_from_slice(name);
                key
            }
        }
    }
}
