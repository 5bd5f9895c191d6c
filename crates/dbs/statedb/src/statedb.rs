// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{global_params::GlobalParamKey, Result, StorageKey};
use primitives::{Account, Bytes, SmartContract};
use rlp::{Decodable, Encodable};
use std::sync::Arc;
use tvm_types::{Address, H256, U256};

/// A raw key-value backend of the durable store.
pub trait StorageTrait: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Box<[u8]>>>;

    fn set(&self, key: &[u8], value: Box<[u8]>) -> Result<()>;

    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Deletes every entry under `prefix`, returning how many were removed.
    fn delete_all(&self, prefix: &[u8]) -> Result<usize>;
}

/// Typed access to the durable store. Values are RLP encoded.
#[derive(Clone)]
pub struct StateDb {
    storage: Arc<dyn StorageTrait>,
}

impl StateDb {
    pub fn new(storage: Arc<dyn StorageTrait>) -> Self { StateDb { storage } }

    pub fn get<T>(&self, key: StorageKey) -> Result<Option<T>>
    where T: Decodable {
        match self.storage.get(&key.to_key_bytes())? {
            None => Ok(None),
            Some(raw) => Ok(Some(rlp::decode::<T>(&raw[..])?)),
        }
    }

    pub fn set<T>(&self, key: StorageKey, value: &T) -> Result<()>
    where T: Encodable {
        trace!("set key={:?}", key);
        self.storage
            .set(&key.to_key_bytes(), rlp::encode(value).to_vec().into())
    }

    pub fn delete(&self, key: StorageKey) -> Result<()> {
        trace!("delete key={:?}", key);
        self.storage.delete(&key.to_key_bytes())
    }

    pub fn get_account(&self, address: &Address) -> Result<Option<Account>> {
        self.get(StorageKey::new_account_key(address))
    }

    pub fn set_account(&self, account: &Account) -> Result<()> {
        self.set(StorageKey::new_account_key(&account.address), account)
    }

    pub fn get_contract(
        &self, address: &Address,
    ) -> Result<Option<SmartContract>> {
        self.get(StorageKey::new_contract_key(address))
    }

    pub fn set_contract(&self, contract: &SmartContract) -> Result<()> {
        self.set(
            StorageKey::new_contract_key(&contract.contract_address),
            contract,
        )
    }

    pub fn get_code(&self, address: &Address) -> Result<Option<Bytes>> {
        self.get(StorageKey::new_code_key(address))
    }

    pub fn set_code(&self, address: &Address, code: &Bytes) -> Result<()> {
        self.set(StorageKey::new_code_key(address), code)
    }

    pub fn get_storage(&self, address: &Address, key: &H256) -> Result<U256> {
        Ok(self
            .get(StorageKey::new_storage_key(address, key))?
            .unwrap_or_default())
    }

    /// Writes a storage slot; a zero value removes the slot.
    pub fn set_storage(
        &self, address: &Address, key: &H256, value: &U256,
    ) -> Result<()> {
        let storage_key = StorageKey::new_storage_key(address, key);
        if value.is_zero() {
            self.delete(storage_key)
        } else {
            self.set(storage_key, value)
        }
    }

    /// Removes an account together with its contract record, code and
    /// storage.
    pub fn delete_all(&self, address: &Address) -> Result<()> {
        debug!("delete all entries of address={:?}", address);
        self.delete(StorageKey::new_account_key(address))?;
        self.delete(StorageKey::new_contract_key(address))?;
        self.delete(StorageKey::new_code_key(address))?;
        let removed = self.storage.delete_all(
            &StorageKey::new_storage_root_key(address).to_key_bytes(),
        )?;
        trace!("{} storage slots removed for {:?}", removed, address);
        Ok(())
    }

    pub fn get_global_param<T: GlobalParamKey>(&self) -> Result<U256> {
        Ok(self.get::<U256>(T::storage_key())?.unwrap_or_default())
    }

    pub fn set_global_param<T: GlobalParamKey>(
        &self, value: &U256,
    ) -> Result<()> {
        self.set::<U256>(T::storage_key(), value)
    }
}
