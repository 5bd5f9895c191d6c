// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::State;
use primitives::{Bytes, SmartContract};
use std::sync::Arc;
use tvm_statedb::Result as DbResult;
use tvm_types::{Address, H256, U256};

impl State {
    pub fn contract(
        &self, address: &Address,
    ) -> DbResult<Option<SmartContract>> {
        self.contracts
            .write()
            .get_or_load(address, || self.db.get_contract(address))
    }

    pub fn create_contract(&mut self, contract: SmartContract) {
        self.contracts
            .get_mut()
            .set(contract.contract_address, Some(contract));
    }

    pub fn code(&self, address: &Address) -> DbResult<Option<Arc<Bytes>>> {
        self.codes.write().get_or_load(address, || {
            Ok(self.db.get_code(address)?.map(Arc::new))
        })
    }

    pub fn save_code(&mut self, address: &Address, code: Bytes) {
        self.codes.get_mut().set(*address, Some(Arc::new(code)));
    }

    pub fn storage_at(&self, address: &Address, key: &H256) -> DbResult<U256> {
        let slot = (*address, *key);
        Ok(self
            .storage
            .write()
            .get_or_load(&slot, || {
                Ok(Some(self.db.get_storage(address, key)?))
            })?
            .unwrap_or_default())
    }

    pub fn set_storage(&mut self, address: &Address, key: H256, value: U256) {
        self.storage.get_mut().set((*address, key), Some(value));
    }

    /// Removes a self-destructed contract together with its account, code
    /// and storage. Called after execution, when no checkpoint is alive.
    pub fn delete_contract(&mut self, address: &Address) {
        debug!("delete contract {:?}", address);
        self.accounts.get_mut().set(*address, None);
        self.contracts.get_mut().set(*address, None);
        self.codes.get_mut().set(*address, None);
        self.storage.get_mut().retain(|(owner, _)| owner != address);
        self.killed.insert(*address);
    }
}
