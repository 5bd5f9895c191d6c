// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::State;
use tvm_statedb::{
    global_params::{TotalEnergyLimit, TotalEnergyWeight},
    Error as DbError, Result as DbResult, StorageKey,
};

impl State {
    /// Commit everything to the storage.
    pub fn commit(&mut self) -> DbResult<()> {
        debug!("state.commit_changes");
        if !self.no_checkpoint() {
            return Err(DbError::Msg(
                "commit with pending checkpoints".into(),
            ));
        }

        let mut killed: Vec<_> = self.killed.drain().collect();
        killed.sort();
        for address in &killed {
            self.db.delete_all(address)?;
        }

        let mut accounts = self.accounts.get_mut().drain_dirty();
        accounts.sort_by(|a, b| a.0.cmp(&b.0));
        for (address, account) in accounts {
            match account {
                Some(account) => self.db.set_account(&account)?,
                None => self.db.delete(StorageKey::new_account_key(&address))?,
            }
        }

        for (address, contract) in self.contracts.get_mut().drain_dirty() {
            match contract {
                Some(contract) => self.db.set_contract(&contract)?,
                None => {
                    self.db.delete(StorageKey::new_contract_key(&address))?
                }
            }
        }

        for (address, code) in self.codes.get_mut().drain_dirty() {
            match code {
                Some(code) => self.db.set_code(&address, &code)?,
                None => self.db.delete(StorageKey::new_code_key(&address))?,
            }
        }

        for ((address, key), value) in self.storage.get_mut().drain_dirty() {
            self.db
                .set_storage(&address, &key, &value.unwrap_or_default())?;
        }

        self.db.set_global_param::<TotalEnergyWeight>(
            &self.global_stat.total_energy_weight,
        )?;
        self.db.set_global_param::<TotalEnergyLimit>(
            &self.global_stat.total_energy_limit,
        )?;
        Ok(())
    }
}
