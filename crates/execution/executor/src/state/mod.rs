// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Ledger State: a caching and checkpoint layer built upon the typed
//! database interfaces. Every read and write of the execution goes through
//! it and nothing reaches the database before [`State::commit`].

/// Cache Layer: a read-through write-back cache with its own checkpoint
/// stack, instantiated once per kind of entry.
mod cache_layer;

/// Checkpoints: the entry type of checkpoint layers and the checkpoint
/// maintenance of `State`.
mod checkpoints;

/// Access functions for accounts, balances and secondary assets.
mod basic_fields;

/// Contract records, code and storage slots.
mod contract_manager;

/// Implements functions for committing `State` changes to db.
mod commit;

#[cfg(test)]
pub use tests::get_state_for_test;

use self::cache_layer::CacheLayer;
use parking_lot::RwLock;
use primitives::{Account, Bytes, SmartContract};
use std::{collections::HashSet, sync::Arc};
use tvm_statedb::{
    global_params::{TotalEnergyLimit, TotalEnergyWeight},
    Result as DbResult, StateDb,
};
use tvm_types::{u256_to_u64_saturated, Address, H256, U256};

/// Network-wide values mutated by built-in operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct GlobalStat {
    total_energy_weight: U256,
    total_energy_limit: U256,
}

impl GlobalStat {
    fn loaded(db: &StateDb) -> DbResult<Self> {
        Ok(GlobalStat {
            total_energy_weight: db.get_global_param::<TotalEnergyWeight>()?,
            total_energy_limit: db.get_global_param::<TotalEnergyLimit>()?,
        })
    }
}

pub struct State {
    /// The backend database
    db: StateDb,

    accounts: RwLock<CacheLayer<Address, Account>>,
    contracts: RwLock<CacheLayer<Address, SmartContract>>,
    codes: RwLock<CacheLayer<Address, Arc<Bytes>>>,
    storage: RwLock<CacheLayer<(Address, H256), U256>>,

    global_stat: GlobalStat,
    /// Global statistics at the creation of each checkpoint.
    checkpoints: Vec<GlobalStat>,

    /// Addresses whose entries are removed from the database on commit.
    killed: HashSet<Address>,
}

impl State {
    pub fn new(db: StateDb) -> DbResult<Self> {
        let global_stat = GlobalStat::loaded(&db)?;
        Ok(State {
            db,
            accounts: Default::default(),
            contracts: Default::default(),
            codes: Default::default(),
            storage: Default::default(),
            global_stat,
            checkpoints: Vec::new(),
            killed: HashSet::new(),
        })
    }

    pub fn total_energy_weight(&self) -> u64 {
        u256_to_u64_saturated(&self.global_stat.total_energy_weight)
    }

    pub fn total_energy_limit(&self) -> u64 {
        u256_to_u64_saturated(&self.global_stat.total_energy_limit)
    }

    pub fn add_total_energy_weight(&mut self, by: u64) {
        self.global_stat.total_energy_weight += U256::from(by);
    }

    pub fn set_total_energy_limit(&mut self, limit: u64) {
        self.global_stat.total_energy_limit = U256::from(limit);
    }
}
