// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

#[macro_use]
extern crate log;

mod error;
pub mod global_params;
mod in_memory_storage;
mod statedb;
mod storage_key;


pub use self::{
    error::{Error, Result},
    in_memory_storage::InMemoryStorage,
    statedb::{StateDb, StorageTrait},
    storage_key::StorageKey,
};
