// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

extern crate keccak_hash as hash;
extern crate rlp;
#[macro_use]
extern crate rlp_derive;
#[macro_use]
extern crate serde_derive;

pub mod abi;
pub mod account;
pub mod block;
pub mod contract;
pub mod contract_result;
pub mod log_entry;
pub mod receipt;
pub mod transaction;

pub type Bytes = Vec<u8>;

pub use crate::{
    abi::{Abi, AbiEntry, AbiParam, EntryType, StateMutability},
    account::{Account, AccountType, AssetBalance, FrozenBalance},
    block::{BlockContext, BlockNumber},
    contract::SmartContract,
    contract_result::ContractResult,
    log_entry::LogEntry,
    receipt::Receipt,
    transaction::{
        BuiltInOperation, CreateSmartContract, Operation, SignedTransaction,
        Transaction, TriggerSmartContract,
    },
};
