// Copyright 2015-2018 Parity Technologies (UK) Ltd.
// This file is part of Parity.

// Parity is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Parity is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Parity.  If not, see <http://www.gnu.org/licenses/>.

// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Interface for VM externalities.

use super::{
    action_params::TokenValue,
    call_create_type::CallType,
    deadline::Deadline,
    env::Env,
    error::{Result, TrapKind},
    return_data::ReturnData,
    spec::Spec,
    Error,
};
use primitives::Bytes;
use std::sync::Arc;
use tvm_statedb::Result as DbResult;
use tvm_types::{Address, H256, U256};

#[derive(Debug)]
/// Result of externalities create function.
pub enum ContractCreateResult {
    /// Returned when creation was successful.
    /// Contains an address of newly created contract and energy left.
    Created(Address, u64),
    /// Returned when contract creation failed.
    Failed(Error),
    /// Reverted with REVERT.
    Reverted(u64, ReturnData),
}

#[derive(Debug)]
/// Result of externalities call function.
pub enum MessageCallResult {
    /// Returned when message call was successful.
    /// Contains energy left and output data.
    Success(u64, ReturnData),
    /// Returned when message call failed.
    Failed(Error),
    /// Returned when message call was reverted.
    /// Contains energy left and output data.
    Reverted(u64, ReturnData),
}

/// Context for VMs
pub trait Context {
    /// Returns a value for given key.
    fn storage_at(&self, key: &H256) -> Result<U256>;

    /// Stores a value for given key.
    fn set_storage(&mut self, key: H256, value: U256) -> Result<()>;

    /// Determine whether an account exists.
    fn exists(&self, address: &Address) -> Result<bool>;

    /// Returns address balance.
    fn balance(&self, address: &Address) -> Result<U256>;

    /// Returns the balance of a secondary asset.
    fn token_balance(&self, address: &Address, token_id: u64) -> Result<U256>;

    /// Returns the hash of the parent block; zero for any other number.
    fn blockhash(&mut self, number: &U256) -> H256;

    /// Creates new contract.
    fn create(
        &mut self, energy: u64, value: &U256, code: &[u8],
    ) -> DbResult<::std::result::Result<ContractCreateResult, TrapKind>>;

    /// Message call.
    fn call(
        &mut self, energy: u64, sender_address: &Address,
        receive_address: &Address, value: Option<U256>,
        token: Option<TokenValue>, data: &[u8], code_address: &Address,
        call_type: CallType,
    ) -> DbResult<::std::result::Result<MessageCallResult, TrapKind>>;

    /// Returns code at given address
    fn extcode(&self, address: &Address) -> Result<Option<Arc<Bytes>>>;

    /// Returns code size at given address
    fn extcodesize(&self, address: &Address) -> Result<usize>;

    /// Creates log entry with given topics and data
    fn log(&mut self, topics: Vec<H256>, data: &[u8]) -> Result<()>;

    /// Should be called when transaction calls `RETURN` opcode.
    /// Returns energy_left if cost of returning the data is not too high.
    fn ret(
        self, energy: u64, data: &ReturnData, apply_state: bool,
    ) -> Result<u64>
    where Self: Sized;

    /// Should be called when contract commits suicide.
    /// Address to which funds should be refunded.
    fn suicide(&mut self, refund_address: &Address) -> Result<()>;

    /// Records the energy returned by an `SSTORE` clearing a slot.
    fn add_sstore_refund(&mut self, value: u64);

    /// Returns specification.
    fn spec(&self) -> &Spec;

    /// Returns environment.
    fn env(&self) -> &Env;

    /// Returns the transaction deadline.
    fn deadline(&self) -> &Deadline;

    /// Returns current depth of execution.
    ///
    /// If contract A calls contract B, and contract B calls C,
    /// then A depth is 0, B is 1, C is 2 and so on.
    fn depth(&self) -> usize;

    /// Check if running in static context.
    fn is_static(&self) -> bool;
}
