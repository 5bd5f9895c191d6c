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

use super::{
    CallType, Context, ContractCreateResult, Deadline, Env, Error, GasLeft,
    MessageCallResult, ReturnData, Spec, TokenValue, TrapKind,
};
use primitives::Bytes;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tvm_statedb::Result as DbResult;
use tvm_types::{Address, H256, U256};

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(PartialEq, Eq, Hash, Debug)]
pub enum MockCallType {
    Call,
    Create,
}

#[derive(PartialEq, Eq, Hash, Debug)]
pub struct MockLogEntry {
    pub topics: Vec<H256>,
    pub data: Bytes,
}

/// Mock context for tests.
#[derive(PartialEq, Eq, Hash, Debug)]
pub struct MockCall {
    pub call_type: MockCallType,
    pub energy: u64,
    pub sender_address: Option<Address>,
    pub receive_address: Option<Address>,
    pub value: Option<U256>,
    pub data: Bytes,
    pub code_address: Option<Address>,
}

pub fn test_finalize(res: Result<GasLeft>) -> Result<u64> {
    match res {
        Ok(GasLeft::Known(energy)) => Ok(energy),
        Ok(GasLeft::NeedsReturn { energy_left, .. }) => Ok(energy_left),
        Err(e) => Err(e),
    }
}

/// Mock context.
/// Can't do recursive calls.
pub struct MockContext {
    pub store: HashMap<H256, U256>,
    pub suicides: HashSet<Address>,
    pub calls: HashSet<MockCall>,
    pub sstore_clears: u64,
    pub depth: usize,
    pub blockhashes: HashMap<U256, H256>,
    pub codes: HashMap<Address, Arc<Bytes>>,
    pub logs: Vec<MockLogEntry>,
    pub info: Env,
    pub spec: Spec,
    pub balances: HashMap<Address, U256>,
    pub token_balances: HashMap<(Address, u64), U256>,
    pub is_static: bool,
    pub deadline: Deadline,
}

impl Default for MockContext {
    fn default() -> Self { MockContext::new() }
}

impl MockContext {
    /// New mock context with every feature enabled and no deadline.
    pub fn new() -> Self {
        MockContext {
            store: HashMap::new(),
            suicides: HashSet::new(),
            calls: HashSet::new(),
            sstore_clears: 0,
            depth: 0,
            blockhashes: HashMap::new(),
            codes: HashMap::new(),
            logs: Vec::new(),
            info: Env::default(),
            spec: Spec::new_spec_for_test(),
            balances: HashMap::new(),
            token_balances: HashMap::new(),
            is_static: false,
            deadline: Deadline::unbounded(),
        }
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }
}

impl Context for MockContext {
    fn storage_at(&self, key: &H256) -> Result<U256> {
        Ok(self.store.get(key).cloned().unwrap_or_else(U256::zero))
    }

    fn set_storage(&mut self, key: H256, value: U256) -> Result<()> {
        self.store.insert(key, value);
        Ok(())
    }

    fn exists(&self, address: &Address) -> Result<bool> {
        Ok(self.balances.contains_key(address))
    }

    fn balance(&self, address: &Address) -> Result<U256> {
        Ok(self.balances.get(address).cloned().unwrap_or_default())
    }

    fn token_balance(&self, address: &Address, token_id: u64) -> Result<U256> {
        Ok(self
            .token_balances
            .get(&(*address, token_id))
            .cloned()
            .unwrap_or_default())
    }

    fn blockhash(&mut self, number: &U256) -> H256 {
        self.blockhashes.get(number).cloned().unwrap_or_default()
    }

    fn create(
        &mut self, energy: u64, value: &U256, code: &[u8],
    ) -> DbResult<::std::result::Result<ContractCreateResult, TrapKind>> {
        self.calls.insert(MockCall {
            call_type: MockCallType::Create,
            energy,
            sender_address: None,
            receive_address: None,
            value: Some(*value),
            data: code.to_vec(),
            code_address: None,
        });
        Ok(Ok(ContractCreateResult::Failed(Error::OutOfBounds)))
    }

    fn call(
        &mut self, energy: u64, sender_address: &Address,
        receive_address: &Address, value: Option<U256>,
        _token: Option<TokenValue>, data: &[u8], code_address: &Address,
        _call_type: CallType,
    ) -> DbResult<::std::result::Result<MessageCallResult, TrapKind>> {
        self.calls.insert(MockCall {
            call_type: MockCallType::Call,
            energy,
            sender_address: Some(*sender_address),
            receive_address: Some(*receive_address),
            value,
            data: data.to_vec(),
            code_address: Some(*code_address),
        });
        Ok(Ok(MessageCallResult::Success(energy, ReturnData::empty())))
    }

    fn extcode(&self, address: &Address) -> Result<Option<Arc<Bytes>>> {
        Ok(self.codes.get(address).cloned())
    }

    fn extcodesize(&self, address: &Address) -> Result<usize> {
        Ok(self.codes.get(address).map_or(0, |c| c.len()))
    }

    fn log(&mut self, topics: Vec<H256>, data: &[u8]) -> Result<()> {
        if self.is_static {
            return Err(Error::MutableCallInStaticContext);
        }
        self.logs.push(MockLogEntry {
            topics,
            data: data.to_vec(),
        });
        Ok(())
    }

    fn ret(
        self, energy: u64, _data: &ReturnData, _apply_state: bool,
    ) -> Result<u64> {
        Ok(energy)
    }

    fn suicide(&mut self, refund_address: &Address) -> Result<()> {
        if self.is_static {
            return Err(Error::MutableCallInStaticContext);
        }
        self.suicides.insert(*refund_address);
        Ok(())
    }

    fn add_sstore_refund(&mut self, _value: u64) { self.sstore_clears += 1; }

    fn spec(&self) -> &Spec { &self.spec }

    fn env(&self) -> &Env { &self.info }

    fn deadline(&self) -> &Deadline { &self.deadline }

    fn depth(&self) -> usize { self.depth }

    fn is_static(&self) -> bool { self.is_static }
}
