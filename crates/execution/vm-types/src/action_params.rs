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

//! Frame input parameters.
use super::CallType;
use keccak_hash::{keccak, KECCAK_EMPTY};
use primitives::Bytes;
use std::sync::Arc;
use tvm_types::{Address, H256, U256};

/// Transaction value
#[derive(Clone, Debug)]
pub enum ActionValue {
    /// Value that should be transfered
    Transfer(U256),
    /// Apparent value for transaction (not transfered)
    Apparent(U256),
}

impl ActionValue {
    /// Returns action value as U256.
    pub fn value(&self) -> U256 {
        match *self {
            ActionValue::Transfer(x) | ActionValue::Apparent(x) => x,
        }
    }

    /// Returns the transfer action value of the U256-convertable raw value
    pub fn transfer<T: Into<U256>>(transfer_value: T) -> ActionValue {
        ActionValue::Transfer(transfer_value.into())
    }
}

/// A secondary asset moved along with a call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenValue {
    pub id: u64,
    pub amount: U256,
}

/// Action (call/create) input params. Everything else should be specified in
/// Externalities.
#[derive(Clone, Debug)]
pub struct ActionParams {
    /// Address of currently executed code.
    pub code_address: Address,
    /// Hash of currently executed code.
    pub code_hash: H256,
    /// Receive address. Usually equal to code_address,
    /// except when called using DELEGATECALL.
    pub address: Address,
    /// Sender of current part of the transaction.
    pub sender: Address,
    /// The owner of the transaction.
    pub origin: Address,
    /// Energy granted to the frame.
    pub energy: u64,
    /// Transaction value.
    pub value: ActionValue,
    /// Secondary asset moved with the call, if any.
    pub token: Option<TokenValue>,
    /// Code being executed.
    pub code: Option<Arc<Bytes>>,
    /// Input data.
    pub data: Option<Bytes>,
    /// Type of call
    pub call_type: CallType,
}

impl Default for ActionParams {
    /// Returns default ActionParams initialized with zeros
    fn default() -> ActionParams {
        ActionParams {
            code_address: Address::zero(),
            code_hash: KECCAK_EMPTY,
            address: Address::zero(),
            sender: Address::zero(),
            origin: Address::zero(),
            energy: 0,
            value: ActionValue::Transfer(U256::zero()),
            token: None,
            code: None,
            data: None,
            call_type: CallType::None,
        }
    }
}

impl ActionParams {
    pub fn with_code(mut self, code: Bytes) -> Self {
        self.code_hash = keccak(&code);
        self.code = Some(Arc::new(code));
        self
    }

    pub fn is_create(&self) -> bool { self.call_type.is_create() }

    pub fn token_id(&self) -> u64 { self.token.map_or(0, |t| t.id) }

    pub fn token_amount(&self) -> U256 {
        self.token.map_or(U256::zero(), |t| t.amount)
    }
}
