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

//! Virtual machines support library

mod action_params;
mod call_create_type;
mod context;
mod deadline;
mod env;
mod error;
mod return_data;
mod spec;

#[cfg(any(test, feature = "testonly_code"))]
pub mod tests;

pub use self::{
    action_params::{ActionParams, ActionValue, TokenValue},
    call_create_type::CallType,
    context::{Context, ContractCreateResult, MessageCallResult},
    deadline::Deadline,
    env::Env,
    error::{
        separate_out_db_error, Error, ExecTrapError, ExecTrapResult, Result,
        TrapError, TrapKind, TrapResult,
    },
    return_data::{GasLeft, ReturnData},
    spec::Spec,
};

/// Virtual Machine interface
pub trait Exec: Send {
    /// This function should be used to execute transaction.
    /// It returns either an error, a known amount of energy left, or
    /// parameters to be used to compute the final energy left.
    fn exec(self: Box<Self>, context: &mut dyn Context)
        -> ExecTrapResult<GasLeft>;
}

/// Resume call interface
pub trait ResumeCall: Send {
    /// Resume an execution for call, returns back the Vm interface.
    fn resume_call(self: Box<Self>, result: MessageCallResult)
        -> Box<dyn Exec>;
}

/// Resume create interface
pub trait ResumeCreate: Send {
    /// Resume an execution from create, returns back the Vm interface.
    fn resume_create(
        self: Box<Self>, result: ContractCreateResult,
    ) -> Box<dyn Exec>;
}
