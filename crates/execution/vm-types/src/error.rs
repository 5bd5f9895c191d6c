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

//! VM errors module

use super::{action_params::ActionParams, ResumeCall, ResumeCreate};
use primitives::ContractResult;
use std::fmt;
use tvm_statedb::{Error as DbError, Result as DbResult};
use tvm_types::Address;

#[derive(Debug)]
pub enum TrapKind {
    Call(ActionParams),
    Create(ActionParams),
}

pub enum TrapError<Call, Create> {
    Call(ActionParams, Call),
    Create(ActionParams, Create),
}

/// VM errors.
#[derive(Debug, Clone)]
pub enum Error {
    /// `OutOfEnergy` is returned when an instruction costs more energy than
    /// the frame has left.
    OutOfEnergy {
        instruction: &'static str,
        /// Energy granted to the frame.
        limit: u64,
        /// Cost of the failing instruction.
        op_energy: u64,
        /// Energy spent before the failing instruction.
        used: u64,
    },
    /// A lump-sum charge outside the instruction loop cannot be paid.
    NotEnoughSpendEnergy {
        hint: &'static str,
        need: u64,
        left: u64,
    },
    /// The sampled wall clock passed the transaction deadline.
    OutOfTime { instruction: &'static str },
    /// The block records this transaction as out of time; it is replayed
    /// without execution.
    AlreadyTimeOut,
    /// The call depth counter reached its limit.
    CallStackExhausted { depth: usize, limit: usize },
    /// `BadJumpDestination` is returned when execution tried to move
    /// to position that wasn't marked with JUMPDEST instruction
    BadJumpDestination {
        /// Position the code tried to jump to.
        destination: usize,
    },
    /// `BadInstructions` is returned when given instruction is not supported
    BadInstruction {
        /// Unrecognized opcode
        instruction: u8,
    },
    /// `StackUnderflow` when there is not enough stack elements to execute
    /// instruction
    StackUnderflow {
        /// Invoked instruction
        instruction: &'static str,
        /// How many stack elements was requested by instruction
        wanted: usize,
        /// How many elements were on stack
        on_stack: usize,
    },
    /// When execution would exceed defined Stack Limit
    OutOfStack {
        /// Invoked instruction
        instruction: &'static str,
        /// How many stack elements instruction wanted to push
        wanted: usize,
        /// What was the stack limit
        limit: usize,
    },
    /// Memory expansion beyond the frame limit.
    OutOfMemory { instruction: &'static str },
    /// Built-in contract failed on given input
    MutableCallInStaticContext,
    /// A value or asset transfer inside the VM could not be applied.
    TransferFailed(String),
    /// Deployed code starts with the reserved prefix.
    InvalidCode,
    /// Out of bounds access in RETURNDATACOPY.
    OutOfBounds,
    /// A contract already lives at the derived address.
    ConflictAddress(Address),
    /// Database errors are surfaced out of the engine.
    StateDbError(DbError),
}

impl Error {
    /// Fatal faults unwind every frame instead of failing only the current
    /// one.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::OutOfTime { .. }
                | Error::AlreadyTimeOut
                | Error::CallStackExhausted { .. }
                | Error::StateDbError(_)
        )
    }
}

impl From<DbError> for Error {
    fn from(err: DbError) -> Self { Error::StateDbError(err) }
}

impl From<&Error> for ContractResult {
    fn from(err: &Error) -> Self {
        use self::Error::*;
        match err {
            OutOfEnergy { .. } | NotEnoughSpendEnergy { .. } => {
                ContractResult::OutOfEnergy
            }
            OutOfTime { .. } | AlreadyTimeOut => ContractResult::OutOfTime,
            CallStackExhausted { .. } => ContractResult::CallStackExhausted,
            BadJumpDestination { .. } => ContractResult::BadJumpDestination,
            BadInstruction { .. } => ContractResult::IllegalOperation,
            StackUnderflow { .. } => ContractResult::StackTooSmall,
            OutOfStack { .. } => ContractResult::StackTooLarge,
            OutOfMemory { .. } => ContractResult::OutOfMemory,
            TransferFailed(_) => ContractResult::TransferFailed,
            InvalidCode => ContractResult::InvalidCode,
            MutableCallInStaticContext
            | OutOfBounds
            | ConflictAddress(_)
            | StateDbError(_) => {
                ContractResult::Unknown
            }
        }
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;

/// Separates out the database error, which must abort the whole block,
/// from the faults which are recorded in the execution result.
pub fn separate_out_db_error<T>(result: Result<T>) -> DbResult<Result<T>> {
    match result {
        Err(Error::StateDbError(err)) => Err(err),
        x => Ok(x),
    }
}

pub enum TrapResult<T, Call, Create> {
    Return(Result<T>),
    SubCallCreate(TrapError<Call, Create>),
}

impl<T, Call, Create> TrapResult<T, Call, Create> {
    #[inline]
    pub fn ok(self) -> Option<Result<T>> {
        if let TrapResult::Return(result) = self {
            Some(result)
        } else {
            None
        }
    }
}

pub type ExecTrapResult<T> =
    TrapResult<T, Box<dyn ResumeCall>, Box<dyn ResumeCreate>>;

pub type ExecTrapError = TrapError<Box<dyn ResumeCall>, Box<dyn ResumeCreate>>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Error::*;
        match *self {
            OutOfEnergy {
                instruction,
                limit,
                op_energy,
                used,
            } => write!(
                f,
                "Not enough energy for '{}' operation executing: \
                 curInvokeEnergyLimit[{}], curOpEnergy[{}], usedEnergy[{}]",
                instruction, limit, op_energy, used
            ),
            NotEnoughSpendEnergy { hint, need, left } => write!(
                f,
                "Not enough energy for '{}' executing: needEnergy[{}], \
                 leftEnergy[{}];",
                hint, need, left
            ),
            OutOfTime { instruction } => write!(
                f,
                "CPU timeout for '{}' operation executing",
                instruction
            ),
            AlreadyTimeOut => write!(f, "Already Time Out"),
            CallStackExhausted { depth, limit } => write!(
                f,
                "Call stack exhausted: depth[{}] exceeds limit[{}]",
                depth, limit
            ),
            BadJumpDestination { destination } => write!(
                f,
                "Operation with pc isn't 'JUMPDEST': PC[{}];",
                destination
            ),
            BadInstruction { instruction } => write!(
                f,
                "Invalid operation code: opCode[{:#04x}];",
                instruction
            ),
            StackUnderflow {
                instruction,
                wanted,
                on_stack,
            } => write!(
                f,
                "Expected stack size {} but actual {} for '{}';",
                wanted, on_stack, instruction
            ),
            OutOfStack {
                instruction,
                wanted,
                limit,
            } => write!(
                f,
                "Expected: overflow {} elements stack limit by '{}' \
                 pushing {}",
                limit, instruction, wanted
            ),
            OutOfMemory { instruction } => write!(
                f,
                "Out of Memory when '{}' operation executing",
                instruction
            ),
            MutableCallInStaticContext => write!(
                f,
                "Attempt to call a state modifying opcode inside STATICCALL"
            ),
            TransferFailed(ref msg) => write!(f, "{}", msg),
            InvalidCode => {
                write!(f, "invalid code: must not begin with 0xef")
            }
            OutOfBounds => write!(f, "Out of bounds"),
            ConflictAddress(ref address) => {
                write!(f, "Contract address conflict: {:?}", address)
            }
            StateDbError(ref err) => {
                write!(f, "Irrecoverable state db error: {}", err)
            }
        }
    }
}
