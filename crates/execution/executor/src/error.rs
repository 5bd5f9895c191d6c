// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use thiserror::Error;
use tvm_statedb::Error as DbError;

/// Failures raised by `execute()`. Engine faults never show up here: they
/// are recorded in the program result instead.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// A precondition checked before any mutation.
    #[error("{0}")]
    Validation(String),

    /// A built-in operation failed while executing.
    #[error("{0}")]
    Execution(String),

    /// A creation parameter the transaction must never carry.
    #[error("{0}")]
    IllegalParameter(String),

    #[error("state db error: {0}")]
    StateDb(#[from] DbError),
}

impl ExecutorError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        ExecutorError::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ExecutorError>;
