//! TVM Executor: the core logic of executing smart-contract transactions. It
//! validates a transaction, meters the energy and the wall-clock time of its
//! execution and turns the outcome into committed state or a recorded
//! rejection that every node reproduces.

#[macro_use]
extern crate log;
#[macro_use]
extern crate tvm_util_macros;
#[macro_use]
extern crate rlp_derive;
extern crate tvm_vm_types as vm;

/// Execution Context: Implements the context during the execution, like
/// caller's information and block information. It also ensures compatibility
/// with the context interface of the interpreter.
pub mod context;

/// Deadline Controller: The wall-clock budget of a transaction according to
/// the role of the node.
pub mod deadline;

/// Resource Accounting: Converts frozen stake, balance and the fee limit of a
/// transaction into an energy limit.
pub mod energy;

pub mod error;

/// Transaction Execution Entry: Manages the execution of transactions.
/// It is responsible for receiving transactions, performing checks, and
/// submitting them to the execution engine.
pub mod executive;

/// Execution Engine Object: Serves as a factory for specifications, built-in
/// operations and the interpreter.
pub mod machine;

/// The outcome of a transaction.
pub mod result;

/// Specification Control: Enables fine-grained control over the engine's
/// behavior during the execution of different blocks, allowing the engine to
/// achieve backward compatibility per hardfork.
pub mod spec;

/// Stack Management for Execution Engine: The execution engine is
/// stack-based. This module manages the stack operations, mainly handling the
/// logic related to pushing and popping frames.
pub mod stack;

/// Ledger State: Acts as a caching and checkpoint layer built upon semantically
/// meaningful database interfaces for the execution.
pub mod state;

/// Transaction Execution Tracker: Tracks and records consensus-matters details
/// during transaction execution.
pub mod substate;

/// Log Triggers: Publishes the logs of successful executions to the event
/// subscription service.
pub mod trigger;

pub use error::{ExecutorError, Result};
pub use executive::{classify, ExecutionRole, Runtime, TxKind};
pub use machine::Machine;
pub use result::ProgramResult;
