// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

mod fresh_executive;
mod pre_checked_executive;

use fresh_executive::{FreshExecutive, PreparedExecution};
use pre_checked_executive::PreCheckedExecutive;

pub use pre_checked_executive::{CONSTANT_WITH_VALUE_MESSAGE, REVERT_MESSAGE};

use crate::{
    error::{ExecutorError, Result},
    machine::Machine,
    result::ProgramResult,
    state::State,
    trigger::TriggerSink,
};
use primitives::{
    BlockContext, ContractResult, Operation, SignedTransaction, Transaction,
};
use vm::{Deadline, Env, Spec};

/// The kind of a transaction, derived from its operation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Creation,
    Invocation,
    BuiltIn,
}

pub fn classify(tx: &Transaction) -> TxKind {
    match &tx.operation {
        Operation::CreateSmartContract(_) => TxKind::Creation,
        Operation::TriggerSmartContract(_) => TxKind::Invocation,
        Operation::BuiltIn(_) => TxKind::BuiltIn,
    }
}

/// Whether the execution belongs to a real block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionRole {
    /// Producing or validating a block. Successful executions are
    /// committed.
    Block,
    /// No enclosing block, e.g. a client query. Nothing is committed; the
    /// overlay keeps the effects for the caller to inspect or drop.
    Speculative,
}

enum Phase {
    Fresh,
    Prepared(PreparedExecution),
    /// A validated built-in operation, applied above the checkpoint.
    BuiltIn(usize),
    Finished,
}

/// Runs one transaction: `execute()` validates and prepares it, `go()`
/// drives it to a verdict and `finalization()` cleans up afterwards.
pub struct Runtime<'a> {
    tx: &'a SignedTransaction,
    block: Option<&'a BlockContext>,
    state: &'a mut State,
    machine: &'a Machine,
    env: Env,
    spec: Spec,
    kind: TxKind,
    role: ExecutionRole,
    phase: Phase,
    result: ProgramResult,
    constant_call: bool,
    trigger_sink: Option<&'a mut dyn TriggerSink>,
    enforce_deadline: bool,
}

impl<'a> Runtime<'a> {
    pub fn new(
        tx: &'a SignedTransaction, block: Option<&'a BlockContext>,
        state: &'a mut State, machine: &'a Machine,
    ) -> Self {
        let (env, role) = match block {
            Some(block) => (Env::from(block), ExecutionRole::Block),
            None => (Env::default(), ExecutionRole::Speculative),
        };
        let spec = machine.spec(env.number);
        Runtime {
            tx,
            block,
            state,
            machine,
            env,
            spec,
            kind: classify(tx),
            role,
            phase: Phase::Fresh,
            result: ProgramResult::default(),
            constant_call: false,
            trigger_sink: None,
            enforce_deadline: true,
        }
    }

    /// Triggers of successful executions are pushed to `sink`.
    pub fn with_trigger_sink(mut self, sink: &'a mut dyn TriggerSink) -> Self {
        self.trigger_sink = Some(sink);
        self
    }

    /// Lifts the wall-clock deadline, for debugging tools.
    pub fn disable_deadline(&mut self) { self.enforce_deadline = false; }

    pub fn kind(&self) -> TxKind { self.kind }

    pub fn role(&self) -> ExecutionRole { self.role }

    /// Validates the transaction and prepares the execution. A failure
    /// leaves the state as it was.
    pub fn execute(&mut self) -> Result<()> {
        if !matches!(self.phase, Phase::Fresh) {
            return Err(ExecutorError::Execution(
                "transaction already executed".into(),
            ));
        }
        self.phase = match self.kind {
            TxKind::BuiltIn => Phase::BuiltIn(self.execute_builtin()?),
            TxKind::Creation | TxKind::Invocation => {
                let mut prepared = FreshExecutive::new(
                    self.tx,
                    self.block,
                    &mut *self.state,
                    &self.env,
                    &self.spec,
                )
                .check_all()?;
                if !self.enforce_deadline {
                    prepared.deadline = Deadline::unbounded();
                }
                self.constant_call = prepared.constant_call;
                Phase::Prepared(prepared)
            }
        };
        Ok(())
    }

    fn execute_builtin(&mut self) -> Result<usize> {
        let op = match &self.tx.operation {
            Operation::BuiltIn(op) => op,
            _ => {
                return Err(ExecutorError::validation(
                    "not a built-in operation",
                ))
            }
        };
        let actuator = self.machine.actuator(op.kind).ok_or_else(|| {
            ExecutorError::validation(format!(
                "No actuator for operation kind {}",
                op.kind
            ))
        })?;
        actuator.validate(op, &*self.state)?;

        let checkpoint = self.state.checkpoint();
        if let Err(e) = actuator.execute(op, &mut *self.state, &self.env) {
            self.state.revert_to(checkpoint);
            return Err(match e {
                ExecutorError::Validation(msg) => ExecutorError::Execution(msg),
                e => e,
            });
        }
        Ok(checkpoint)
    }

    /// Drives the prepared transaction to a verdict. Every failure is
    /// recorded in the result.
    pub fn go(&mut self) {
        match std::mem::replace(&mut self.phase, Phase::Finished) {
            Phase::Prepared(prepared) => {
                self.result = PreCheckedExecutive {
                    tx: self.tx,
                    state: &mut *self.state,
                    machine: self.machine,
                    env: &self.env,
                    spec: &self.spec,
                    role: self.role,
                    prepared,
                }
                .execute_transaction();
                self.publish_triggers();
            }
            Phase::BuiltIn(checkpoint) => self.settle_builtin(checkpoint),
            Phase::Fresh => {
                self.phase = Phase::Fresh;
                self.record_fault("transaction not validated");
            }
            Phase::Finished => {
                self.record_fault("transaction already finished");
            }
        }
    }

    fn settle_builtin(&mut self, checkpoint: usize) {
        debug_assert!(!self.state.no_checkpoint());
        trace!("settle built-in operation above checkpoint {}", checkpoint);
        self.state.discard_checkpoint();
        self.result = ProgramResult::default();
        self.result.contract_result = ContractResult::Success;
        if self.role == ExecutionRole::Block {
            if let Err(e) = self.state.commit() {
                error!("commit of tx {:?} failed: {}", self.tx.hash(), e);
                self.record_fault(e);
            }
        }
    }

    fn record_fault(&mut self, message: impl ToString) {
        let message = message.to_string();
        warn!("runtime of tx {:?}: {}", self.tx.hash(), message);
        self.result.contract_result = ContractResult::Unknown;
        self.result.runtime_error = Some(message);
    }

    fn publish_triggers(&mut self) {
        if !self.result.is_success() {
            return;
        }
        if let Some(sink) = self.trigger_sink.as_mut() {
            for trigger in &self.result.triggers {
                sink.publish(trigger);
            }
        }
    }

    /// Deletes the contracts destroyed by a successful, non-constant
    /// execution.
    pub fn finalization(&mut self) -> Result<()> {
        if self.result.runtime_error.is_some() || self.is_constant_call() {
            return Ok(());
        }
        if self.result.suicides.is_empty() {
            return Ok(());
        }
        for address in &self.result.suicides {
            self.state.delete_contract(address);
        }
        if self.role == ExecutionRole::Block {
            self.state.commit()?;
        }
        Ok(())
    }

    pub fn is_constant_call(&self) -> bool { self.constant_call }

    pub fn get_result(&self) -> &ProgramResult { &self.result }

    pub fn into_result(self) -> ProgramResult { self.result }

    /// The cause of the failure, or an empty string on success.
    pub fn get_runtime_error(&self) -> &str {
        self.result.runtime_error.as_deref().unwrap_or("")
    }
}
