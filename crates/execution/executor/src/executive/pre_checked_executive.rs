// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{fresh_executive::PreparedExecution, ExecutionRole};
use crate::{
    machine::Machine,
    result::ProgramResult,
    stack::{
        accrue_substate, exec_main_frame, CallFrameArena, CallStackInfo,
        CreateNonce, FrameResult, FrameReturn, FreshFrame, RuntimeRes,
    },
    state::State,
    substate::Substate,
    trigger::{build_triggers, TriggerContext},
};
use primitives::{ContractResult, SignedTransaction};
use tvm_statedb::Result as DbResult;
use vm::{ActionParams, Deadline, Env, Spec};

pub const REVERT_MESSAGE: &str = "REVERT opcode executed";
pub const CONSTANT_WITH_VALUE_MESSAGE: &str =
    "constant cannot set call value or call token value.";

/// Drives a validated transaction through the engine and turns the outcome
/// into committed state or a recorded rejection.
pub(super) struct PreCheckedExecutive<'a> {
    pub tx: &'a SignedTransaction,
    pub state: &'a mut State,
    pub machine: &'a Machine,
    pub env: &'a Env,
    pub spec: &'a Spec,
    pub role: ExecutionRole,
    pub prepared: PreparedExecution,
}

impl<'a> PreCheckedExecutive<'a> {
    pub(super) fn execute_transaction(mut self) -> ProgramResult {
        let mut result = ProgramResult::new(
            self.prepared.energy_limit,
            self.prepared.contract_address,
        );

        if self.tx.contract_ret == Some(ContractResult::OutOfTime) {
            return self.finalize_on_replayed_timeout(result);
        }

        let frame_result = exec_vm(
            &mut *self.state,
            self.machine,
            self.env,
            self.spec,
            &self.prepared.deadline,
            self.prepared.params.clone(),
            self.tx,
            &mut result.internal_transactions,
        );
        match frame_result {
            Ok(frame_result) => self.record_outcome(&mut result, frame_result),
            Err(e) => return self.finalize_on_unknown_fault(result, e),
        }

        if self.prepared.constant_call {
            return self.finalize_constant_call(result);
        }
        if result.exception.is_some() {
            return self.finalize_on_exception(result);
        }
        if result.revert {
            return self.finalize_on_revert(result);
        }
        self.finalize_on_success(result)
    }
}

pub(super) fn exec_vm(
    state: &mut State, machine: &Machine, env: &Env, spec: &Spec,
    deadline: &Deadline, params: ActionParams, tx: &SignedTransaction,
    internal_txs: &mut CallFrameArena,
) -> DbResult<FrameResult> {
    let main_frame = FreshFrame::new(
        params,
        env,
        machine,
        spec,
        deadline,
        /* depth */ 0,
        /* static_flag */ false,
        /* parent_tx */ None,
    );
    let mut callstack = CallStackInfo::new();
    let mut create_nonce = CreateNonce::new(tx.hash());
    let resources = RuntimeRes {
        state,
        callstack: &mut callstack,
        internal_txs,
        create_nonce: &mut create_nonce,
    };
    exec_main_frame(main_frame, resources)
}

impl<'a> PreCheckedExecutive<'a> {
    fn record_outcome(
        &self, result: &mut ProgramResult, mut frame_result: FrameResult,
    ) {
        let mut substate = Substate::new();
        accrue_substate(&mut substate, &mut frame_result);

        match frame_result {
            Ok(FrameReturn {
                energy_left,
                apply_state,
                return_data,
                ..
            }) => {
                result.energy_used =
                    result.energy_limit.saturating_sub(energy_left);
                result.return_data = return_data.to_vec();
                if apply_state {
                    result.contract_result = ContractResult::Success;
                    result.logs = substate.logs;
                    result.suicides = substate.suicides.into_iter().collect();
                    result.sstore_refund = substate.sstore_refund;
                } else {
                    result.contract_result = ContractResult::Revert;
                    result.revert = true;
                }
            }
            Err(err) => {
                result.contract_result = ContractResult::from(&err);
                result.exception = Some(err);
            }
        }
    }

    fn rollback(&mut self) { self.state.revert_to(self.prepared.checkpoint); }

    fn finalize_on_replayed_timeout(
        mut self, mut result: ProgramResult,
    ) -> ProgramResult {
        info!(
            "tx {:?} is recorded out of time, replay without execution",
            self.tx.hash()
        );
        self.rollback();
        let err = vm::Error::AlreadyTimeOut;
        result.contract_result = ContractResult::OutOfTime;
        result.runtime_error = Some(err.to_string());
        result.exception = Some(err);
        result.spend_all_energy();
        result
    }

    fn finalize_on_unknown_fault(
        mut self, mut result: ProgramResult, err: impl ToString,
    ) -> ProgramResult {
        let message = err.to_string();
        warn!(
            "tx {:?} faulted outside the engine: {}",
            self.tx.hash(),
            message
        );
        if !self.state.no_checkpoint() {
            self.rollback();
        }
        result.contract_result = ContractResult::Unknown;
        result.runtime_error = Some(message);
        result.discard_effects();
        result.reject_internal_transactions();
        result.spend_all_energy();
        result
    }

    /// A constant call never changes the state. Its return data is kept.
    fn finalize_constant_call(
        mut self, mut result: ProgramResult,
    ) -> ProgramResult {
        self.rollback();
        if self.prepared.carries_value {
            debug!("constant call of tx {:?} carries value", self.tx.hash());
            result.runtime_error = Some(CONSTANT_WITH_VALUE_MESSAGE.into());
            result.reject_internal_transactions();
        } else if let Some(err) = &result.exception {
            result.runtime_error = Some(err.to_string());
            result.reject_internal_transactions();
            result.spend_all_energy();
        } else if result.revert {
            result.runtime_error = Some(REVERT_MESSAGE.into());
            result.reject_internal_transactions();
        }
        result
    }

    fn finalize_on_exception(
        mut self, mut result: ProgramResult,
    ) -> ProgramResult {
        self.rollback();
        if let Some(err) = &result.exception {
            if err.is_fatal() {
                info!("tx {:?} aborted: {}", self.tx.hash(), err);
            } else {
                debug!("tx {:?} failed: {}", self.tx.hash(), err);
            }
            result.runtime_error = Some(err.to_string());
        }
        result.discard_effects();
        result.reject_internal_transactions();
        result.spend_all_energy();
        result
    }

    fn finalize_on_revert(
        mut self, mut result: ProgramResult,
    ) -> ProgramResult {
        self.rollback();
        result.runtime_error = Some(REVERT_MESSAGE.into());
        result.discard_effects();
        result.reject_internal_transactions();
        result
    }

    fn finalize_on_success(
        mut self, mut result: ProgramResult,
    ) -> ProgramResult {
        let owner = *self.tx.owner_address();
        let trigger_context = TriggerContext {
            block_number: self.env.number,
            block_timestamp: self.env.timestamp,
            transaction_id: self.tx.hash(),
            origin_address: owner,
            caller_address: owner,
        };
        match build_triggers(&result.logs, &*self.state, &trigger_context) {
            Ok(triggers) => result.triggers = triggers,
            Err(e) => return self.finalize_on_unknown_fault(result, e),
        }

        self.state.discard_checkpoint();
        if self.role == ExecutionRole::Block {
            if let Err(e) = self.state.commit() {
                error!("commit of tx {:?} failed: {}", self.tx.hash(), e);
                result.contract_result = ContractResult::Unknown;
                result.runtime_error = Some(e.to_string());
                result.discard_effects();
                result.reject_internal_transactions();
                result.spend_all_energy();
                return result;
            }
        }
        trace!(
            "tx {:?} succeeded, energy used {}/{}",
            self.tx.hash(),
            result.energy_used,
            result.energy_limit
        );
        result
    }
}
