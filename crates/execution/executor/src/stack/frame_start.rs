// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{
    super::context::OriginInfo, executable::make_executable,
    frame_return::process_return, run_executable, FrameLocal,
    FrameStackAction, InternalTransaction, InternalTxNote, RuntimeRes,
};
use crate::{machine::Machine, state::State};

use primitives::{AccountType, SmartContract};
use tvm_parameters::vm::ONE_HUNDRED;
use tvm_statedb::Result as DbResult;
use tvm_types::U256;
use vm::{ActionParams, ActionValue, CallType, Deadline, Env, Error, Spec};

/// A frame has not yet been executed, with all the necessary information to
/// initiate and carry out the execution of the frame.
pub struct FreshFrame<'a> {
    /// The input parameters for the frame.
    params: ActionParams,

    /// The local data associated with this frame.
    frame_local: FrameLocal<'a>,

    /// The call tree node of the caller; `None` for the top-level frame.
    parent_tx: Option<usize>,
}

impl<'a> FreshFrame<'a> {
    pub fn new(
        params: ActionParams, env: &'a Env, machine: &'a Machine,
        spec: &'a Spec, deadline: &'a Deadline, depth: usize,
        parent_static_flag: bool, parent_tx: Option<usize>,
    ) -> Self {
        let is_create = params.is_create();
        let create_address = is_create.then_some(params.code_address);
        trace!(
            "Executive::{:?}(params={:?}) self.env={:?}, parent_static={}",
            if is_create { "create" } else { "call" },
            params,
            env,
            parent_static_flag,
        );

        let static_flag =
            parent_static_flag || params.call_type == CallType::StaticCall;

        let origin = OriginInfo::from(&params);

        let frame_local = FrameLocal::new(
            env,
            machine,
            spec,
            deadline,
            depth,
            origin,
            create_address,
            static_flag,
        );
        FreshFrame {
            frame_local,
            params,
            parent_tx,
        }
    }

    /// Initializes and executes a frame, along with runtime resources shared
    /// across all frames.
    pub(super) fn init_and_exec(
        self, resources: &mut RuntimeRes<'a>,
    ) -> DbResult<FrameStackAction<'a>> {
        let FreshFrame {
            mut frame_local,
            params,
            parent_tx,
        } = self;
        let is_create = frame_local.create_address.is_some();

        let limit = frame_local.spec.max_depth;
        if frame_local.depth >= limit {
            warn!(
                "call depth {} reaches limit {}",
                frame_local.depth, limit
            );
            return Ok(FrameStackAction::Return(Err(
                Error::CallStackExhausted {
                    depth: frame_local.depth,
                    limit,
                },
            )));
        }

        // Make checkpoint for this frame, callstack is always maintained
        // with checkpoint.
        resources.state.checkpoint();

        let recipient = *frame_local.origin.recipient();
        trace!(
            "enter frame: caller={:?} recipient={:?}",
            resources.callstack.last(),
            recipient
        );
        resources.callstack.push(recipient, is_create);

        let note = if is_create {
            InternalTxNote::Create
        } else {
            InternalTxNote::Call
        };
        let value = match params.value {
            ActionValue::Transfer(value) => value,
            // The top-level value was moved before execution.
            ActionValue::Apparent(value) if parent_tx.is_none() => value,
            ActionValue::Apparent(_) => U256::zero(),
        };
        let data = if is_create {
            params.code.as_deref().cloned().unwrap_or_default()
        } else {
            params.data.clone().unwrap_or_default()
        };
        let tx = InternalTransaction::new(
            note,
            params.sender,
            params.address,
            value,
            params.token,
        )
        .with_data(data);
        frame_local.internal_tx = resources.internal_txs.add(parent_tx, tx);

        // Pre execution: transfer value and init contract.
        let transferred = if is_create {
            init_contract(&params, resources.state)?
        } else {
            transfer_value(&params, resources.state)?
        };
        if !transferred {
            let err = Error::TransferFailed(
                "transfer failed: Validate InternalTransfer error, balance \
                 is not sufficient."
                    .into(),
            );
            return Ok(FrameStackAction::Return(process_return(
                frame_local,
                Err(err),
                resources,
            )));
        }

        let executable = make_executable(&frame_local, params);
        run_executable(executable, frame_local, resources)
    }
}

/// Moves the call value and the token along a message call. Returns `false`
/// if the sender cannot cover them.
fn transfer_value(params: &ActionParams, state: &mut State) -> DbResult<bool> {
    if let ActionValue::Transfer(val) = params.value {
        if !state.transfer_balance(&params.sender, &params.address, &val)? {
            return Ok(false);
        }
        if let Some(token) = params.token {
            return state.transfer_token(
                &params.sender,
                &params.address,
                token.id,
                &token.amount,
            );
        }
    }
    Ok(true)
}

/// Registers the contract of a `CREATE` and moves the endowment to it. The
/// top-level deployment is initialized before execution and arrives with an
/// apparent value.
fn init_contract(params: &ActionParams, state: &mut State) -> DbResult<bool> {
    let val = match params.value {
        ActionValue::Transfer(val) => val,
        ActionValue::Apparent(_) => return Ok(true),
    };
    // It is possible to first send money to a pre-calculated contract
    // address.
    let prev_balance = state.balance(&params.address)?;
    state.create_account(&params.address, AccountType::Contract);
    state.add_balance(&params.address, &prev_balance)?;
    state.create_contract(SmartContract {
        origin_address: params.sender,
        contract_address: params.address,
        consume_user_resource_percent: ONE_HUNDRED,
        ..Default::default()
    });
    state.transfer_balance(&params.sender, &params.address, &val)
}
