// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{FrameLocal, RuntimeRes};
use crate::substate::Substate;

use tvm_types::Address;
use tvm_vm_interpreter::FinalizationResult;
use vm::ReturnData;

/// Processes the result of a frame's execution and updates the state and
/// resources accordingly.
pub(super) fn process_return<'a>(
    frame_local: FrameLocal<'a>, result: vm::Result<FinalizationResult>,
    resources: &mut RuntimeRes<'a>,
) -> FrameResult {
    let internal_tx = frame_local.internal_tx;
    let frame_result =
        result.map(|result| FrameReturn::new(frame_local, result));

    let apply_state = frame_result.as_ref().map_or(false, |r| r.apply_state);

    if apply_state {
        resources.state.discard_checkpoint();
    } else {
        resources.state.revert_to_checkpoint();
        resources.internal_txs.reject(internal_tx);
    }

    if let Err(err) = &frame_result {
        debug!("frame {} failed: {}", internal_tx, err);
    }

    resources.callstack.pop();

    frame_result
}

/// The result of executing a frame
pub type FrameResult = vm::Result<FrameReturn>;

/// The result of executing a frame on a successful complete or an expected
/// revert.
#[derive(Debug)]
pub struct FrameReturn {
    /// Final amount of energy left.
    pub energy_left: u64,

    /// Apply execution state changes or revert them.
    pub apply_state: bool,

    /// Return data buffer.
    pub return_data: ReturnData,

    /// The address of a newly created contract, if applicable.
    pub create_address: Option<Address>,

    /// Changes produced during execution for post-execution logic, if
    /// `apply_state` is true.
    pub substate: Option<Substate>,
}

impl Into<FinalizationResult> for FrameReturn {
    fn into(self) -> FinalizationResult {
        FinalizationResult {
            energy_left: self.energy_left,
            apply_state: self.apply_state,
            return_data: self.return_data,
        }
    }
}

impl FrameReturn {
    fn new(frame_local: FrameLocal, result: FinalizationResult) -> Self {
        let substate;
        let create_address;
        if result.apply_state {
            substate = Some(frame_local.substate);
            create_address = frame_local.create_address;
        } else {
            substate = None;
            create_address = None;
        };
        FrameReturn {
            energy_left: result.energy_left,
            apply_state: result.apply_state,
            return_data: result.return_data,
            create_address,
            substate,
        }
    }
}
