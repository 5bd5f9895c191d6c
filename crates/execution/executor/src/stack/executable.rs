// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{FrameLocal, Resumable};
use crate::context::Context;
use tvm_statedb::Result as DbResult;
use tvm_vm_interpreter::{FinalizationResult, Finalize};
use vm::{
    separate_out_db_error, ActionParams, Exec, GasLeft, ReturnData, TrapError,
    TrapResult,
};

/// `Executable` is a trait representing an object that can be executed within a
/// frame.
///
/// There are generally two ways to create an `Executable`:
/// 1. In a new frame, an `Executable` is created by the `make_executable`
/// function, which uses the frame's input parameters (`ActionParams`) and
/// local information (`FrameLocal`) to determine the appropriate executable
/// action.
/// 2. After the completion of a frame's execution, an `Executable` may
/// be created by the its caller frame's `Resumer` (implementing the `Resumable`
/// trait) based on the execution results.
pub trait Executable: Send {
    fn execute(self: Box<Self>, context: Context)
        -> DbResult<ExecutableOutcome>;
}

/// The possible outcomes of an `Executable`'s execution within a frame. It
/// encapsulates either the final result of the frame's execution or the
/// parameters needed for invoking the next level frame.
pub enum ExecutableOutcome {
    /// The result of the frame's execution.
    Return(vm::Result<FinalizationResult>),
    /// The parameters for invoking the next frame and a resumable object for
    /// the current frame.
    Invoke(ActionParams, Box<dyn Resumable>),
}
use ExecutableOutcome::*;

/// Constructs an executable object from a frame's local information and input
/// parameters: the interpreter when there is code to run, a plain transfer
/// otherwise.
pub fn make_executable<'a>(
    frame_local: &FrameLocal<'a>, params: ActionParams,
) -> Box<dyn 'a + Executable> {
    let is_create = frame_local.create_address.is_some();

    if is_create || params.code.is_some() {
        trace!("CallCreate");
        let factory = frame_local.machine.vm_factory_ref();
        Box::new(factory.create(params, frame_local.spec, frame_local.depth))
    } else {
        trace!("Transfer");
        Box::new(NoopExec {
            energy: params.energy,
        })
    }
}

impl Executable for Box<dyn Exec> {
    fn execute(
        self: Box<Self>, mut context: Context,
    ) -> DbResult<ExecutableOutcome> {
        Ok(match self.exec(&mut context) {
            TrapResult::Return(result) => {
                let result = separate_out_db_error(result)?;
                // A constructor which stops without returning code still
                // creates an (empty) contract.
                if matches!(result, Ok(GasLeft::Known(_))) {
                    context.insert_create_address_to_substate();
                }
                Return(result.finalize(context))
            }
            TrapResult::SubCallCreate(TrapError::Call(params, resume)) => {
                Invoke(params, Box::new(resume))
            }
            TrapResult::SubCallCreate(TrapError::Create(params, resume)) => {
                Invoke(params, Box::new(resume))
            }
        })
    }
}

pub struct NoopExec {
    pub energy: u64,
}

impl Executable for NoopExec {
    fn execute(self: Box<Self>, _: Context) -> DbResult<ExecutableOutcome> {
        let result = FinalizationResult {
            energy_left: self.energy,
            apply_state: true,
            return_data: ReturnData::empty(),
        };
        Ok(Return(Ok(result)))
    }
}
