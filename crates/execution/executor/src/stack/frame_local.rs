// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{
    super::context::{Context, OriginInfo},
    RuntimeRes,
};
use crate::{machine::Machine, substate::Substate};

use tvm_types::Address;
use vm::{Deadline, Env, Spec};

/// `FrameLocal` represents the local data associated with a specific call
/// frame. This data is local to the frame and is not visible to other frames
/// in the execution stack.
pub struct FrameLocal<'a> {
    /// A reference to environmental information relevant to the
    /// current execution, such as the block number and block producer.
    pub env: &'a Env,

    /// The depth of the current frame in the call stack.
    pub depth: usize,

    /// The address of the newly deployed contract, if the current frame is for
    /// contract creation.
    pub create_address: Option<Address>,

    /// The caller information for the current frame.
    pub origin: OriginInfo,

    /// Collects changes produced during execution for post-execution logic.
    pub substate: Substate,

    /// All the necessities for executing bytecode.
    pub machine: &'a Machine,

    /// Activated hardfork features and the parameters that may be modified in
    /// hardfork
    pub spec: &'a Spec,

    /// The wall-clock window shared by every frame of the transaction.
    pub deadline: &'a Deadline,

    /// Forbids state modification below a `STATICCALL`.
    pub static_flag: bool,

    /// Index of this frame in the call tree.
    pub internal_tx: usize,
}

impl<'a> FrameLocal<'a> {
    pub fn new(
        env: &'a Env, machine: &'a Machine, spec: &'a Spec,
        deadline: &'a Deadline, depth: usize, origin: OriginInfo,
        create_address: Option<Address>, static_flag: bool,
    ) -> Self {
        FrameLocal {
            env,
            depth,
            origin,
            substate: Substate::new(),
            machine,
            spec,
            deadline,
            create_address,
            static_flag,
            internal_tx: 0,
        }
    }

    /// Creates a `Context` for the current frame, which includes two distinct
    /// parts:
    /// 1. Local frame information - Specific to the current frame and not
    /// visible to others.
    /// 2. Runtime resources - Contains global information like the ledger
    /// state, accessible across frames.
    pub fn make_vm_context<'b, 'c>(
        &'b mut self, resources: &'b mut RuntimeRes<'c>,
    ) -> Context<'b> {
        Context::new(self, resources)
    }
}
