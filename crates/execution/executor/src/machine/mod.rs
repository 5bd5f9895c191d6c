// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

mod actuator;
mod payload;

pub use actuator::{
    Actuator, FreezeBalanceActuator, TransferActuator, FREEZE_BALANCE_KIND,
    TRANSFER_KIND,
};
pub use payload::{FreezeBalanceContract, TransferContract};

use crate::spec::CommonParams;
use primitives::BlockNumber;
use std::collections::BTreeMap;
use tvm_vm_interpreter::Factory as VmFactory;
use vm::Spec;

/// All the necessities for executing a transaction: the chain parameters,
/// the interpreter factory and the built-in operations.
pub struct Machine {
    params: CommonParams,
    vm_factory: VmFactory,
    actuators: BTreeMap<u32, Box<dyn Actuator>>,
}

impl Machine {
    pub fn new(params: CommonParams, vm_factory: VmFactory) -> Machine {
        Machine {
            params,
            vm_factory,
            actuators: BTreeMap::new(),
        }
    }

    /// A machine with the built-in operations of the chain registered.
    pub fn new_with_builtin(
        params: CommonParams, vm_factory: VmFactory,
    ) -> Machine {
        let mut machine = Machine::new(params, vm_factory);
        machine.register_actuator(TRANSFER_KIND, Box::new(TransferActuator));
        machine.register_actuator(
            FREEZE_BALANCE_KIND,
            Box::new(FreezeBalanceActuator),
        );
        machine
    }

    #[cfg(any(test, feature = "testonly_code"))]
    pub fn new_for_test() -> Machine {
        Machine::new_with_builtin(CommonParams::default(), VmFactory::new(1024))
    }

    pub fn register_actuator(
        &mut self, kind: u32, actuator: Box<dyn Actuator>,
    ) {
        self.actuators.insert(kind, actuator);
    }

    pub fn actuator(&self, kind: u32) -> Option<&dyn Actuator> {
        self.actuators.get(&kind).map(|actuator| &**actuator)
    }

    /// Get the general parameters of the chain.
    pub fn params(&self) -> &CommonParams { &self.params }

    pub fn spec(&self, number: BlockNumber) -> Spec { self.params.spec(number) }

    /// Get a VM factory that can execute on this state.
    pub fn vm_factory(&self) -> VmFactory { self.vm_factory.clone() }

    pub fn vm_factory_ref(&self) -> &VmFactory { &self.vm_factory }
}
