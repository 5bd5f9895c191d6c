// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;
extern crate tvm_vm_types as vm;

mod evm;
#[macro_use]
pub mod factory;
pub mod instructions;
mod interpreter;

#[cfg(test)]
mod tests;

pub use self::{
    evm::{FinalizationResult, Finalize},
    factory::Factory,
    instructions::{GasPriceTier, INSTRUCTIONS},
    interpreter::SharedCache,
};
