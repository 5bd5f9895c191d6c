// Copyright 2015-2018 Parity Technologies (UK) Ltd.
// This file is part of Parity.

// Parity is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Parity is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Parity.  If not, see <http://www.gnu.org/licenses/>.

// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/
use super::stack::Stack;
use crate::instructions::{self, Instruction, InstructionInfo};
use tvm_types::{address_util::AddressUtil, Address, H256, U256};
use vm::{self, Spec};

macro_rules! overflowing {
    ($gasometer:expr, $info:expr, $x:expr) => {{
        let (v, overflow) = $x;
        if overflow {
            return Err($gasometer.out_of_energy($info, u64::MAX));
        }
        v
    }};
}

enum Request {
    Energy(u64),
    EnergyMem(u64, usize),
    EnergyMemProvide(u64, usize, U256),
    EnergyMemCopy(u64, usize, U256),
}

pub struct InstructionRequirements {
    pub energy_cost: u64,
    pub provide_energy: Option<u64>,
    pub memory_total_energy: u64,
    pub memory_required_size: usize,
}

pub struct Gasometer {
    /// Energy granted to the frame.
    pub limit: u64,
    pub current_energy: u64,
    pub current_mem_energy: u64,
}

impl Gasometer {
    pub fn new(current_energy: u64) -> Self {
        Gasometer {
            limit: current_energy,
            current_energy,
            current_mem_energy: 0,
        }
    }

    pub fn used(&self) -> u64 { self.limit.saturating_sub(self.current_energy) }

    pub fn verify_energy(
        &self, instruction: &InstructionInfo, energy_cost: u64,
    ) -> vm::Result<()> {
        if self.current_energy < energy_cost {
            Err(vm::Error::OutOfEnergy {
                instruction: instruction.name,
                limit: self.limit,
                op_energy: energy_cost,
                used: self.used(),
            })
        } else {
            Ok(())
        }
    }

    /// How much energy is provided to a CALL/CREATE, given that you need to
    /// deduct `needed` for this operation and that you `requested` some.
    /// All but one 64th of what is left can be handed on.
    fn energy_provided(&self, needed: u64, requested: Option<U256>) -> u64 {
        let energy_remaining = self.current_energy.saturating_sub(needed);
        let max_energy_provided = energy_remaining - energy_remaining / 64;
        match requested {
            Some(requested) if requested < U256::from(max_energy_provided) => {
                requested.low_u64()
            }
            _ => max_energy_provided,
        }
    }

    /// Determine how much energy is used by the given instruction, given
    /// the machine's state.
    ///
    /// We guarantee that the final element of the returned tuple
    /// (`provided`) will be `Some` iff the `instruction` is one of
    /// `CREATE`, or any of the `CALL` variants. In this case, it will be
    /// the amount of energy that the current context provides to the
    /// child context.
    pub fn requirements(
        &mut self, context: &dyn vm::Context, instruction: Instruction,
        info: &InstructionInfo, stack: &dyn Stack<U256>,
        current_mem_size: usize,
    ) -> vm::Result<InstructionRequirements> {
        let spec = context.spec();
        let tier = info.tier.idx();
        let default_energy = spec.tier_step_energy[tier];

        let cost = match instruction {
            instructions::JUMPDEST => Request::Energy(spec.jumpdest_energy),
            instructions::SSTORE => {
                let address = u256_to_h256(stack.peek(0));
                let newval = stack.peek(1);
                let val = context.storage_at(&address)?;

                let energy = if val.is_zero() && !newval.is_zero() {
                    spec.sstore_set_energy
                } else {
                    spec.sstore_reset_energy
                };
                Request::Energy(energy)
            }
            instructions::SLOAD => Request::Energy(spec.sload_energy),
            instructions::BALANCE | instructions::TOKENBALANCE => {
                Request::Energy(spec.balance_energy)
            }
            instructions::EXTCODESIZE => {
                Request::Energy(spec.extcodesize_energy)
            }
            instructions::SELFDESTRUCT => Request::Energy(spec.suicide_energy),
            instructions::MSTORE | instructions::MLOAD => Request::EnergyMem(
                default_energy,
                mem_needed_const(spec, stack.peek(0), 32)?,
            ),
            instructions::MSTORE8 => Request::EnergyMem(
                default_energy,
                mem_needed_const(spec, stack.peek(0), 1)?,
            ),
            instructions::RETURN | instructions::REVERT => Request::EnergyMem(
                default_energy,
                mem_needed(spec, stack.peek(0), stack.peek(1))?,
            ),
            instructions::SHA3 => {
                let words = to_word_size(stack.peek(1));
                let energy = overflowing!(
                    self,
                    info,
                    spec.sha3_word_energy.overflowing_mul(words)
                );
                let energy = overflowing!(
                    self,
                    info,
                    energy.overflowing_add(spec.sha3_energy)
                );
                Request::EnergyMem(
                    energy,
                    mem_needed(spec, stack.peek(0), stack.peek(1))?,
                )
            }
            instructions::CALLDATACOPY
            | instructions::CODECOPY
            | instructions::RETURNDATACOPY => Request::EnergyMemCopy(
                default_energy,
                mem_needed(spec, stack.peek(0), stack.peek(2))?,
                *stack.peek(2),
            ),
            instructions::EXTCODECOPY => Request::EnergyMemCopy(
                spec.extcodesize_energy,
                mem_needed(spec, stack.peek(1), stack.peek(3))?,
                *stack.peek(3),
            ),
            instructions::LOG0
            | instructions::LOG1
            | instructions::LOG2
            | instructions::LOG3
            | instructions::LOG4 => {
                let no_of_topics = instruction.log_topics().unwrap_or(0) as u64;
                let log_energy =
                    spec.log_energy + spec.log_topic_energy * no_of_topics;

                let data_energy = overflowing!(
                    self,
                    info,
                    stack
                        .peek(1)
                        .overflowing_mul(U256::from(spec.log_data_energy))
                );
                let energy = overflowing!(
                    self,
                    info,
                    data_energy.overflowing_add(U256::from(log_energy))
                );
                if energy > U256::from(u64::MAX) {
                    return Err(self.out_of_energy(info, u64::MAX));
                }
                Request::EnergyMem(
                    energy.low_u64(),
                    mem_needed(spec, stack.peek(0), stack.peek(1))?,
                )
            }
            instructions::CALL => {
                let mut energy = spec.call_energy;
                let has_value = !stack.peek(2).is_zero();
                if has_value {
                    energy += spec.call_value_transfer_energy;
                    let address = Address::from_word(stack.peek(1));
                    if !context.exists(&address)? {
                        energy += spec.call_new_account_energy;
                    }
                }
                let mem = std::cmp::max(
                    mem_needed(spec, stack.peek(5), stack.peek(6))?,
                    mem_needed(spec, stack.peek(3), stack.peek(4))?,
                );
                Request::EnergyMemProvide(energy, mem, *stack.peek(0))
            }
            instructions::DELEGATECALL | instructions::STATICCALL => {
                let mem = std::cmp::max(
                    mem_needed(spec, stack.peek(4), stack.peek(5))?,
                    mem_needed(spec, stack.peek(2), stack.peek(3))?,
                );
                Request::EnergyMemProvide(spec.call_energy, mem, *stack.peek(0))
            }
            instructions::CREATE => Request::EnergyMemProvide(
                spec.create_energy,
                mem_needed(spec, stack.peek(1), stack.peek(2))?,
                U256::MAX,
            ),
            instructions::EXP => {
                let expon = stack.peek(1);
                let bytes = ((expon.bits() + 7) / 8) as u64;
                Request::Energy(spec.exp_energy + spec.exp_byte_energy * bytes)
            }
            instructions::BLOCKHASH => Request::Energy(spec.blockhash_energy),
            _ => Request::Energy(default_energy),
        };

        Ok(match cost {
            Request::Energy(energy) => InstructionRequirements {
                energy_cost: energy,
                provide_energy: None,
                memory_required_size: 0,
                memory_total_energy: self.current_mem_energy,
            },
            Request::EnergyMem(energy, mem_size) => {
                let (mem_energy_cost, new_mem_energy, new_mem_size) =
                    self.mem_energy_cost(spec, current_mem_size, mem_size)?;
                let energy = overflowing!(
                    self,
                    info,
                    energy.overflowing_add(mem_energy_cost)
                );
                InstructionRequirements {
                    energy_cost: energy,
                    provide_energy: None,
                    memory_required_size: new_mem_size,
                    memory_total_energy: new_mem_energy,
                }
            }
            Request::EnergyMemProvide(energy, mem_size, requested) => {
                let (mem_energy_cost, new_mem_energy, new_mem_size) =
                    self.mem_energy_cost(spec, current_mem_size, mem_size)?;
                let energy = overflowing!(
                    self,
                    info,
                    energy.overflowing_add(mem_energy_cost)
                );
                let requested = if instruction == instructions::CREATE {
                    None
                } else {
                    Some(requested)
                };
                let provided = self.energy_provided(energy, requested);
                let total = overflowing!(
                    self,
                    info,
                    energy.overflowing_add(provided)
                );

                InstructionRequirements {
                    energy_cost: total,
                    provide_energy: Some(provided),
                    memory_required_size: new_mem_size,
                    memory_total_energy: new_mem_energy,
                }
            }
            Request::EnergyMemCopy(energy, mem_size, copy) => {
                let (mem_energy_cost, new_mem_energy, new_mem_size) =
                    self.mem_energy_cost(spec, current_mem_size, mem_size)?;
                let copy = to_word_size(&copy);
                let copy_energy = overflowing!(
                    self,
                    info,
                    spec.copy_energy.overflowing_mul(copy)
                );
                let energy = overflowing!(
                    self,
                    info,
                    energy.overflowing_add(copy_energy)
                );
                let energy = overflowing!(
                    self,
                    info,
                    energy.overflowing_add(mem_energy_cost)
                );

                InstructionRequirements {
                    energy_cost: energy,
                    provide_energy: None,
                    memory_required_size: new_mem_size,
                    memory_total_energy: new_mem_energy,
                }
            }
        })
    }

    fn out_of_energy(&self, info: &InstructionInfo, cost: u64) -> vm::Error {
        vm::Error::OutOfEnergy {
            instruction: info.name,
            limit: self.limit,
            op_energy: cost,
            used: self.used(),
        }
    }

    /// Returns the additional charge, the new total memory energy and the
    /// new memory size.
    fn mem_energy_cost(
        &self, spec: &Spec, current_mem_size: usize, mem_size: usize,
    ) -> vm::Result<(u64, u64, usize)> {
        let energy_for_mem = |mem_size: usize| -> vm::Result<u64> {
            let s = (mem_size >> 5) as u128;
            let linear = (spec.memory_energy as u128) * s;
            let quadratic = s * s / (spec.quad_coeff_div as u128);
            let total = linear + quadratic;
            if total > u64::MAX as u128 {
                Err(vm::Error::OutOfMemory {
                    instruction: "MEMORY",
                })
            } else {
                Ok(total as u64)
            }
        };

        let req_mem_size_rounded = ((mem_size + 31) >> 5) << 5;
        let (mem_energy_cost, new_mem_energy) =
            if req_mem_size_rounded > current_mem_size {
                let new_mem_energy = energy_for_mem(req_mem_size_rounded)?;
                (
                    new_mem_energy.saturating_sub(self.current_mem_energy),
                    new_mem_energy,
                )
            } else {
                (0, self.current_mem_energy)
            };

        Ok((
            mem_energy_cost,
            new_mem_energy,
            std::cmp::max(req_mem_size_rounded, current_mem_size),
        ))
    }
}

/// Memory bound of a region; zero-sized regions need no memory. Regions
/// beyond the frame memory limit are an `OutOfMemory` fault.
#[inline]
fn mem_needed_const(spec: &Spec, mem: &U256, add: usize) -> vm::Result<usize> {
    mem_needed(spec, mem, &U256::from(add))
}

#[inline]
fn mem_needed(spec: &Spec, offset: &U256, size: &U256) -> vm::Result<usize> {
    if size.is_zero() {
        return Ok(0);
    }
    let (end, overflow) = offset.overflowing_add(*size);
    if overflow || end > U256::from(spec.memory_limit) {
        return Err(vm::Error::OutOfMemory {
            instruction: "MEMORY",
        });
    }
    Ok(end.low_u64() as usize)
}

pub fn u256_to_h256(value: &U256) -> H256 {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    H256::from(bytes)
}

#[inline]
fn to_word_size(value: &U256) -> u64 {
    if *value > U256::from(u64::MAX - 31) {
        return u64::MAX >> 5;
    }
    (value.low_u64() + 31) >> 5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{instructions::PUSH1, interpreter::stack::VecStack};
    use vm::tests::MockContext;

    #[test]
    fn test_mem_energy_cost() {
        let spec = Spec::new_spec_for_test();
        let gasometer = Gasometer::new(100_000);
        let (cost, total, size) =
            gasometer.mem_energy_cost(&spec, 0, 32).unwrap();
        assert_eq!((cost, total, size), (3, 3, 32));

        // 1024 words: 3 * 1024 + 1024 * 1024 / 512
        let (cost, _, size) =
            gasometer.mem_energy_cost(&spec, 0, 32 * 1024).unwrap();
        assert_eq!(cost, 3072 + 2048);
        assert_eq!(size, 32 * 1024);
    }

    #[test]
    fn test_mem_beyond_limit() {
        let spec = Spec::new_spec_for_test();
        assert!(matches!(
            mem_needed(&spec, &U256::from(spec.memory_limit), &U256::one()),
            Err(vm::Error::OutOfMemory { .. })
        ));
        assert!(matches!(
            mem_needed(&spec, &U256::MAX, &U256::from(2)),
            Err(vm::Error::OutOfMemory { .. })
        ));
        assert_eq!(mem_needed(&spec, &U256::MAX, &U256::zero()).unwrap(), 0);
    }

    #[test]
    fn test_calculate_energy_for_push() {
        let context = MockContext::new();
        let stack = VecStack::<U256>::with_capacity(1);
        let mut gasometer = Gasometer::new(100);
        let requirements = gasometer
            .requirements(&context, PUSH1, PUSH1.info(), &stack, 0)
            .unwrap();
        assert_eq!(requirements.energy_cost, 3);
        assert_eq!(requirements.provide_energy, None);
    }

    #[test]
    fn test_energy_provided_keeps_one_64th() {
        let gasometer = Gasometer::new(6440);
        assert_eq!(gasometer.energy_provided(40, None), 6300);
        assert_eq!(
            gasometer.energy_provided(40, Some(U256::from(100))),
            100
        );
        assert_eq!(
            gasometer.energy_provided(40, Some(U256::MAX)),
            6300
        );
    }
}
