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

//! Cost spec and other parameterisations for the VM.
use tvm_parameters::{energy::*, vm::*};

/// Definition of the cost spec and other parameterisations for the VM.
#[derive(Debug, Clone, PartialEq)]
pub struct Spec {
    /// VM stack limit
    pub stack_limit: usize,
    /// Max number of nested calls/creates
    pub max_depth: usize,
    /// Energy prices for instructions in all tiers
    pub tier_step_energy: [u64; 8],
    /// Energy price for `EXP` opcode
    pub exp_energy: u64,
    /// Additional energy for `EXP` opcode for each byte of exponent
    pub exp_byte_energy: u64,
    /// Energy price for `SHA3` opcode
    pub sha3_energy: u64,
    /// Additional energy for `SHA3` opcode for each word of hashed memory
    pub sha3_word_energy: u64,
    /// Energy price for loading from storage
    pub sload_energy: u64,
    /// Energy price for setting new value to storage (`storage==0`,
    /// `new!=0`)
    pub sstore_set_energy: u64,
    /// Energy price for altering value in storage
    pub sstore_reset_energy: u64,
    /// Energy refund for `SSTORE` clearing (when `storage!=0`, `new==0`)
    pub sstore_refund_energy: u64,
    /// Energy price for `JUMPDEST` opcode
    pub jumpdest_energy: u64,
    /// Energy price for `LOG*`
    pub log_energy: u64,
    /// Additional energy for data in `LOG*`
    pub log_data_energy: u64,
    /// Additional energy for each topic in `LOG*`
    pub log_topic_energy: u64,
    /// Energy price for `CREATE` opcode
    pub create_energy: u64,
    /// Energy price for `*CALL*` opcodes
    pub call_energy: u64,
    /// Stipend for transfer for `CALL` opcode when `value>0`
    pub call_stipend: u64,
    /// Additional energy required for value transfer (`CALL`)
    pub call_value_transfer_energy: u64,
    /// Additional energy for creating new account (`CALL`)
    pub call_new_account_energy: u64,
    /// Energy for used memory
    pub memory_energy: u64,
    /// Coefficient used to convert memory size to energy price for memory
    pub quad_coeff_div: u64,
    /// Cost per byte of deployed code
    pub create_data_energy: u64,
    /// Energy price for copying memory
    pub copy_energy: u64,
    /// Price of EXTCODESIZE
    pub extcodesize_energy: u64,
    /// Price of BALANCE and TOKENBALANCE
    pub balance_energy: u64,
    /// Price of SELFDESTRUCT
    pub suicide_energy: u64,
    /// Blockhash instruction energy cost.
    pub blockhash_energy: u64,
    /// Maximum memory a single frame may expand to.
    pub memory_limit: usize,
    /// Number of instructions between two samples of the deadline clock.
    pub deadline_check_interval: u64,

    /// Energy granted to a constant call.
    pub constant_call_energy_limit: u64,
    /// Price of one energy unit in sun.
    pub energy_fee: u64,
    /// Upper bound of the fee limit of a transaction.
    pub max_fee_limit: i64,
    /// Maximum CPU time of one transaction in milliseconds.
    pub max_cpu_time_of_one_tx: u64,
    pub min_time_ratio: f64,
    pub max_time_ratio: f64,

    /// The committee has opened contract execution.
    pub vm_enabled: bool,
    /// Energy limits are computed with the fixed-ratio policy.
    pub energy_limit_hard_fork: bool,
    /// Secondary assets can be moved along calls.
    pub allow_tvm_transfer_trc10: bool,
    /// Shift instructions, and the caller-only energy limit when the
    /// contract creator no longer exists.
    pub allow_tvm_constantinople: bool,
    /// `SELFBALANCE`.
    pub allow_tvm_istanbul: bool,
    /// Deployed code starting with `0xEF` is rejected.
    pub allow_tvm_london: bool,
}

impl Spec {
    /// The spec of the genesis block. Every feature flag is off.
    pub const fn genesis_spec() -> Spec {
        Spec {
            stack_limit: 1024,
            max_depth: DEFAULT_MAX_CALL_DEPTH,
            tier_step_energy: [0, 2, 3, 5, 8, 10, 20, 0],
            exp_energy: 10,
            exp_byte_energy: 10,
            sha3_energy: 30,
            sha3_word_energy: 6,
            sload_energy: 50,
            sstore_set_energy: 20000,
            sstore_reset_energy: 5000,
            sstore_refund_energy: 15000,
            jumpdest_energy: 1,
            log_energy: 375,
            log_data_energy: 8,
            log_topic_energy: 375,
            create_energy: 32000,
            call_energy: 40,
            call_stipend: 2300,
            call_value_transfer_energy: 9000,
            call_new_account_energy: 25000,
            memory_energy: 3,
            quad_coeff_div: 512,
            create_data_energy: 200,
            copy_energy: 3,
            extcodesize_energy: 20,
            balance_energy: 20,
            suicide_energy: 0,
            blockhash_energy: 20,
            memory_limit: MEMORY_LIMIT,
            deadline_check_interval: DEFAULT_DEADLINE_CHECK_INTERVAL,
            constant_call_energy_limit: ENERGY_LIMIT_IN_CONSTANT_TX,
            energy_fee: DEFAULT_SUN_PER_ENERGY,
            max_fee_limit: DEFAULT_MAX_FEE_LIMIT,
            max_cpu_time_of_one_tx: DEFAULT_MAX_CPU_TIME_OF_ONE_TX,
            min_time_ratio: DEFAULT_MIN_TIME_RATIO,
            max_time_ratio: DEFAULT_MAX_TIME_RATIO,
            vm_enabled: false,
            energy_limit_hard_fork: false,
            allow_tvm_transfer_trc10: false,
            allow_tvm_constantinople: false,
            allow_tvm_istanbul: false,
            allow_tvm_london: false,
        }
    }

    /// Currency units charged per energy unit. A zero fee falls back to the
    /// default price.
    pub fn sun_per_energy(&self) -> u64 {
        if self.energy_fee > 0 {
            self.energy_fee
        } else {
            DEFAULT_SUN_PER_ENERGY
        }
    }

    /// A spec with every feature enabled, as used by tests and tools.
    #[cfg(any(test, feature = "testonly_code"))]
    pub fn new_spec_for_test() -> Spec {
        Spec {
            vm_enabled: true,
            energy_limit_hard_fork: true,
            allow_tvm_transfer_trc10: true,
            allow_tvm_constantinople: true,
            allow_tvm_istanbul: true,
            allow_tvm_london: true,
            ..Self::genesis_spec()
        }
    }
}

#[cfg(any(test, feature = "testonly_code"))]
impl Default for Spec {
    fn default() -> Self { Spec::new_spec_for_test() }
}
