// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use primitives::BlockNumber;
use tvm_parameters::{
    energy::{DEFAULT_SUN_PER_ENERGY, ENERGY_LIMIT_IN_CONSTANT_TX},
    vm::{
        DEFAULT_DEADLINE_CHECK_INTERVAL, DEFAULT_MAX_CALL_DEPTH,
        DEFAULT_MAX_CPU_TIME_OF_ONE_TX, DEFAULT_MAX_FEE_LIMIT,
        DEFAULT_MAX_TIME_RATIO, DEFAULT_MIN_TIME_RATIO,
    },
};
use vm::Spec;

#[derive(Debug, Clone)]
pub struct CommonParams {
    /// Sun per energy unit. Zero falls back to the default price.
    pub energy_fee: u64,
    /// Upper bound of the fee limit of a transaction, in sun.
    pub max_fee_limit: i64,
    /// Nominal CPU time of one transaction, in milliseconds.
    pub max_cpu_time_of_one_tx: u64,
    /// Budget factor for a transaction recorded as out of time.
    pub min_time_ratio: f64,
    /// Budget factor when validating a block produced elsewhere.
    pub max_time_ratio: f64,
    pub max_call_depth: usize,
    pub deadline_check_interval: u64,
    /// Energy granted to a constant call.
    pub constant_call_energy_limit: u64,
    /// Set of transition block numbers.
    pub transition_numbers: TransitionsBlockNumber,
}

#[derive(Default, Debug, Clone)]
pub struct TransitionsBlockNumber {
    /// Contract deployment and invocation are accepted.
    pub vm_enabled: BlockNumber,
    /// Energy limits switch to the fixed-ratio policy.
    pub energy_limit_fix_ratio: BlockNumber,
    /// Secondary assets can move along calls.
    pub transfer_trc10: BlockNumber,
    pub constantinople: BlockNumber,
    pub istanbul: BlockNumber,
    /// Deployed code starting with `0xEF` is rejected.
    pub london: BlockNumber,
}

impl TransitionsBlockNumber {
    /// No transition ever activates.
    pub fn never() -> Self {
        TransitionsBlockNumber {
            vm_enabled: BlockNumber::MAX,
            energy_limit_fix_ratio: BlockNumber::MAX,
            transfer_trc10: BlockNumber::MAX,
            constantinople: BlockNumber::MAX,
            istanbul: BlockNumber::MAX,
            london: BlockNumber::MAX,
        }
    }
}

impl Default for CommonParams {
    fn default() -> Self {
        CommonParams {
            energy_fee: DEFAULT_SUN_PER_ENERGY,
            max_fee_limit: DEFAULT_MAX_FEE_LIMIT,
            max_cpu_time_of_one_tx: DEFAULT_MAX_CPU_TIME_OF_ONE_TX,
            min_time_ratio: DEFAULT_MIN_TIME_RATIO,
            max_time_ratio: DEFAULT_MAX_TIME_RATIO,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            deadline_check_interval: DEFAULT_DEADLINE_CHECK_INTERVAL,
            constant_call_energy_limit: ENERGY_LIMIT_IN_CONSTANT_TX,
            transition_numbers: Default::default(),
        }
    }
}

impl CommonParams {
    pub fn spec(&self, number: BlockNumber) -> Spec {
        let transitions = &self.transition_numbers;
        let mut spec = Spec::genesis_spec();
        spec.max_depth = self.max_call_depth;
        spec.deadline_check_interval = self.deadline_check_interval;
        spec.constant_call_energy_limit = self.constant_call_energy_limit;
        spec.energy_fee = self.energy_fee;
        spec.max_fee_limit = self.max_fee_limit;
        spec.max_cpu_time_of_one_tx = self.max_cpu_time_of_one_tx;
        spec.min_time_ratio = self.min_time_ratio;
        spec.max_time_ratio = self.max_time_ratio;

        spec.vm_enabled = number >= transitions.vm_enabled;
        spec.energy_limit_hard_fork =
            number >= transitions.energy_limit_fix_ratio;
        spec.allow_tvm_transfer_trc10 = number >= transitions.transfer_trc10;
        spec.allow_tvm_constantinople = number >= transitions.constantinople;
        spec.allow_tvm_istanbul = number >= transitions.istanbul;
        spec.allow_tvm_london = number >= transitions.london;
        spec
    }
}
