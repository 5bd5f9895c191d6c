// Copyright 2020 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Wall-clock budget of one transaction.

use primitives::{BlockContext, ContractResult};
use std::time::{Duration, Instant};
use vm::{Deadline, Spec};

/// The factor applied to `max_cpu_time_of_one_tx`.
///
/// The producer of a block runs with the nominal budget. Validators grant
/// the `max_time_ratio` so that slower machines agree with the producer,
/// unless the producer already recorded the transaction as out of time.
pub fn time_ratio(
    spec: &Spec, block: Option<&BlockContext>,
    recorded: Option<ContractResult>,
) -> f64 {
    let block = match block {
        Some(block) => block,
        None => return 1.0,
    };
    if block.is_producing() {
        1.0
    } else if recorded == Some(ContractResult::OutOfTime) {
        spec.min_time_ratio
    } else {
        spec.max_time_ratio
    }
}

pub fn compute_deadline(
    spec: &Spec, block: Option<&BlockContext>,
    recorded: Option<ContractResult>, now: Instant,
) -> Deadline {
    let ratio = time_ratio(spec, block, recorded);
    let budget_ms = spec.max_cpu_time_of_one_tx as f64 * ratio;
    let budget = Duration::from_micros((budget_ms.max(0.0) * 1000.0) as u64);
    trace!("deadline budget={:?} ratio={}", budget, ratio);
    Deadline::new(now, budget)
}
