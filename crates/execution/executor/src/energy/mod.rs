// Copyright 2020 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Conversion of frozen stake, balance and the fee limit of a transaction
//! into the energy it may spend.
//!
//! Two policies exist. `FixRatio` is the current one; `FloatRatio` splits
//! the cost by each party's share of frozen stake and is kept for blocks
//! produced before the fix-ratio hard fork. Which one applies is decided by
//! [`Spec::energy_limit_hard_fork`], never by the caller.

mod processor;

#[cfg(test)]
mod tests;

pub use self::processor::{EnergyProcessor, ResourceProvider};

use primitives::{Account, SmartContract};
use tvm_parameters::vm::ONE_HUNDRED;
use tvm_types::{u256_to_u64_saturated, U256};
use vm::Spec;

/// The payment side of an energy limit query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeContext {
    /// The fee limit of the transaction, in sun.
    pub fee_limit: u64,
    /// Call value leaving the caller's balance before execution.
    pub call_value: u64,
    /// Sun per energy unit.
    pub energy_price: u64,
    /// Slot of the enclosing block.
    pub now_slot: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyLimitPolicy {
    FixRatio,
    FloatRatio,
}

impl EnergyLimitPolicy {
    pub fn from_spec(spec: &Spec) -> Self {
        if spec.energy_limit_hard_fork {
            EnergyLimitPolicy::FixRatio
        } else {
            EnergyLimitPolicy::FloatRatio
        }
    }

    /// The energy `account` alone can pay for.
    pub fn account_energy_limit(
        &self, provider: &dyn ResourceProvider, account: &Account,
        fee: &FeeContext,
    ) -> u64 {
        match self {
            EnergyLimitPolicy::FixRatio => {
                fix_ratio_account_limit(provider, account, fee)
            }
            EnergyLimitPolicy::FloatRatio => {
                float_ratio_account_limit(provider, account, fee)
            }
        }
    }

    /// The energy a call to `contract` may spend when `caller` and the
    /// contract's `creator` share the cost.
    pub fn total_energy_limit(
        &self, provider: &dyn ResourceProvider, creator: &Account,
        caller: &Account, contract: &SmartContract, fee: &FeeContext,
    ) -> u64 {
        let caller_limit = self.account_energy_limit(provider, caller, fee);
        if creator.address == caller.address {
            return caller_limit;
        }
        let creator_leftover =
            provider.leftover_frozen_energy(creator, fee.now_slot);
        let percent = contract.consume_user_resource_percent;

        match self {
            EnergyLimitPolicy::FixRatio => {
                let origin_energy_limit =
                    contract.origin_energy_limit.max(0) as u64;
                let creator_cap = creator_leftover.min(origin_energy_limit);
                let creator_limit = if percent <= 0 {
                    creator_cap
                } else if percent < ONE_HUNDRED {
                    let share = U256::from(caller_limit)
                        * U256::from(ONE_HUNDRED - percent)
                        / U256::from(percent);
                    u256_to_u64_saturated(&share).min(creator_cap)
                } else {
                    0
                };
                caller_limit.saturating_add(creator_limit)
            }
            EnergyLimitPolicy::FloatRatio => {
                let percent = percent.clamp(0, ONE_HUNDRED) as u64;
                let creator_weighted =
                    U256::from(creator_leftover) * U256::from(percent);
                let caller_weighted = U256::from(ONE_HUNDRED as u64 - percent)
                    * U256::from(caller_limit);
                if creator_weighted > caller_weighted {
                    let scaled = U256::from(caller_limit)
                        * U256::from(ONE_HUNDRED)
                        / U256::from(percent);
                    u256_to_u64_saturated(&scaled)
                } else {
                    caller_limit.saturating_add(creator_leftover)
                }
            }
        }
    }
}

fn energy_from_balance(account: &Account, fee: &FeeContext) -> u64 {
    let spendable = account
        .balance
        .saturating_sub(U256::from(fee.call_value));
    u256_to_u64_saturated(&(spendable / U256::from(fee.energy_price)))
}

fn fix_ratio_account_limit(
    provider: &dyn ResourceProvider, account: &Account, fee: &FeeContext,
) -> u64 {
    let leftover = provider.leftover_frozen_energy(account, fee.now_slot);
    let available = leftover.saturating_add(energy_from_balance(account, fee));
    let from_fee = fee.fee_limit / fee.energy_price;
    available.min(from_fee)
}

fn float_ratio_account_limit(
    provider: &dyn ResourceProvider, account: &Account, fee: &FeeContext,
) -> u64 {
    let leftover = provider.leftover_frozen_energy(account, fee.now_slot);
    let available = leftover.saturating_add(energy_from_balance(account, fee));

    let frozen = account.frozen_for_energy.amount;
    let allowance = provider.global_energy_limit(account);
    let from_fee = if frozen.is_zero() || allowance == 0 {
        fee.fee_limit / fee.energy_price
    } else {
        // The part of the frozen balance backing the unused allowance.
        let left_balance =
            frozen * U256::from(leftover) / U256::from(allowance);
        let fee_limit = U256::from(fee.fee_limit);
        if left_balance >= fee_limit {
            u256_to_u64_saturated(&(U256::from(allowance) * fee_limit / frozen))
        } else {
            let from_balance =
                (fee_limit - left_balance) / U256::from(fee.energy_price);
            leftover.saturating_add(u256_to_u64_saturated(&from_balance))
        }
    };
    available.min(from_fee)
}
