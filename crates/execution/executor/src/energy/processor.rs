// Copyright 2020 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use primitives::Account;
use tvm_parameters::energy::{
    TRX_PRECISION, USAGE_PRECISION, WINDOW_SIZE_SLOTS,
};
use tvm_statedb::{
    global_params::{TotalEnergyLimit, TotalEnergyWeight},
    Result as DbResult, StateDb,
};
use tvm_types::{u256_to_u64_saturated, U256};

/// The resource-accounting collaborator of the energy limit computation.
pub trait ResourceProvider {
    /// The energy the frozen balance of `account` grants over one recovery
    /// window.
    fn global_energy_limit(&self, account: &Account) -> u64;

    /// The part of the frozen allowance not yet consumed at `now_slot`.
    fn leftover_frozen_energy(&self, account: &Account, now_slot: u64) -> u64;

    /// Sum of the frozen-for-energy weight of all accounts.
    fn total_energy_weight(&self) -> u64;
}

/// Converts frozen balance into an energy allowance that recovers linearly
/// over `WINDOW_SIZE_SLOTS`. All arithmetic is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyProcessor {
    total_energy_weight: u64,
    total_energy_limit: u64,
}

impl EnergyProcessor {
    pub fn new(total_energy_weight: u64, total_energy_limit: u64) -> Self {
        EnergyProcessor {
            total_energy_weight,
            total_energy_limit,
        }
    }

    /// Loads the network-wide totals from the durable store.
    pub fn from_db(db: &StateDb) -> DbResult<Self> {
        let weight = db.get_global_param::<TotalEnergyWeight>()?;
        let limit = db.get_global_param::<TotalEnergyLimit>()?;
        Ok(Self::new(
            u256_to_u64_saturated(&weight),
            u256_to_u64_saturated(&limit),
        ))
    }

    pub fn total_energy_limit(&self) -> u64 { self.total_energy_limit }

    /// The usage of `account` at `now_slot` once the recovery since its last
    /// consumption is applied.
    pub fn recovered_usage(&self, account: &Account, now_slot: u64) -> u64 {
        increase(
            account.energy_usage,
            0,
            account.latest_consume_time_for_energy,
            now_slot,
        )
    }

    /// Records `energy` consumed from the frozen allowance at `now_slot`.
    pub fn use_energy(
        &self, account: &mut Account, energy: u64, now_slot: u64,
    ) {
        account.energy_usage = increase(
            account.energy_usage,
            energy,
            account.latest_consume_time_for_energy,
            now_slot,
        );
        account.latest_consume_time_for_energy = now_slot;
    }
}

impl ResourceProvider for EnergyProcessor {
    fn global_energy_limit(&self, account: &Account) -> u64 {
        if self.total_energy_weight == 0 {
            return 0;
        }
        let weight =
            account.frozen_for_energy.amount / U256::from(TRX_PRECISION);
        let limit = weight * U256::from(self.total_energy_limit)
            / U256::from(self.total_energy_weight);
        u256_to_u64_saturated(&limit)
    }

    fn leftover_frozen_energy(&self, account: &Account, now_slot: u64) -> u64 {
        self.global_energy_limit(account)
            .saturating_sub(self.recovered_usage(account, now_slot))
    }

    fn total_energy_weight(&self) -> u64 { self.total_energy_weight }
}

fn div_ceil(numerator: U256, denominator: U256) -> U256 {
    (numerator + denominator - U256::one()) / denominator
}

/// Decays `last_usage` recorded at `last_slot` to `now_slot` and adds
/// `usage` on top of it. The decay is rounded half up.
fn increase(last_usage: u64, usage: u64, last_slot: u64, now_slot: u64) -> u64 {
    let precision = U256::from(USAGE_PRECISION);
    let window = U256::from(WINDOW_SIZE_SLOTS);

    let mut average_last_usage =
        div_ceil(U256::from(last_usage) * precision, window);
    let average_usage = div_ceil(U256::from(usage) * precision, window);

    if last_slot != now_slot {
        if last_slot.saturating_add(WINDOW_SIZE_SLOTS) > now_slot {
            let remaining = U256::from(
                WINDOW_SIZE_SLOTS - now_slot.saturating_sub(last_slot),
            );
            average_last_usage = (average_last_usage * remaining
                + window / U256::from(2))
                / window;
        } else {
            average_last_usage = U256::zero();
        }
    }

    let total = (average_last_usage + average_usage) * window / precision;
    u256_to_u64_saturated(&total)
}

#[cfg(test)]
mod tests {
    use super::{increase, EnergyProcessor, ResourceProvider};
    use primitives::{Account, FrozenBalance};
    use std::sync::Arc;
    use tvm_parameters::energy::WINDOW_SIZE_SLOTS;
    use tvm_statedb::{
        global_params::{TotalEnergyLimit, TotalEnergyWeight},
        InMemoryStorage, StateDb,
    };
    use tvm_types::{Address, U256};

    fn frozen_account(frozen: u64) -> Account {
        Account {
            frozen_for_energy: FrozenBalance {
                amount: U256::from(frozen),
                expire_time: 0,
            },
            ..Account::new_with_balance(Address::from([1u8; 20]), U256::zero())
        }
    }

    #[test]
    fn test_global_limit_is_proportional() {
        let processor = EnergyProcessor::new(10_000, 10_000_000);
        assert_eq!(
            processor.global_energy_limit(&frozen_account(10_000_000_000)),
            10_000_000
        );
        assert_eq!(
            processor.global_energy_limit(&frozen_account(2_500_000_000)),
            2_500_000
        );
        // Less than one unit of weight grants nothing.
        assert_eq!(processor.global_energy_limit(&frozen_account(999_999)), 0);

        let empty_network = EnergyProcessor::new(0, 10_000_000);
        assert_eq!(
            empty_network.global_energy_limit(&frozen_account(10_000_000_000)),
            0
        );
    }

    #[test]
    fn test_usage_recovers_over_window() {
        let processor = EnergyProcessor::new(10_000, 10_000_000);
        let mut account = frozen_account(10_000_000_000);

        processor.use_energy(&mut account, 4_000_000, 100);
        assert_eq!(account.latest_consume_time_for_energy, 100);
        assert_eq!(processor.recovered_usage(&account, 100), 4_000_000);
        assert_eq!(processor.leftover_frozen_energy(&account, 100), 6_000_000);

        // Half a window later half of the usage has recovered.
        let half = 100 + WINDOW_SIZE_SLOTS / 2;
        assert_eq!(processor.recovered_usage(&account, half), 2_000_000);
        assert_eq!(processor.leftover_frozen_energy(&account, half), 8_000_000);

        let full = 100 + WINDOW_SIZE_SLOTS;
        assert_eq!(processor.recovered_usage(&account, full), 0);
        assert_eq!(
            processor.leftover_frozen_energy(&account, full),
            10_000_000
        );
    }

    #[test]
    fn test_usage_accumulates_in_same_slot() {
        assert_eq!(increase(0, 0, 0, 0), 0);
        assert_eq!(increase(1_000, 500, 7, 7), 1_500);
        // Usage never exceeds the allowance-derived leftover floor of zero.
        let processor = EnergyProcessor::new(10_000, 10_000_000);
        let mut account = frozen_account(10_000_000_000);
        processor.use_energy(&mut account, 25_000_000, 3);
        assert_eq!(processor.leftover_frozen_energy(&account, 3), 0);
    }

    #[test]
    fn test_from_db() {
        let db = StateDb::new(Arc::new(InMemoryStorage::new()));
        db.set_global_param::<TotalEnergyWeight>(&U256::from(10_000))
            .unwrap();
        db.set_global_param::<TotalEnergyLimit>(&U256::from(10_000_000))
            .unwrap();
        let processor = EnergyProcessor::from_db(&db).unwrap();
        assert_eq!(processor, EnergyProcessor::new(10_000, 10_000_000));
        assert_eq!(processor.total_energy_weight(), 10_000);
        assert_eq!(processor.total_energy_limit(), 10_000_000);
    }
}
