// Copyright 2020 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{EnergyLimitPolicy, EnergyProcessor, FeeContext};
use primitives::{Account, FrozenBalance, SmartContract};
use proptest::prelude::*;
use tvm_types::{Address, U256};
use vm::Spec;

const PRICE: u64 = 1_000;

fn processor() -> EnergyProcessor { EnergyProcessor::new(10_000, 10_000_000) }

fn account(seed: u8, balance: u64, frozen: u64) -> Account {
    Account {
        frozen_for_energy: FrozenBalance {
            amount: U256::from(frozen),
            expire_time: 0,
        },
        ..Account::new_with_balance(Address::from([seed; 20]), balance.into())
    }
}

fn fee(fee_limit: u64, call_value: u64) -> FeeContext {
    FeeContext {
        fee_limit,
        call_value,
        energy_price: PRICE,
        now_slot: 0,
    }
}

fn contract(
    creator: &Account, percent: i64, origin_limit: i64,
) -> SmartContract {
    SmartContract {
        origin_address: creator.address,
        contract_address: Address::from([0xcc; 20]),
        consume_user_resource_percent: percent,
        origin_energy_limit: origin_limit,
        ..Default::default()
    }
}

#[test]
fn test_policy_follows_hard_fork() {
    let mut spec = Spec::genesis_spec();
    assert_eq!(
        EnergyLimitPolicy::from_spec(&spec),
        EnergyLimitPolicy::FloatRatio
    );
    spec.energy_limit_hard_fork = true;
    assert_eq!(
        EnergyLimitPolicy::from_spec(&spec),
        EnergyLimitPolicy::FixRatio
    );
}

#[test]
fn test_account_limit_without_frozen() {
    let caller = account(1, 30_000_000_000, 0);
    let limit = EnergyLimitPolicy::FixRatio.account_energy_limit(
        &processor(),
        &caller,
        &fee(10_000_000_000, 100),
    );
    assert_eq!(limit, 10_000_000);
}

#[test]
fn test_account_limit_with_frozen() {
    // 30_000_000_000 balance after freezing 10_000_000_000 for energy and
    // spending on other resources.
    let caller = account(1, 10_010_000_000, 10_000_000_000);
    let limit = EnergyLimitPolicy::FixRatio.account_energy_limit(
        &processor(),
        &caller,
        &fee(30_000_000_000, 100),
    );
    assert_eq!(limit, 20_009_999);

    // Bounded by the fee limit otherwise.
    let limit = EnergyLimitPolicy::FixRatio.account_energy_limit(
        &processor(),
        &caller,
        &fee(10_000_000_000, 100),
    );
    assert_eq!(limit, 10_000_000);
}

#[test]
fn test_account_limit_call_value_exceeds_balance() {
    let caller = account(1, 50, 0);
    let limit = EnergyLimitPolicy::FixRatio.account_energy_limit(
        &processor(),
        &caller,
        &fee(10_000_000_000, 100),
    );
    assert_eq!(limit, 0);
}

#[test]
fn test_total_limit_same_creator() {
    let caller = account(1, 30_000_000_000, 0);
    let contract = contract(&caller, 0, 10_000_000);
    for policy in [EnergyLimitPolicy::FixRatio, EnergyLimitPolicy::FloatRatio] {
        let total = policy.total_energy_limit(
            &processor(),
            &caller,
            &caller,
            &contract,
            &fee(10_000_000_000, 100),
        );
        let single = policy.account_energy_limit(
            &processor(),
            &caller,
            &fee(10_000_000_000, 100),
        );
        assert_eq!(total, single);
    }
}

#[test]
fn test_total_limit_zero_percent() {
    let caller = account(1, 30_000_000_000, 0);
    let creator = account(2, 0, 10_000_000_000);
    let fee = fee(10_000_000_000, 100);

    let capped = contract(&creator, 0, 5_000_000);
    assert_eq!(
        EnergyLimitPolicy::FixRatio.total_energy_limit(
            &processor(),
            &creator,
            &caller,
            &capped,
            &fee
        ),
        15_000_000
    );

    let generous = contract(&creator, 0, 20_000_000);
    assert_eq!(
        EnergyLimitPolicy::FixRatio.total_energy_limit(
            &processor(),
            &creator,
            &caller,
            &generous,
            &fee
        ),
        20_000_000
    );

    // The creator's share does not depend on the caller's limit.
    let poor_caller = account(3, 1_000_000, 0);
    assert_eq!(
        EnergyLimitPolicy::FixRatio.total_energy_limit(
            &processor(),
            &creator,
            &poor_caller,
            &capped,
            &fee
        ),
        999 + 5_000_000
    );
}

#[test]
fn test_total_limit_split() {
    let caller = account(1, 30_000_000_000, 0);
    let creator = account(2, 0, 10_000_000_000);
    let fee = fee(10_000_000_000, 100);
    let total = |percent, origin_limit| {
        EnergyLimitPolicy::FixRatio.total_energy_limit(
            &processor(),
            &creator,
            &caller,
            &contract(&creator, percent, origin_limit),
            &fee,
        )
    };

    assert_eq!(total(50, 5_000_000), 15_000_000);
    assert_eq!(total(50, 20_000_000), 20_000_000);
    // 10_000_000 * 70 / 30 is capped by the creator's leftover.
    assert_eq!(total(30, 50_000_000), 20_000_000);
    assert_eq!(total(90, 50_000_000), 10_000_000 + 1_111_111);
    // The caller bears the whole cost.
    assert_eq!(total(100, 50_000_000), 10_000_000);
}

#[test]
fn test_float_ratio_account_limit() {
    let caller = account(1, 30_000_000_000, 0);
    assert_eq!(
        EnergyLimitPolicy::FloatRatio.account_energy_limit(
            &processor(),
            &caller,
            &fee(10_000_000_000, 100)
        ),
        10_000_000
    );

    let frozen = account(1, 10_010_000_000, 10_000_000_000);
    assert_eq!(
        EnergyLimitPolicy::FloatRatio.account_energy_limit(
            &processor(),
            &frozen,
            &fee(30_000_000_000, 100)
        ),
        20_009_999
    );

    // The frozen balance covers the fee at its own ratio rather than at the
    // energy price.
    let cheap = FeeContext {
        energy_price: 100,
        ..fee(5_000_000_000, 100)
    };
    assert_eq!(
        EnergyLimitPolicy::FloatRatio.account_energy_limit(
            &processor(),
            &frozen,
            &cheap
        ),
        5_000_000
    );
    assert_eq!(
        EnergyLimitPolicy::FixRatio.account_energy_limit(
            &processor(),
            &frozen,
            &cheap
        ),
        50_000_000
    );
}

#[test]
fn test_float_ratio_total_limit() {
    let caller = account(1, 30_000_000_000, 0);
    let creator = account(2, 0, 10_000_000_000);
    let fee = fee(10_000_000_000, 100);
    let total = |percent| {
        EnergyLimitPolicy::FloatRatio.total_energy_limit(
            &processor(),
            &creator,
            &caller,
            &contract(&creator, percent, 1),
            &fee,
        )
    };

    assert_eq!(total(0), 20_000_000);
    assert_eq!(total(50), 20_000_000);
    assert_eq!(total(60), 16_666_666);
    assert_eq!(total(100), 10_000_000);
}

proptest! {
    #[test]
    fn account_limit_is_monotonic(
        balance in 0u64..1_000_000_000_000_000,
        frozen in 0u64..100_000_000_000_000,
        extra_frozen in 0u64..100_000_000_000_000,
        fee_limit in 0u64..100_000_000_000,
        extra_fee in 0u64..100_000_000_000,
        value_share in 0u64..=1_000,
        extra_value_share in 0u64..=1_000,
    ) {
        let policy = EnergyLimitPolicy::FixRatio;
        let processor = processor();
        let call_value = balance / 1_000 * value_share;
        let more_value = call_value
            .saturating_add(balance / 1_000 * extra_value_share)
            .min(balance);

        let base = policy.account_energy_limit(
            &processor,
            &account(1, balance, frozen),
            &fee(fee_limit, call_value),
        );

        let more_fee = policy.account_energy_limit(
            &processor,
            &account(1, balance, frozen),
            &fee(fee_limit + extra_fee, call_value),
        );
        prop_assert!(more_fee >= base);

        let more_frozen = policy.account_energy_limit(
            &processor,
            &account(1, balance, frozen + extra_frozen),
            &fee(fee_limit, call_value),
        );
        prop_assert!(more_frozen >= base);

        let less_balance = policy.account_energy_limit(
            &processor,
            &account(1, balance, frozen),
            &fee(fee_limit, more_value),
        );
        prop_assert!(less_balance <= base);
    }
}
