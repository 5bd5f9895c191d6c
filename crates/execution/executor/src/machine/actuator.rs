// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::payload::{FreezeBalanceContract, TransferContract};
use crate::{
    error::{ExecutorError, Result},
    state::State,
};
use primitives::BuiltInOperation;
use tvm_parameters::energy::TRX_PRECISION;
use tvm_types::U256;
use vm::Env;

pub const TRANSFER_KIND: u32 = 1;
pub const FREEZE_BALANCE_KIND: u32 = 11;

const FROZEN_DURATION_DAYS: u64 = 3;
const MS_PER_DAY: u64 = 86_400_000;

/// A built-in operation served without bytecode. `validate` must not touch
/// the state; `execute` runs against the overlay of the transaction.
pub trait Actuator: Send + Sync {
    fn validate(&self, op: &BuiltInOperation, state: &State) -> Result<()>;

    fn execute(
        &self, op: &BuiltInOperation, state: &mut State, env: &Env,
    ) -> Result<()>;
}

fn decode_payload<T: rlp::Decodable>(op: &BuiltInOperation) -> Result<T> {
    rlp::decode(&op.payload).map_err(|e| {
        ExecutorError::validation(format!("Invalid operation payload: {}", e))
    })
}

pub struct TransferActuator;

impl Actuator for TransferActuator {
    fn validate(&self, op: &BuiltInOperation, state: &State) -> Result<()> {
        let transfer: TransferContract = decode_payload(op)?;
        if transfer.amount == 0 {
            return Err(ExecutorError::validation(
                "Amount must be greater than 0.",
            ));
        }
        if transfer.to_address == op.owner_address {
            return Err(ExecutorError::validation(
                "Cannot transfer TRX to yourself.",
            ));
        }
        let owner = state.account(&op.owner_address)?.ok_or_else(|| {
            ExecutorError::validation(
                "Validate TransferContract error, no OwnerAccount.",
            )
        })?;
        if owner.balance < U256::from(transfer.amount) {
            return Err(ExecutorError::validation(format!(
                "Validate TransferContract error, balance is not sufficient: \
                 balance[{}], amount[{}].",
                owner.balance, transfer.amount
            )));
        }
        Ok(())
    }

    fn execute(
        &self, op: &BuiltInOperation, state: &mut State, _env: &Env,
    ) -> Result<()> {
        let transfer: TransferContract = decode_payload(op)?;
        let moved = state.transfer_balance(
            &op.owner_address,
            &transfer.to_address,
            &U256::from(transfer.amount),
        )?;
        if !moved {
            return Err(ExecutorError::Execution(
                "balance is not sufficient.".into(),
            ));
        }
        Ok(())
    }
}

/// Locks balance for energy. The locked amount adds to the network-wide
/// energy weight in units of `TRX_PRECISION`.
pub struct FreezeBalanceActuator;

impl Actuator for FreezeBalanceActuator {
    fn validate(&self, op: &BuiltInOperation, state: &State) -> Result<()> {
        let freeze: FreezeBalanceContract = decode_payload(op)?;
        let owner = state.account(&op.owner_address)?.ok_or_else(|| {
            ExecutorError::validation(format!(
                "Account[{:?}] not exists",
                op.owner_address
            ))
        })?;
        if freeze.frozen_balance < TRX_PRECISION {
            return Err(ExecutorError::validation(
                "frozenBalance must be more than 1TRX",
            ));
        }
        if U256::from(freeze.frozen_balance) > owner.balance {
            return Err(ExecutorError::validation(
                "frozenBalance must be less than accountBalance",
            ));
        }
        if freeze.frozen_duration != FROZEN_DURATION_DAYS {
            return Err(ExecutorError::validation(format!(
                "frozenDuration must be {} days",
                FROZEN_DURATION_DAYS
            )));
        }
        Ok(())
    }

    fn execute(
        &self, op: &BuiltInOperation, state: &mut State, env: &Env,
    ) -> Result<()> {
        let freeze: FreezeBalanceContract = decode_payload(op)?;
        let mut owner = state.account(&op.owner_address)?.ok_or_else(|| {
            ExecutorError::Execution("owner account vanished".into())
        })?;
        let amount = U256::from(freeze.frozen_balance);

        owner.balance = owner.balance.checked_sub(amount).ok_or_else(|| {
            ExecutorError::Execution("balance is not sufficient.".into())
        })?;
        owner.frozen_for_energy.amount += amount;
        owner.frozen_for_energy.expire_time = env
            .timestamp
            .saturating_mul(1000)
            .saturating_add(freeze.frozen_duration * MS_PER_DAY);
        state.set_account(owner);
        state.add_total_energy_weight(freeze.frozen_balance / TRX_PRECISION);
        Ok(())
    }
}
