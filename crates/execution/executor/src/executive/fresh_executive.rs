// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    deadline::compute_deadline,
    energy::{EnergyLimitPolicy, EnergyProcessor, FeeContext},
    error::{ExecutorError, Result},
    state::State,
};
use keccak_hash::keccak;
use primitives::{
    Account, AccountType, BlockContext, CreateSmartContract, Operation,
    SignedTransaction, SmartContract, TriggerSmartContract,
};
use std::{sync::Arc, time::Instant};
use tvm_parameters::vm::{CONTRACT_NAME_LENGTH, MIN_TOKEN_ID, ONE_HUNDRED};
use tvm_types::{Address, U256};
use vm::{
    ActionParams, ActionValue, CallType, Deadline, Env, Spec, TokenValue,
};

/// Everything `go()` needs once the preconditions hold. The value transfers
/// of the transaction already happened under `checkpoint`.
#[derive(Debug)]
pub(super) struct PreparedExecution {
    pub params: ActionParams,
    pub energy_limit: u64,
    pub deadline: Deadline,
    pub constant_call: bool,
    /// The transaction carries a call value or a token value.
    pub carries_value: bool,
    pub contract_address: Option<Address>,
    pub checkpoint: usize,
}

pub(super) struct FreshExecutive<'a> {
    tx: &'a SignedTransaction,
    block: Option<&'a BlockContext>,
    state: &'a mut State,
    env: &'a Env,
    spec: &'a Spec,
}

impl<'a> FreshExecutive<'a> {
    pub fn new(
        tx: &'a SignedTransaction, block: Option<&'a BlockContext>,
        state: &'a mut State, env: &'a Env, spec: &'a Spec,
    ) -> Self {
        FreshExecutive {
            tx,
            block,
            state,
            env,
            spec,
        }
    }

    pub fn check_all(self) -> Result<PreparedExecution> {
        if !self.spec.vm_enabled {
            return Err(ExecutorError::validation(
                "vm work is off, need to be opened by the committee",
            ));
        }
        self.check_fee_limit()?;

        let tx = self.tx;
        match &tx.operation {
            Operation::CreateSmartContract(create) => {
                self.check_create(create)
            }
            Operation::TriggerSmartContract(trigger) => {
                self.check_call(trigger)
            }
            Operation::BuiltIn(_) => Err(ExecutorError::validation(
                "not a smart contract transaction",
            )),
        }
    }

    fn check_fee_limit(&self) -> Result<()> {
        let fee_limit = self.tx.fee_limit;
        if fee_limit < 0 || fee_limit > self.spec.max_fee_limit {
            return Err(ExecutorError::validation(format!(
                "feeLimit must be >= 0 and <= {}",
                self.spec.max_fee_limit
            )));
        }
        Ok(())
    }

    /// Before secondary-asset transfer is enabled, both token fields must
    /// be zero.
    fn check_token_value_and_id(
        &self, token_value: i64, token_id: i64,
    ) -> Result<Option<TokenValue>> {
        if token_value < 0 {
            return Err(ExecutorError::validation("tokenValue must be >= 0"));
        }
        if !self.spec.allow_tvm_transfer_trc10 {
            if token_value != 0 || token_id != 0 {
                return Err(ExecutorError::validation(format!(
                    "invalid arguments with tokenValue = {}, tokenId = {}",
                    token_value, token_id
                )));
            }
            return Ok(None);
        }
        if token_id != 0 && token_id <= MIN_TOKEN_ID {
            return Err(ExecutorError::validation(format!(
                "tokenId must be > {}",
                MIN_TOKEN_ID
            )));
        }
        if token_value > 0 && token_id == 0 {
            return Err(ExecutorError::validation(format!(
                "invalid arguments with tokenValue = {}, tokenId = {}",
                token_value, token_id
            )));
        }
        Ok((token_id != 0).then(|| TokenValue {
            id: token_id as u64,
            amount: U256::from(token_value as u64),
        }))
    }

    fn fee_context(&self, call_value: i64) -> FeeContext {
        FeeContext {
            fee_limit: self.tx.fee_limit as u64,
            call_value: call_value as u64,
            energy_price: self.spec.sun_per_energy(),
            now_slot: self.env.slot,
        }
    }

    fn energy_processor(&self) -> EnergyProcessor {
        EnergyProcessor::new(
            self.state.total_energy_weight(),
            self.state.total_energy_limit(),
        )
    }

    fn deadline(&self) -> Deadline {
        compute_deadline(
            self.spec,
            self.block,
            self.tx.contract_ret,
            Instant::now(),
        )
    }

    fn owner_account(&self, owner: &Address) -> Result<Account> {
        self.state.account(owner)?.ok_or_else(|| {
            ExecutorError::validation(format!(
                "Validate contract error, no OwnerAccount[{:?}]",
                owner
            ))
        })
    }

    fn check_create(
        self, create: &CreateSmartContract,
    ) -> Result<PreparedExecution> {
        let contract = &create.new_contract;
        let owner = create.owner_address;

        if owner != contract.origin_address {
            return Err(ExecutorError::IllegalParameter(
                "OwnerAddress is not equals OriginAddress".into(),
            ));
        }
        if contract.name.len() > CONTRACT_NAME_LENGTH {
            return Err(ExecutorError::validation(format!(
                "contractName's length cannot be greater than {}",
                CONTRACT_NAME_LENGTH
            )));
        }
        let percent = contract.consume_user_resource_percent;
        if !(0..=ONE_HUNDRED).contains(&percent) {
            return Err(ExecutorError::validation(
                "percent must be >= 0 and <= 100",
            ));
        }
        if contract.call_value < 0 {
            return Err(ExecutorError::validation("callValue must be >= 0"));
        }
        let token = self.check_token_value_and_id(
            create.call_token_value,
            create.token_id,
        )?;
        if contract.origin_energy_limit <= 0 {
            return Err(ExecutorError::validation(
                "The originEnergyLimit must be > 0",
            ));
        }

        let contract_address = self.tx.contract_address();
        if self.state.exists(&contract_address)?
            || self.state.contract(&contract_address)?.is_some()
        {
            return Err(ExecutorError::validation(format!(
                "Trying to create a contract with existing contract \
                 address: {:?}",
                contract_address
            )));
        }

        let creator = self.owner_account(&owner)?;
        let fee = self.fee_context(contract.call_value);
        let policy = EnergyLimitPolicy::from_spec(self.spec);
        let energy_limit = policy.account_energy_limit(
            &self.energy_processor(),
            &creator,
            &fee,
        );
        let deadline = self.deadline();

        let call_value = U256::from(contract.call_value as u64);
        let params = ActionParams {
            code_address: contract_address,
            code_hash: keccak(&contract.bytecode),
            address: contract_address,
            sender: owner,
            origin: owner,
            energy: energy_limit,
            value: ActionValue::Apparent(call_value),
            token,
            code: Some(Arc::new(contract.bytecode.clone())),
            data: None,
            call_type: CallType::None,
        };
        let carries_value = contract.call_value > 0
            || token.map_or(false, |token| !token.amount.is_zero());

        let state = self.state;
        let checkpoint = state.checkpoint();
        let record = SmartContract {
            contract_address,
            ..contract.clone()
        };
        if let Err(e) = init_new_contract(state, record, &call_value, token) {
            state.revert_to(checkpoint);
            return Err(e);
        }

        Ok(PreparedExecution {
            params,
            energy_limit,
            deadline,
            constant_call: false,
            carries_value,
            contract_address: Some(contract_address),
            checkpoint,
        })
    }

    fn check_call(
        self, trigger: &TriggerSmartContract,
    ) -> Result<PreparedExecution> {
        let contract_address = trigger.contract_address;
        let owner = trigger.owner_address;
        let contract =
            self.state.contract(&contract_address)?.ok_or_else(|| {
                ExecutorError::validation("No contract or not a smart contract")
            })?;

        if trigger.call_value < 0 {
            return Err(ExecutorError::validation("callValue must be >= 0"));
        }
        let token = self.check_token_value_and_id(
            trigger.call_token_value,
            trigger.token_id,
        )?;

        let constant_call = contract.abi.is_constant_call(&trigger.data);
        let energy_limit = if constant_call {
            self.spec.constant_call_energy_limit
        } else {
            let caller = self.owner_account(&owner)?;
            let fee = self.fee_context(trigger.call_value);
            let policy = EnergyLimitPolicy::from_spec(self.spec);
            let processor = self.energy_processor();
            match self.state.account(&contract.origin_address)? {
                None if self.spec.allow_tvm_constantinople => {
                    policy.account_energy_limit(&processor, &caller, &fee)
                }
                creator => {
                    let creator = creator.unwrap_or_else(|| {
                        Account::new(
                            contract.origin_address,
                            AccountType::Normal,
                            vec![],
                        )
                    });
                    policy.total_energy_limit(
                        &processor, &creator, &caller, &contract, &fee,
                    )
                }
            }
        };
        let deadline = self.deadline();

        let code = self.state.code(&contract_address)?;
        let call_value = U256::from(trigger.call_value as u64);
        let params = ActionParams {
            code_address: contract_address,
            code_hash: code.as_ref().map_or_else(
                || keccak_hash::KECCAK_EMPTY,
                |code| keccak(&**code),
            ),
            address: contract_address,
            sender: owner,
            origin: owner,
            energy: energy_limit,
            value: ActionValue::Apparent(call_value),
            token,
            code,
            data: Some(trigger.data.clone()),
            call_type: CallType::Call,
        };
        let carries_value =
            trigger.call_value > 0 || trigger.call_token_value > 0;

        let state = self.state;
        let checkpoint = state.checkpoint();
        // A constant call never moves value; a nonzero value rejects it after
        // execution.
        if !constant_call {
            let transferred = transfer_call_value(
                state,
                &owner,
                &contract_address,
                &call_value,
                token,
            );
            if let Err(e) = transferred {
                state.revert_to(checkpoint);
                return Err(e);
            }
        }

        Ok(PreparedExecution {
            params,
            energy_limit,
            deadline,
            constant_call,
            carries_value,
            contract_address: None,
            checkpoint,
        })
    }
}

/// Registers the account and the contract record of a deployment, then
/// endows it.
fn init_new_contract(
    state: &mut State, contract: SmartContract, call_value: &U256,
    token: Option<TokenValue>,
) -> Result<()> {
    let owner = contract.origin_address;
    let address = contract.contract_address;
    state.create_account(&address, AccountType::Contract);
    if let Some(mut account) = state.account(&address)? {
        account.account_name = contract.name.as_bytes().to_vec();
        state.set_account(account);
    }
    state.create_contract(contract);
    transfer_call_value(state, &owner, &address, call_value, token)
}

fn transfer_call_value(
    state: &mut State, from: &Address, to: &Address, call_value: &U256,
    token: Option<TokenValue>,
) -> Result<()> {
    if !state.transfer_balance(from, to, call_value)? {
        return Err(ExecutorError::validation(
            "Validate InternalTransfer error, balance is not sufficient.",
        ));
    }
    if let Some(token) = token {
        if !state.transfer_token(from, to, token.id, &token.amount)? {
            return Err(ExecutorError::validation(
                "Validate InternalTransfer error, asset balance is not \
                 sufficient.",
            ));
        }
    }
    Ok(())
}
