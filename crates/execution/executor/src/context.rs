// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

// Transaction execution environment.
use crate::{
    stack::{
        CallFrameArena, CreateNonce, FrameLocal, InternalTransaction,
        InternalTxNote, RuntimeRes,
    },
    state::State,
    substate::Substate,
};
use keccak_hash::{keccak, KECCAK_EMPTY};
use primitives::{Bytes, LogEntry};
use std::sync::Arc;
use tvm_parameters::vm::INVALID_CODE_PREFIX;
use tvm_statedb::Result as DbResult;
use tvm_types::{Address, H256, U256};
use vm::{
    ActionParams, ActionValue, CallType, Context as ContextTrait,
    ContractCreateResult, Deadline, Env, Error, MessageCallResult, ReturnData,
    Spec, TokenValue, TrapKind,
};

/// Transaction properties that externalities need to know about.
#[derive(Debug)]
pub struct OriginInfo {
    address: Address,
    /// This is the address of original sender of the transaction.
    origin: Address,
    value: U256,
}

impl OriginInfo {
    /// Populates origin info from action params.
    pub fn from(params: &ActionParams) -> Self {
        OriginInfo {
            address: params.address,
            origin: params.origin,
            value: params.value.value(),
        }
    }

    pub fn recipient(&self) -> &Address { &self.address }
}

pub struct Context<'a> {
    env: &'a Env,
    depth: usize,
    create_address: &'a Option<Address>,
    origin: &'a OriginInfo,
    substate: &'a mut Substate,
    spec: &'a Spec,
    deadline: &'a Deadline,
    static_flag: bool,
    internal_tx: usize,

    state: &'a mut State,
    internal_txs: &'a mut CallFrameArena,
    create_nonce: &'a mut CreateNonce,
}

impl<'a> Context<'a> {
    pub fn new<'b, 'c>(
        frame_local: &'a mut FrameLocal<'b>,
        runtime_resources: &'a mut RuntimeRes<'c>,
    ) -> Self {
        let env = frame_local.env;
        let depth = frame_local.depth;
        let create_address = &frame_local.create_address;
        let origin = &frame_local.origin;
        let substate = &mut frame_local.substate;
        let spec = frame_local.spec;
        let deadline = frame_local.deadline;
        let static_flag = frame_local.static_flag;
        let internal_tx = frame_local.internal_tx;

        let state = &mut *runtime_resources.state;
        let internal_txs = &mut *runtime_resources.internal_txs;
        let create_nonce = &mut *runtime_resources.create_nonce;
        Context {
            env,
            depth,
            create_address,
            origin,
            substate,
            spec,
            deadline,
            static_flag,
            internal_tx,
            state,
            internal_txs,
            create_nonce,
        }
    }

    pub fn insert_create_address_to_substate(&mut self) {
        if let Some(create_address) = self.create_address {
            self.substate.contracts_created.push(*create_address);
        }
    }

    /// Moves every secondary asset of `from` to `to`.
    fn sweep_tokens(&mut self, from: &Address, to: &Address) -> vm::Result<()> {
        let assets = self
            .state
            .account(from)?
            .map(|account| account.assets)
            .unwrap_or_default();
        for asset in assets {
            self.state
                .transfer_token(from, to, asset.token_id, &asset.amount)?;
        }
        Ok(())
    }
}

impl<'a> ContextTrait for Context<'a> {
    fn storage_at(&self, key: &H256) -> vm::Result<U256> {
        self.state
            .storage_at(&self.origin.address, key)
            .map_err(Into::into)
    }

    fn set_storage(&mut self, key: H256, value: U256) -> vm::Result<()> {
        if self.is_static() {
            return Err(Error::MutableCallInStaticContext);
        }
        self.state.set_storage(&self.origin.address, key, value);
        Ok(())
    }

    fn exists(&self, address: &Address) -> vm::Result<bool> {
        self.state.exists(address).map_err(Into::into)
    }

    fn balance(&self, address: &Address) -> vm::Result<U256> {
        self.state.balance(address).map_err(Into::into)
    }

    fn token_balance(
        &self, address: &Address, token_id: u64,
    ) -> vm::Result<U256> {
        self.state
            .token_balance(address, token_id)
            .map_err(Into::into)
    }

    fn blockhash(&mut self, number: &U256) -> H256 {
        // Only the hash of the previous block is maintained. For other block
        // numbers, it always returns zero.
        if number.checked_add(U256::one()) == Some(U256::from(self.env.number))
        {
            self.env.last_hash
        } else {
            H256::default()
        }
    }

    fn create(
        &mut self, energy: u64, value: &U256, code: &[u8],
    ) -> DbResult<::std::result::Result<ContractCreateResult, TrapKind>>
    {
        let address = self.create_nonce.next_address();

        // A nonce-derived address should never be occupied. We still refuse
        // to overwrite a contract that is there.
        if self.state.contract(&address)?.is_some()
            || self.state.code(&address)?.is_some()
        {
            debug!("Contract address conflict!");
            let err = Error::ConflictAddress(address);
            return Ok(Ok(ContractCreateResult::Failed(err)));
        }

        let params = ActionParams {
            code_address: address,
            address,
            sender: self.origin.address,
            origin: self.origin.origin,
            energy,
            value: ActionValue::Transfer(*value),
            token: None,
            data: None,
            call_type: CallType::None,
            ..Default::default()
        }
        .with_code(code.to_vec());

        Ok(Err(TrapKind::Create(params)))
    }

    fn call(
        &mut self, energy: u64, sender_address: &Address,
        receive_address: &Address, value: Option<U256>,
        token: Option<TokenValue>, data: &[u8], code_address: &Address,
        call_type: CallType,
    ) -> DbResult<::std::result::Result<MessageCallResult, TrapKind>>
    {
        trace!(target: "context", "call");

        let code = self.state.code(code_address)?;
        let code_hash =
            code.as_ref().map_or(KECCAK_EMPTY, |code| keccak(&**code));

        let mut params = ActionParams {
            sender: *sender_address,
            address: *receive_address,
            value: ActionValue::Apparent(self.origin.value),
            code_address: *code_address,
            origin: self.origin.origin,
            energy,
            token,
            code,
            code_hash,
            data: Some(data.to_vec()),
            call_type,
        };

        if let Some(value) = value {
            params.value = ActionValue::Transfer(value);
        }

        Ok(Err(TrapKind::Call(params)))
    }

    fn extcode(&self, address: &Address) -> vm::Result<Option<Arc<Bytes>>> {
        Ok(self.state.code(address)?)
    }

    fn extcodesize(&self, address: &Address) -> vm::Result<usize> {
        Ok(self.state.code(address)?.map_or(0, |code| code.len()))
    }

    fn log(&mut self, topics: Vec<H256>, data: &[u8]) -> vm::Result<()> {
        if self.is_static() {
            return Err(Error::MutableCallInStaticContext);
        }

        self.substate.logs.push(LogEntry {
            address: self.origin.address,
            topics,
            data: data.to_vec(),
        });

        Ok(())
    }

    fn ret(
        mut self, energy: u64, data: &ReturnData, apply_state: bool,
    ) -> vm::Result<u64>
    where Self: Sized {
        if self.create_address.is_none() || !apply_state {
            return Ok(energy);
        }

        self.insert_create_address_to_substate();

        if self.spec.allow_tvm_london
            && data.first() == Some(&INVALID_CODE_PREFIX)
        {
            return Err(Error::InvalidCode);
        }

        let return_cost =
            (data.len() as u64).saturating_mul(self.spec.create_data_energy);
        if return_cost > energy {
            return Err(Error::NotEnoughSpendEnergy {
                hint: "save just created contract code",
                need: return_cost,
                left: energy,
            });
        }

        self.state.save_code(&self.origin.address, data.to_vec());
        Ok(energy - return_cost)
    }

    fn suicide(&mut self, refund_address: &Address) -> vm::Result<()> {
        if self.is_static() {
            return Err(Error::MutableCallInStaticContext);
        }

        let contract_address = self.origin.address;
        let balance = self.state.balance(&contract_address)?;

        if *refund_address != contract_address {
            self.state.transfer_balance(
                &contract_address,
                refund_address,
                &balance,
            )?;
            if self.spec.allow_tvm_transfer_trc10 {
                self.sweep_tokens(&contract_address, refund_address)?;
            }
        } else if let Some(mut account) =
            self.state.account(&contract_address)?
        {
            // Beneficiary is the contract itself: the balance is burnt.
            account.balance = U256::zero();
            self.state.set_account(account);
        }

        self.internal_txs.add(
            Some(self.internal_tx),
            InternalTransaction::new(
                InternalTxNote::Suicide,
                contract_address,
                *refund_address,
                balance,
                None,
            ),
        );
        self.substate.suicides.insert(contract_address);
        Ok(())
    }

    fn add_sstore_refund(&mut self, value: u64) {
        self.substate.sstore_refund =
            self.substate.sstore_refund.saturating_add(value);
    }

    fn spec(&self) -> &Spec { self.spec }

    fn env(&self) -> &Env { self.env }

    fn deadline(&self) -> &Deadline { self.deadline }

    fn depth(&self) -> usize { self.depth }

    fn is_static(&self) -> bool { self.static_flag }
}
