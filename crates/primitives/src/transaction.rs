// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    contract::SmartContract, contract_result::ContractResult, hash::keccak,
    Bytes,
};
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use std::ops::Deref;
use tvm_types::{
    cal_contract_address, Address, CreateContractAddressType, H256,
};

/// Deploys `new_contract`, running its bytecode as the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateSmartContract {
    pub owner_address: Address,
    pub new_contract: SmartContract,
    pub call_token_value: i64,
    pub token_id: i64,
}

/// Calls an existing contract.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriggerSmartContract {
    pub owner_address: Address,
    pub contract_address: Address,
    pub call_value: i64,
    pub data: Bytes,
    pub call_token_value: i64,
    pub token_id: i64,
}

/// An operation served by a registered built-in actuator rather than by
/// bytecode. `kind` selects the actuator.
#[derive(Debug, Clone, PartialEq, Eq, Default, RlpEncodable, RlpDecodable)]
pub struct BuiltInOperation {
    pub owner_address: Address,
    pub kind: u32,
    pub payload: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateSmartContract(CreateSmartContract),
    TriggerSmartContract(TriggerSmartContract),
    BuiltIn(BuiltInOperation),
}

impl Operation {
    pub fn owner_address(&self) -> &Address {
        match self {
            Operation::CreateSmartContract(create) => &create.owner_address,
            Operation::TriggerSmartContract(trigger) => &trigger.owner_address,
            Operation::BuiltIn(op) => &op.owner_address,
        }
    }
}

impl Default for Operation {
    fn default() -> Self {
        Operation::TriggerSmartContract(TriggerSmartContract::default())
    }
}

impl Encodable for CreateSmartContract {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4)
            .append(&self.owner_address)
            .append(&self.new_contract)
            .append(&(self.call_token_value as u64))
            .append(&(self.token_id as u64));
    }
}

impl Decodable for CreateSmartContract {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 4 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(CreateSmartContract {
            owner_address: rlp.val_at(0)?,
            new_contract: rlp.val_at(1)?,
            call_token_value: rlp.val_at::<u64>(2)? as i64,
            token_id: rlp.val_at::<u64>(3)? as i64,
        })
    }
}

impl Encodable for TriggerSmartContract {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(6)
            .append(&self.owner_address)
            .append(&self.contract_address)
            .append(&(self.call_value as u64))
            .append(&self.data)
            .append(&(self.call_token_value as u64))
            .append(&(self.token_id as u64));
    }
}

impl Decodable for TriggerSmartContract {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 6 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(TriggerSmartContract {
            owner_address: rlp.val_at(0)?,
            contract_address: rlp.val_at(1)?,
            call_value: rlp.val_at::<u64>(2)? as i64,
            data: rlp.val_at(3)?,
            call_token_value: rlp.val_at::<u64>(4)? as i64,
            token_id: rlp.val_at::<u64>(5)? as i64,
        })
    }
}

const OPERATION_CREATE: u8 = 0;
const OPERATION_TRIGGER: u8 = 1;
const OPERATION_BUILT_IN: u8 = 2;

impl Encodable for Operation {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(2);
        match self {
            Operation::CreateSmartContract(create) => {
                s.append(&OPERATION_CREATE).append(create)
            }
            Operation::TriggerSmartContract(trigger) => {
                s.append(&OPERATION_TRIGGER).append(trigger)
            }
            Operation::BuiltIn(op) => s.append(&OPERATION_BUILT_IN).append(op),
        };
    }
}

impl Decodable for Operation {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 2 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        match rlp.val_at::<u8>(0)? {
            OPERATION_CREATE => {
                Ok(Operation::CreateSmartContract(rlp.val_at(1)?))
            }
            OPERATION_TRIGGER => {
                Ok(Operation::TriggerSmartContract(rlp.val_at(1)?))
            }
            OPERATION_BUILT_IN => Ok(Operation::BuiltIn(rlp.val_at(1)?)),
            _ => Err(DecoderError::Custom("Unrecognized operation type")),
        }
    }
}

/// The unsigned body of a transaction. Its RLP encoding is the raw byte
/// string that identifies the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    pub operation: Operation,
    /// Maximum fee, in sun, the owner is willing to burn.
    pub fee_limit: i64,
    pub timestamp: u64,
    pub expiration: u64,
    /// Free-form memo.
    pub data: Bytes,
}

impl Transaction {
    pub fn raw_bytes(&self) -> Bytes { rlp::encode(self).to_vec() }

    pub fn hash(&self) -> H256 { keccak(self.raw_bytes()) }

    pub fn owner_address(&self) -> &Address { self.operation.owner_address() }

    pub fn sign(self, signature: Bytes) -> SignedTransaction {
        SignedTransaction::new(self, signature)
    }
}

impl Encodable for Transaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(5)
            .append(&self.operation)
            .append(&(self.fee_limit as u64))
            .append(&self.timestamp)
            .append(&self.expiration)
            .append(&self.data);
    }
}

impl Decodable for Transaction {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 5 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Transaction {
            operation: rlp.val_at(0)?,
            fee_limit: rlp.val_at::<u64>(1)? as i64,
            timestamp: rlp.val_at(2)?,
            expiration: rlp.val_at(3)?,
            data: rlp.val_at(4)?,
        })
    }
}

/// A transaction together with its signature and, once the transaction has
/// been executed by some node, the verdict recorded in the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Bytes,
    /// The result recorded in the block, present when replaying.
    pub contract_ret: Option<ContractResult>,
    hash: H256,
}

impl SignedTransaction {
    pub fn new(transaction: Transaction, signature: Bytes) -> Self {
        let hash = transaction.hash();
        SignedTransaction {
            transaction,
            signature,
            contract_ret: None,
            hash,
        }
    }

    pub fn with_contract_ret(mut self, contract_ret: ContractResult) -> Self {
        self.contract_ret = Some(contract_ret);
        self
    }

    pub fn hash(&self) -> H256 { self.hash }

    pub fn is_signed(&self) -> bool { !self.signature.is_empty() }

    /// The address a deployment in this transaction creates: the hash of
    /// the raw transaction bytes and the owner, truncated to the address
    /// width.
    pub fn contract_address(&self) -> Address {
        cal_contract_address(
            CreateContractAddressType::FromRawTransactionAndOwner {
                raw_transaction: self.raw_bytes(),
                owner: *self.owner_address(),
            },
        )
    }
}

impl Deref for SignedTransaction {
    type Target = Transaction;

    fn deref(&self) -> &Self::Target { &self.transaction }
}

impl Encodable for SignedTransaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3).append(&self.transaction).append(&self.signature);
        match &self.contract_ret {
            Some(ret) => s.append(ret),
            None => s.append_empty_data(),
        };
    }
}

impl Decodable for SignedTransaction {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 3 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        let ret_rlp = rlp.at(2)?;
        let contract_ret = if ret_rlp.is_empty() {
            None
        } else {
            Some(ret_rlp.as_val()?)
        };
        let mut signed = SignedTransaction::new(rlp.val_at(0)?, rlp.val_at(1)?);
        signed.contract_ret = contract_ret;
        Ok(signed)
    }
}
