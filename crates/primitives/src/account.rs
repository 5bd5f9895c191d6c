// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::Bytes;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use tvm_types::{Address, U256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountType {
    #[default]
    Normal,
    AssetIssue,
    Contract,
}

impl AccountType {
    fn into_u8(&self) -> u8 {
        match self {
            AccountType::Normal => 0,
            AccountType::AssetIssue => 1,
            AccountType::Contract => 2,
        }
    }
}

impl Encodable for AccountType {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_internal(&self.into_u8());
    }
}

impl Decodable for AccountType {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        match rlp.as_val::<u8>()? {
            0 => Ok(AccountType::Normal),
            1 => Ok(AccountType::AssetIssue),
            2 => Ok(AccountType::Contract),
            _ => Err(DecoderError::Custom("Unrecognized account type")),
        }
    }
}

/// Balance locked to earn a standing energy allowance.
#[derive(Debug, Clone, PartialEq, Eq, Default, RlpEncodable, RlpDecodable)]
pub struct FrozenBalance {
    pub amount: U256,
    /// Timestamp in milliseconds after which the balance may be unfrozen.
    pub expire_time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct AssetBalance {
    pub token_id: u64,
    pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, RlpEncodable, RlpDecodable)]
pub struct Account {
    pub address: Address,
    pub account_type: AccountType,
    pub account_name: Bytes,
    pub balance: U256,
    pub frozen_for_energy: FrozenBalance,
    /// Energy consumed from the frozen allowance, as of
    /// `latest_consume_time_for_energy`.
    pub energy_usage: u64,
    /// Slot of the latest energy consumption.
    pub latest_consume_time_for_energy: u64,
    /// Secondary asset balances, sorted by token id.
    pub assets: Vec<AssetBalance>,
}

impl Account {
    pub fn new(
        address: Address, account_type: AccountType, account_name: Bytes,
    ) -> Self {
        Account {
            address,
            account_type,
            account_name,
            ..Default::default()
        }
    }

    pub fn new_with_balance(address: Address, balance: U256) -> Self {
        Account {
            address,
            balance,
            ..Default::default()
        }
    }

    pub fn is_contract(&self) -> bool {
        self.account_type == AccountType::Contract
    }

    pub fn asset_balance(&self, token_id: u64) -> U256 {
        self.assets
            .binary_search_by_key(&token_id, |asset| asset.token_id)
            .map_or(U256::zero(), |index| self.assets[index].amount)
    }

    pub fn set_asset_balance(&mut self, token_id: u64, amount: U256) {
        match self
            .assets
            .binary_search_by_key(&token_id, |asset| asset.token_id)
        {
            Ok(index) if amount.is_zero() => {
                self.assets.remove(index);
            }
            Ok(index) => self.assets[index].amount = amount,
            Err(_) if amount.is_zero() => {}
            Err(index) => {
                self.assets.insert(index, AssetBalance { token_id, amount })
            }
        }
    }
}
