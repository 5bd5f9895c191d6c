// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::State;
use primitives::{Account, AccountType};
use tvm_statedb::Result as DbResult;
use tvm_types::{Address, U256};

impl State {
    pub fn account(&self, address: &Address) -> DbResult<Option<Account>> {
        self.accounts
            .write()
            .get_or_load(address, || self.db.get_account(address))
    }

    pub fn exists(&self, address: &Address) -> DbResult<bool> {
        Ok(self.account(address)?.is_some())
    }

    pub fn set_account(&mut self, account: Account) {
        self.accounts
            .get_mut()
            .set(account.address, Some(account));
    }

    /// Creates an empty account, replacing any existing one.
    pub fn create_account(
        &mut self, address: &Address, account_type: AccountType,
    ) {
        self.set_account(Account::new(*address, account_type, vec![]));
    }

    /// Loads an account, creating a normal one if absent.
    fn require_account(&self, address: &Address) -> DbResult<Account> {
        Ok(self.account(address)?.unwrap_or_else(|| {
            Account::new(*address, AccountType::Normal, vec![])
        }))
    }

    pub fn balance(&self, address: &Address) -> DbResult<U256> {
        Ok(self
            .account(address)?
            .map_or_else(U256::zero, |account| account.balance))
    }

    pub fn add_balance(
        &mut self, address: &Address, by: &U256,
    ) -> DbResult<()> {
        let mut account = self.require_account(address)?;
        account.balance = account.balance.saturating_add(*by);
        self.set_account(account);
        Ok(())
    }

    /// Moves `value` between two balances. Returns `false` without touching
    /// the state when the sender cannot cover it.
    pub fn transfer_balance(
        &mut self, from: &Address, to: &Address, value: &U256,
    ) -> DbResult<bool> {
        if value.is_zero() {
            return Ok(true);
        }
        let mut sender = unwrap_or_return!(self.account(from)?, Ok(false));
        if sender.balance < *value {
            return Ok(false);
        }
        sender.balance -= *value;
        self.set_account(sender);
        self.add_balance(to, value)?;
        Ok(true)
    }

    pub fn token_balance(
        &self, address: &Address, token_id: u64,
    ) -> DbResult<U256> {
        Ok(self
            .account(address)?
            .map_or_else(U256::zero, |account| account.asset_balance(token_id)))
    }

    /// Moves a secondary asset. Returns `false` without touching the state
    /// when the sender cannot cover it.
    pub fn transfer_token(
        &mut self, from: &Address, to: &Address, token_id: u64, amount: &U256,
    ) -> DbResult<bool> {
        if amount.is_zero() {
            return Ok(true);
        }
        let mut sender = unwrap_or_return!(self.account(from)?, Ok(false));
        let sender_balance = sender.asset_balance(token_id);
        if sender_balance < *amount {
            return Ok(false);
        }
        sender.set_asset_balance(token_id, sender_balance - *amount);
        self.set_account(sender);

        let mut receiver = self.require_account(to)?;
        let receiver_balance = receiver.asset_balance(token_id);
        receiver.set_asset_balance(
            token_id,
            receiver_balance.saturating_add(*amount),
        );
        self.set_account(receiver);
        Ok(true)
    }
}
