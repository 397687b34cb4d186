// 9.0 token.rs: the external collateral token. the ledger only ever talks to it through
// CollateralToken. MockToken is an in-memory stand-in: balances and allowances, no chain.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Address, Amount};

pub const DEFAULT_TOKEN_DECIMALS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Insufficient token balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Amount, available: Amount },

    #[error("Insufficient allowance: requested {requested}, allowed {allowed}")]
    InsufficientAllowance { requested: Amount, allowed: Amount },

    #[error("Transfer rejected by token")]
    Rejected,
}

/// Fungible token surface the collateral ledger depends on.
///
/// `spender` / `from` carry the caller identity explicitly since there is no ambient
/// message sender.
pub trait CollateralToken {
    /// Move `amount` from `from` to `to`, spending `spender`'s allowance.
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Move `amount` out of `from`'s own balance.
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), TokenError>;

    fn balance_of(&self, account: Address) -> Amount;

    fn allowance(&self, owner: Address, spender: Address) -> Amount;

    fn decimals(&self) -> u32;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockToken {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    decimals: u32,
    total_supply: Amount,
    // when set every movement fails, used to drive rollback paths
    pub fail_transfers: bool,
}

impl Default for MockToken {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_DECIMALS)
    }
}

impl MockToken {
    pub fn new(decimals: u32) -> Self {
        Self {
            balances: HashMap::new(),
            allowances: HashMap::new(),
            decimals,
            total_supply: Amount::zero(),
            fail_transfers: false,
        }
    }

    pub fn mint(&mut self, to: Address, amount: Amount) {
        let balance = self.balances.entry(to).or_default();
        *balance = balance.saturating_add(amount);
        self.total_supply = self.total_supply.saturating_add(amount);
    }

    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((owner, spender), amount);
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), TokenError> {
        let available = self.balance_of(from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance { requested: amount, available })?;
        if from == to {
            return Ok(());
        }
        let credited = self.balance_of(to).checked_add(amount).ok_or(TokenError::Rejected)?;
        self.balances.insert(from, remaining);
        self.balances.insert(to, credited);
        Ok(())
    }
}

impl CollateralToken for MockToken {
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        if self.fail_transfers {
            return Err(TokenError::Rejected);
        }
        let allowed = self.allowance(from, spender);
        let remaining_allowance = allowed
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientAllowance { requested: amount, allowed })?;
        self.move_balance(from, to, amount)?;
        self.allowances.insert((from, spender), remaining_allowance);
        Ok(())
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), TokenError> {
        if self.fail_transfers {
            return Err(TokenError::Rejected);
        }
        self.move_balance(from, to, amount)
    }

    fn balance_of(&self, account: Address) -> Amount {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances.get(&(owner, spender)).copied().unwrap_or_default()
    }

    fn decimals(&self) -> u32 {
        self.decimals
    }
}
