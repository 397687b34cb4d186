//! Collateral deposits and withdrawals.
//!
//! Deposits pull tokens first and credit second, so the credit is only ever applied
//! for tokens the ledger actually received. Withdrawals debit first and push second;
//! a failed push rolls the debit back.

use super::core::Engine;
use super::results::EngineError;
use crate::account::Account;
use crate::events::{DepositEvent, EventPayload, WithdrawalEvent};
use crate::token::CollateralToken;
use crate::types::{Address, Amount};

impl<T: CollateralToken> Engine<T> {
    /// Pull `amount` from `caller` and credit it. Returns the new balance.
    pub fn deposit_collateral(&mut self, caller: Address, amount: Amount) -> Result<Amount, EngineError> {
        self.access.when_not_paused()?;
        if amount.is_zero() {
            return Err(EngineError::InvalidAmount(amount));
        }
        // a pull from the ledger to itself moves nothing
        if caller == self.address {
            return Err(EngineError::LedgerAddress(caller));
        }

        // every check that could fail the credit runs before tokens move
        let new_balance = match self.accounts.get(&caller) {
            Some(account) => account
                .balance_after_deposit(amount)
                .map_err(|e| EngineError::from_account(caller, e))?,
            None => amount,
        };
        let deposited = self
            .totals
            .deposited
            .checked_add(amount)
            .ok_or(EngineError::ArithmeticOverflow)?;

        if let Err(e) = self.token.transfer_from(self.address, caller, self.address, amount) {
            log::warn!("deposit of {} from {} rejected by token: {}", amount, caller, e);
            return Err(EngineError::TransferFailed(e));
        }

        let now = self.current_time;
        let account = self
            .accounts
            .entry(caller)
            .or_insert_with(|| Account::new(caller, now));
        account
            .deposit(amount)
            .map_err(|e| EngineError::from_account(caller, e))?;
        self.totals.deposited = deposited;

        self.emit_event(EventPayload::Deposit(DepositEvent {
            account: caller,
            amount,
            new_balance,
        }));

        Ok(new_balance)
    }

    /// Debit `amount` from `caller` and push the tokens back. Returns the new balance.
    pub fn withdraw_collateral(&mut self, caller: Address, amount: Amount) -> Result<Amount, EngineError> {
        self.access.when_not_paused()?;
        if amount.is_zero() {
            return Err(EngineError::InvalidAmount(amount));
        }

        let account = self
            .accounts
            .get_mut(&caller)
            .ok_or(EngineError::InvalidAmount(amount))?;
        let new_balance = account
            .withdraw(amount)
            .map_err(|e| EngineError::from_account(caller, e))?;

        // internal debit is committed, only now talk to the token
        if let Err(e) = self.token.transfer(self.address, caller, amount) {
            account.revert_withdrawal(amount);
            log::warn!("withdrawal of {} to {} rolled back: {}", amount, caller, e);
            return Err(EngineError::TransferFailed(e));
        }
        self.totals.withdrawn = self.totals.withdrawn.saturating_add(amount);

        self.emit_event(EventPayload::Withdrawal(WithdrawalEvent {
            account: caller,
            amount,
            new_balance,
        }));

        Ok(new_balance)
    }
}
