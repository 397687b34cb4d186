//! Account collateral and the single position slot.
//!
//! Each account holds free collateral in raw token units and at most one open
//! position. Opening a position does not reserve collateral; closing applies
//! the signed settlement directly to the free balance.

use crate::config::LossPolicy;
use crate::position::Position;
use crate::types::{Address, Amount, SignedAmount, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    pub balance: Amount,
    pub position: Option<Position>,
    pub total_deposited: Amount,
    pub total_withdrawn: Amount,
    pub realized_pnl: SignedAmount,
    pub created_at: Timestamp,
}

/// Outcome of applying a settlement to the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Signed change actually applied to the balance.
    pub applied: SignedAmount,
    /// Part of a loss the balance could not cover (clamp policy only).
    pub bad_debt: Amount,
    pub new_balance: Amount,
}

impl Account {
    pub fn new(address: Address, timestamp: Timestamp) -> Self {
        Self {
            address,
            balance: Amount::zero(),
            position: None,
            total_deposited: Amount::zero(),
            total_withdrawn: Amount::zero(),
            realized_pnl: SignedAmount::zero(),
            created_at: timestamp,
        }
    }

    pub fn has_open_position(&self) -> bool {
        self.position.is_some()
    }

    /// Balance after crediting `amount`, without applying it.
    pub fn balance_after_deposit(&self, amount: Amount) -> Result<Amount, AccountError> {
        self.balance.checked_add(amount).ok_or(AccountError::BalanceOverflow)
    }

    pub fn deposit(&mut self, amount: Amount) -> Result<Amount, AccountError> {
        let new_balance = self.balance_after_deposit(amount)?;
        let total = self.total_deposited.checked_add(amount).ok_or(AccountError::BalanceOverflow)?;
        self.balance = new_balance;
        self.total_deposited = total;
        Ok(new_balance)
    }

    pub fn withdraw(&mut self, amount: Amount) -> Result<Amount, AccountError> {
        let new_balance = self.balance.checked_sub(amount).ok_or(AccountError::InsufficientBalance {
            requested: amount,
            available: self.balance,
        })?;
        let total = self.total_withdrawn.checked_add(amount).ok_or(AccountError::BalanceOverflow)?;
        self.balance = new_balance;
        self.total_withdrawn = total;
        Ok(new_balance)
    }

    // undo a withdraw whose token push failed
    pub fn revert_withdrawal(&mut self, amount: Amount) {
        self.balance = self.balance.saturating_add(amount);
        self.total_withdrawn = self.total_withdrawn.saturating_sub(amount);
    }

    pub fn open_position(&mut self, position: Position) -> Result<(), AccountError> {
        if self.position.is_some() {
            return Err(AccountError::PositionAlreadyOpen);
        }
        self.position = Some(position);
        Ok(())
    }

    /// Settle `pnl` against the free balance and clear the position slot.
    /// Nothing changes on error.
    pub fn close_position(&mut self, pnl: SignedAmount, policy: LossPolicy) -> Result<(Position, Settlement), AccountError> {
        if self.position.is_none() {
            return Err(AccountError::NoOpenPosition);
        }
        let settlement = self.preview_settlement(pnl, policy)?;
        let realized = self
            .realized_pnl
            .checked_add(settlement.applied)
            .ok_or(AccountError::BalanceOverflow)?;

        let position = self.position.take().ok_or(AccountError::NoOpenPosition)?;
        self.balance = settlement.new_balance;
        self.realized_pnl = realized;
        Ok((position, settlement))
    }

    pub fn preview_settlement(&self, pnl: SignedAmount, policy: LossPolicy) -> Result<Settlement, AccountError> {
        if !pnl.is_negative() {
            let new_balance = self
                .balance
                .checked_add(pnl.magnitude())
                .ok_or(AccountError::BalanceOverflow)?;
            return Ok(Settlement {
                applied: pnl,
                bad_debt: Amount::zero(),
                new_balance,
            });
        }

        let loss = pnl.magnitude();
        match self.balance.checked_sub(loss) {
            Some(new_balance) => Ok(Settlement {
                applied: pnl,
                bad_debt: Amount::zero(),
                new_balance,
            }),
            None => match policy {
                LossPolicy::Revert => Err(AccountError::InsufficientCollateralForLoss {
                    loss,
                    available: self.balance,
                }),
                LossPolicy::Clamp => {
                    let covered = i128::try_from(self.balance.value()).map_err(|_| AccountError::BalanceOverflow)?;
                    Ok(Settlement {
                        applied: SignedAmount::new(-covered),
                        bad_debt: loss.saturating_sub(self.balance),
                        new_balance: Amount::zero(),
                    })
                }
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Amount, available: Amount },

    #[error("Position already open")]
    PositionAlreadyOpen,

    #[error("No open position")]
    NoOpenPosition,

    #[error("Loss {loss} exceeds available collateral {available}")]
    InsufficientCollateralForLoss { loss: Amount, available: Amount },

    #[error("Balance overflow")]
    BalanceOverflow,
}
