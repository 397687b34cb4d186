// 8.0.2: result types and errors for engine operations.

use crate::account::{AccountError, Settlement};
use crate::config::ConfigError;
use crate::token::TokenError;
use crate::types::{Address, Amount, Price, Side, SignedAmount};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseResult {
    pub account: Address,
    pub side: Side,
    pub quantity: Amount,
    pub entry_price: Price,
    pub exit_price: Price,
    /// Settlement as computed from the price move.
    pub pnl: SignedAmount,
    /// Change actually applied to the balance. Differs from `pnl` only when a loss was clamped.
    pub applied: SignedAmount,
    pub bad_debt: Amount,
    pub new_balance: Amount,
}

/// Ledger-wide running totals, used for conservation checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    pub deposited: Amount,
    pub withdrawn: Amount,
    pub realized_profit: Amount,
    pub realized_loss: Amount,
    pub bad_debt: Amount,
}

impl LedgerTotals {
    /// Tokens the ledger should hold: pulled minus pushed.
    pub fn net_token_flow(&self) -> Option<Amount> {
        self.deposited.checked_sub(self.withdrawn)
    }

    /// What the sum of all account balances must equal.
    pub fn expected_collateral(&self) -> Option<Amount> {
        self.net_token_flow()?
            .checked_add(self.realized_profit)?
            .checked_sub(self.realized_loss)
    }

    pub(super) fn after_settlement(&self, settlement: &Settlement) -> Option<Self> {
        let mut next = *self;
        let applied = settlement.applied.magnitude();
        if settlement.applied.is_negative() {
            next.realized_loss = next.realized_loss.checked_add(applied)?;
        } else {
            next.realized_profit = next.realized_profit.checked_add(applied)?;
        }
        next.bad_debt = next.bad_debt.checked_add(settlement.bad_debt)?;
        Some(next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid amount {0}")]
    InvalidAmount(Amount),

    #[error("Account {0} already has an open position")]
    PositionAlreadyOpen(Address),

    #[error("Account {0} has no open position")]
    NoOpenPosition(Address),

    #[error("Invalid price {0}")]
    InvalidPrice(u128),

    #[error("Caller {0} is not the owner")]
    NotOwner(Address),

    #[error("Contract is paused")]
    ContractPaused,

    #[error("Contract is not paused")]
    NotPaused,

    #[error("Invalid owner {0}")]
    InvalidOwner(Address),

    #[error("Ledger address {0} cannot hold collateral")]
    LedgerAddress(Address),

    #[error("Loss {loss} exceeds available collateral {available}")]
    InsufficientCollateralForLoss { loss: Amount, available: Amount },

    #[error("Token transfer failed: {0}")]
    TransferFailed(#[from] TokenError),

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub(crate) fn from_account(account: Address, err: AccountError) -> Self {
        match err {
            AccountError::InsufficientBalance { requested, .. } => EngineError::InvalidAmount(requested),
            AccountError::PositionAlreadyOpen => EngineError::PositionAlreadyOpen(account),
            AccountError::NoOpenPosition => EngineError::NoOpenPosition(account),
            AccountError::InsufficientCollateralForLoss { loss, available } => {
                EngineError::InsufficientCollateralForLoss { loss, available }
            }
            AccountError::BalanceOverflow => EngineError::ArithmeticOverflow,
        }
    }
}
