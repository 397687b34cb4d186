//! Position open/close and settlement against the collateral ledger.

use super::core::Engine;
use super::results::{CloseResult, EngineError};
use crate::account::Account;
use crate::events::{EventPayload, PositionClosedEvent, PositionOpenedEvent};
use crate::position::Position;
use crate::token::CollateralToken;
use crate::types::{Address, Amount, Side, SignedAmount};

impl<T: CollateralToken> Engine<T> {
    /// Open the caller's single position at the current reference price.
    ///
    /// No tokens move and the quantity is not checked against collateral.
    pub fn open_position(&mut self, caller: Address, quantity: Amount, side: Side) -> Result<(), EngineError> {
        self.access.when_not_paused()?;
        if quantity.is_zero() {
            return Err(EngineError::InvalidAmount(quantity));
        }

        let entry_price = self.price;
        let now = self.current_time;
        let account = self
            .accounts
            .entry(caller)
            .or_insert_with(|| Account::new(caller, now));
        account
            .open_position(Position::new(quantity, side, entry_price, now))
            .map_err(|e| EngineError::from_account(caller, e))?;

        self.emit_event(EventPayload::PositionOpened(PositionOpenedEvent {
            account: caller,
            side,
            quantity,
            entry_price,
        }));

        Ok(())
    }

    /// Settle the caller's position at the current reference price and clear it.
    pub fn close_position(&mut self, caller: Address) -> Result<CloseResult, EngineError> {
        self.access.when_not_paused()?;

        let policy = self.config.loss_policy;
        let exit_price = self.price;
        let account = self
            .accounts
            .get_mut(&caller)
            .ok_or(EngineError::NoOpenPosition(caller))?;
        let pnl = account
            .position
            .as_ref()
            .ok_or(EngineError::NoOpenPosition(caller))?
            .settlement_pnl(exit_price)
            .ok_or(EngineError::ArithmeticOverflow)?;

        let preview = account
            .preview_settlement(pnl, policy)
            .map_err(|e| EngineError::from_account(caller, e))?;
        let totals = self
            .totals
            .after_settlement(&preview)
            .ok_or(EngineError::ArithmeticOverflow)?;

        let (position, settlement) = account
            .close_position(pnl, policy)
            .map_err(|e| EngineError::from_account(caller, e))?;
        self.totals = totals;

        if !settlement.bad_debt.is_zero() {
            log::warn!(
                "close for {} left {} of loss uncovered, balance clamped to zero",
                caller,
                settlement.bad_debt
            );
        }

        let result = CloseResult {
            account: caller,
            side: position.side,
            quantity: position.quantity,
            entry_price: position.entry_price,
            exit_price,
            pnl,
            applied: settlement.applied,
            bad_debt: settlement.bad_debt,
            new_balance: settlement.new_balance,
        };

        self.emit_event(EventPayload::PositionClosed(PositionClosedEvent {
            account: caller,
            side: result.side,
            quantity: result.quantity,
            entry_price: result.entry_price,
            exit_price,
            pnl,
            bad_debt: result.bad_debt,
            new_balance: result.new_balance,
        }));

        Ok(result)
    }

    /// What closing right now would settle, without closing.
    pub fn unrealized_pnl(&self, account: Address) -> Result<SignedAmount, EngineError> {
        self.user_leveraged_position(account)
            .ok_or(EngineError::NoOpenPosition(account))?
            .settlement_pnl(self.price)
            .ok_or(EngineError::ArithmeticOverflow)
    }
}
