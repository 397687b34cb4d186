// 4.0: leveraged position record. one slot per account, no averaging, no partial close.
// pnl = quantity * direction * (exit - entry) / entry.

use crate::types::{Amount, Price, Side, SignedAmount, Timestamp};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub quantity: Amount,
    pub side: Side,
    pub entry_price: Price,
    pub opened_at: Timestamp,
}

impl Position {
    pub fn new(quantity: Amount, side: Side, entry_price: Price, opened_at: Timestamp) -> Self {
        debug_assert!(!quantity.is_zero(), "open position must carry a quantity");
        Self {
            quantity,
            side,
            entry_price,
            opened_at,
        }
    }

    pub fn is_long(&self) -> bool {
        self.side.is_long()
    }

    pub fn settlement_pnl(&self, exit_price: Price) -> Option<SignedAmount> {
        calculate_settlement_pnl(self.quantity, self.side, self.entry_price, exit_price)
    }
}

// 4.1: the settlement formula. None when the result does not fit in i128.
// quantity * delta runs in 256 bits so 18-decimal prices and quantities never overflow
// the intermediate. the magnitude is truncated unsigned, then signed, so rounding is
// toward zero and a long is always the exact negation of the matching short.
pub fn calculate_settlement_pnl(
    quantity: Amount,
    side: Side,
    entry_price: Price,
    exit_price: Price,
) -> Option<SignedAmount> {
    let entry = entry_price.value();
    let exit = exit_price.value();
    let (delta, price_rose) = if exit >= entry {
        (exit - entry, true)
    } else {
        (entry - exit, false)
    };

    // both factors are below 2^128, the product fits
    let magnitude = U256::from(quantity.value()) * U256::from(delta) / U256::from(entry);
    if magnitude > U256::from(i128::MAX as u128) {
        return None;
    }
    let magnitude = magnitude.low_u128() as i128;

    let direction = if price_rose { side.sign() } else { -side.sign() };
    Some(SignedAmount::new(direction * magnitude))
}
