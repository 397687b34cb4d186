// 11.0: every committed state change produces an event. used for audit trails and
// state reconstruction. failed transactions emit nothing.

use crate::types::{Address, Amount, Price, Side, SignedAmount, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    // Collateral events
    Deposit(DepositEvent),
    Withdrawal(WithdrawalEvent),

    // Position events
    PositionOpened(PositionOpenedEvent),
    PositionClosed(PositionClosedEvent),

    // Admin events
    PriceUpdated(PriceUpdatedEvent),
    Paused { by: Address },
    Unpaused { by: Address },
    OwnershipTransferred { previous: Address, new_owner: Address },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositEvent {
    pub account: Address,
    pub amount: Amount,
    pub new_balance: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalEvent {
    pub account: Address,
    pub amount: Amount,
    pub new_balance: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionOpenedEvent {
    pub account: Address,
    pub side: Side,
    pub quantity: Amount,
    pub entry_price: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionClosedEvent {
    pub account: Address,
    pub side: Side,
    pub quantity: Amount,
    pub entry_price: Price,
    pub exit_price: Price,
    pub pnl: SignedAmount,
    pub bad_debt: Amount,
    pub new_balance: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdatedEvent {
    pub old_price: Price,
    pub new_price: Price,
}
