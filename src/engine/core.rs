// 8.0 engine/core.rs: main engine. owns the collateral ledger, position slots, reference
// price, access control and the token it settles in.

use super::results::{EngineError, LedgerTotals};
use crate::access::AccessControl;
use crate::account::Account;
use crate::config::LedgerConfig;
use crate::events::{Event, EventId, EventPayload};
use crate::position::Position;
use crate::token::CollateralToken;
use crate::types::{Address, Amount, Price, Timestamp};
use std::collections::{HashMap, VecDeque};

/** 8.1: main engine struct. all state lives here */
#[derive(Debug)]
pub struct Engine<T: CollateralToken> {
    pub(super) config: LedgerConfig,
    // identity the ledger holds tokens under
    pub(super) address: Address,
    pub(super) token: T,
    pub(super) access: AccessControl,
    pub(super) price: Price,
    pub(super) accounts: HashMap<Address, Account>,
    pub(super) totals: LedgerTotals,
    pub(super) events: VecDeque<Event>,
    pub(super) next_event_id: u64,
    pub(super) current_time: Timestamp,
}

impl<T: CollateralToken> Engine<T> {
    pub fn new(config: LedgerConfig, owner: Address, address: Address, token: T) -> Result<Self, EngineError> {
        let price = config.validate()?;
        if owner.is_zero() {
            return Err(EngineError::InvalidOwner(owner));
        }
        log::info!(
            "ledger {} created, owner {}, initial price {}, loss policy {:?}",
            address,
            owner,
            price,
            config.loss_policy
        );
        Ok(Self {
            config,
            address,
            token,
            access: AccessControl::new(owner),
            price,
            accounts: HashMap::new(),
            totals: LedgerTotals::default(),
            events: VecDeque::new(),
            next_event_id: 1,
            current_time: Timestamp::from_millis(0),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = Timestamp::from_millis(self.current_time.as_millis() + millis);
    }

    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn paused(&self) -> bool {
        self.access.paused()
    }

    pub fn synthetic_asset_price(&self) -> Price {
        self.price
    }

    pub fn user_collateral_balance(&self, account: Address) -> Amount {
        self.accounts
            .get(&account)
            .map(|a| a.balance)
            .unwrap_or_default()
    }

    pub fn user_position_open(&self, account: Address) -> bool {
        self.accounts
            .get(&account)
            .is_some_and(Account::has_open_position)
    }

    pub fn user_leveraged_position(&self, account: Address) -> Option<&Position> {
        self.accounts.get(&account).and_then(|a| a.position.as_ref())
    }

    // zero once closed
    pub fn user_position_quantity(&self, account: Address) -> Amount {
        self.user_leveraged_position(account)
            .map(|p| p.quantity)
            .unwrap_or_default()
    }

    pub fn get_account(&self, account: Address) -> Option<&Account> {
        self.accounts.get(&account)
    }

    pub fn totals(&self) -> LedgerTotals {
        self.totals
    }

    /// Sum of every account's free collateral.
    pub fn total_collateral(&self) -> Amount {
        self.accounts.values().map(|a| a.balance).sum()
    }

    /// The last `count` retained events, oldest first.
    pub fn recent_events(&self, count: usize) -> impl Iterator<Item = &Event> {
        let start = self.events.len().saturating_sub(count);
        self.events.range(start..)
    }

    pub fn events(&self) -> &VecDeque<Event> {
        &self.events
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), self.current_time, payload);
        self.next_event_id += 1;

        log::debug!("[event {}] {:?}", event.id.0, event.payload);

        if self.events.len() >= self.config.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}
