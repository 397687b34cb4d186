//! Reference price updates.

use super::core::Engine;
use super::results::EngineError;
use crate::events::{EventPayload, PriceUpdatedEvent};
use crate::token::CollateralToken;
use crate::types::{Address, Price};

impl<T: CollateralToken> Engine<T> {
    /// Owner-only. Replaces the reference price used by future opens and closes.
    pub fn update_synthetic_asset_price(&mut self, caller: Address, new_price: u128) -> Result<(), EngineError> {
        self.access.when_not_paused()?;
        self.access.only_owner(caller)?;
        let new_price = Price::new(new_price).ok_or(EngineError::InvalidPrice(new_price))?;

        let old_price = self.price;
        self.price = new_price;

        self.emit_event(EventPayload::PriceUpdated(PriceUpdatedEvent { old_price, new_price }));

        Ok(())
    }
}
