//! Pause flag and ownership.

use super::core::Engine;
use super::results::EngineError;
use crate::events::EventPayload;
use crate::token::CollateralToken;
use crate::types::Address;

impl<T: CollateralToken> Engine<T> {
    pub fn pause(&mut self, caller: Address) -> Result<(), EngineError> {
        self.access.pause(caller)?;
        log::info!("ledger paused by {}", caller);
        self.emit_event(EventPayload::Paused { by: caller });
        Ok(())
    }

    pub fn unpause(&mut self, caller: Address) -> Result<(), EngineError> {
        self.access.unpause(caller)?;
        log::info!("ledger unpaused by {}", caller);
        self.emit_event(EventPayload::Unpaused { by: caller });
        Ok(())
    }

    // allowed while paused so a compromised owner can still be rotated out
    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<(), EngineError> {
        let previous = self.access.transfer_ownership(caller, new_owner)?;
        log::info!("ownership transferred from {} to {}", previous, new_owner);
        self.emit_event(EventPayload::OwnershipTransferred { previous, new_owner });
        Ok(())
    }
}
