// 2.0 access.rs: owner identity and the global pause flag.
// entry points call the guards once, before touching any other state.

use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::types::Address;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Address,
    paused: bool,
}

impl AccessControl {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            paused: false,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn only_owner(&self, caller: Address) -> Result<(), EngineError> {
        if caller != self.owner {
            return Err(EngineError::NotOwner(caller));
        }
        Ok(())
    }

    pub fn when_not_paused(&self) -> Result<(), EngineError> {
        if self.paused {
            return Err(EngineError::ContractPaused);
        }
        Ok(())
    }

    pub fn when_paused(&self) -> Result<(), EngineError> {
        if !self.paused {
            return Err(EngineError::NotPaused);
        }
        Ok(())
    }

    pub fn pause(&mut self, caller: Address) -> Result<(), EngineError> {
        self.only_owner(caller)?;
        self.when_not_paused()?;
        self.paused = true;
        Ok(())
    }

    pub fn unpause(&mut self, caller: Address) -> Result<(), EngineError> {
        self.only_owner(caller)?;
        self.when_paused()?;
        self.paused = false;
        Ok(())
    }

    /// Returns the previous owner.
    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<Address, EngineError> {
        self.only_owner(caller)?;
        if new_owner.is_zero() {
            return Err(EngineError::InvalidOwner(new_owner));
        }
        let previous = self.owner;
        self.owner = new_owner;
        Ok(previous)
    }
}
