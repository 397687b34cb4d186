// 8.0: core ledger engine. coordinates the collateral ledger, the per-account position
// slot, price updates, and the owner/pause guards.
// deterministic: every operation either commits fully or returns an error with no change.

mod admin;
mod collateral;
mod core;
mod positions;
mod pricing;
mod results;

pub use core::Engine;
pub use results::{CloseResult, EngineError, LedgerTotals};
