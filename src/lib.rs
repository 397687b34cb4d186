// synth-ledger: margin-trading ledger over a single reference price.
// accounts deposit a stablecoin as collateral, open one leveraged long or short each,
// and settle the price move against their collateral on close.
// all computation is deterministic integer math with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Address, Amount, SignedAmount, Price, Side, Timestamp
//   2.x  access.rs: owner identity, pause flag, guards
//   4.x  position.rs: position record, settlement formula
//   7.x  config.rs: initial price, loss policy, env presets
//   8.x  engine/: core engine: collateral, positions, pricing, admin
//   9.x  token.rs: external collateral token trait + in-memory mock
//   10.x account.rs: account collateral + position slot
//   11.x events.rs: state transition events for audit

pub mod access;
pub mod account;
pub mod config;
pub mod engine;
pub mod events;
pub mod position;
pub mod token;
pub mod types;

// re exports for convenience
pub use access::*;
pub use account::*;
pub use config::*;
pub use engine::*;
pub use events::*;
pub use position::*;
pub use token::*;
pub use types::*;
