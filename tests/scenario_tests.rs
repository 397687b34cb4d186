//! Reference scenarios.
//!
//! Collateral and quantities use 18-decimal scaling, mirroring how the
//! reference deployment was exercised: mint 10, deposit 10, trade 5.

use synth_ledger::*;

const OWNER: Address = Address(1);
const LEDGER: Address = Address(1000);
const TRADER: Address = Address(2);

const ONE: u128 = 1_000_000_000_000_000_000;
const TOKEN_MINT: u128 = 10 * ONE;
const QUANT: u128 = 5 * ONE;

fn deploy() -> Engine<MockToken> {
    let mut token = MockToken::default();
    token.mint(TRADER, Amount::new(TOKEN_MINT));
    token.approve(TRADER, LEDGER, Amount::new(TOKEN_MINT));
    Engine::new(LedgerConfig::default(), OWNER, LEDGER, token).unwrap()
}

fn deposited() -> Engine<MockToken> {
    let mut engine = deploy();
    engine.deposit_collateral(TRADER, Amount::new(TOKEN_MINT)).unwrap();
    engine
}

fn opened(side: Side) -> Engine<MockToken> {
    let mut engine = deposited();
    engine.open_position(TRADER, Amount::new(QUANT), side).unwrap();
    engine
}

mod deployment {
    use super::*;

    #[test]
    fn initial_state() {
        let engine = deploy();
        assert_eq!(engine.synthetic_asset_price().value(), 1000);
        assert_eq!(engine.owner(), OWNER);
        assert!(!engine.paused());
    }

    #[test]
    fn token_setup() {
        let engine = deploy();
        assert_eq!(engine.token().balance_of(TRADER), Amount::new(TOKEN_MINT));
        assert_eq!(engine.token().allowance(TRADER, LEDGER), Amount::new(TOKEN_MINT));
        assert_eq!(engine.token().decimals(), 6);
    }
}

mod collateral {
    use super::*;

    #[test]
    fn deposit() {
        let engine = deposited();
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::new(TOKEN_MINT));
    }

    #[test]
    fn withdraw_everything() {
        let mut engine = deposited();
        engine.withdraw_collateral(TRADER, Amount::new(TOKEN_MINT)).unwrap();
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::zero());
        assert_eq!(engine.token().balance_of(TRADER), Amount::new(TOKEN_MINT));
    }

    #[test]
    fn withdraw_more_than_deposited() {
        let mut engine = deposited();
        let result = engine.withdraw_collateral(TRADER, Amount::new(11 * ONE));
        assert!(matches!(result, Err(EngineError::InvalidAmount(_))));
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::new(TOKEN_MINT));
    }

    #[test]
    fn withdraw_not_blocked_by_open_position() {
        let mut engine = opened(Side::Long);
        engine.withdraw_collateral(TRADER, Amount::new(TOKEN_MINT)).unwrap();
        assert!(engine.user_position_open(TRADER));
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::zero());
    }
}

mod positions {
    use super::*;

    #[test]
    fn open_long() {
        let engine = opened(Side::Long);
        assert!(engine.user_position_open(TRADER));
        assert_eq!(engine.user_position_quantity(TRADER), Amount::new(QUANT));
        assert!(engine.user_leveraged_position(TRADER).unwrap().is_long());
    }

    #[test]
    fn close_long_at_same_price() {
        let mut engine = opened(Side::Long);
        let result = engine.close_position(TRADER).unwrap();

        assert_eq!(result.pnl, SignedAmount::zero());
        assert!(!engine.user_position_open(TRADER));
        assert_eq!(engine.user_position_quantity(TRADER), Amount::zero());
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::new(TOKEN_MINT));
    }
}

mod settlement {
    use super::*;

    fn close_after_move(side: Side, price: u128) -> Engine<MockToken> {
        let mut engine = opened(side);
        engine.update_synthetic_asset_price(OWNER, price).unwrap();
        engine.close_position(TRADER).unwrap();
        engine
    }

    #[test]
    fn long_gains_on_rise() {
        let engine = close_after_move(Side::Long, 1200);
        assert!(!engine.user_position_open(TRADER));
        assert_eq!(engine.user_position_quantity(TRADER), Amount::zero());
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::new(11 * ONE));
    }

    #[test]
    fn long_loses_on_fall() {
        let engine = close_after_move(Side::Long, 800);
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::new(9 * ONE));
    }

    #[test]
    fn short_gains_on_fall() {
        let engine = close_after_move(Side::Short, 800);
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::new(11 * ONE));
    }

    #[test]
    fn short_loses_on_rise() {
        let engine = close_after_move(Side::Short, 1200);
        assert!(!engine.user_position_open(TRADER));
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::new(9 * ONE));
    }

    #[test]
    fn eighteen_decimal_prices() {
        let mut token = MockToken::default();
        token.mint(TRADER, Amount::new(100 * ONE));
        token.approve(TRADER, LEDGER, Amount::new(100 * ONE));
        let config = LedgerConfig::default().with_initial_price(2_000 * ONE);
        let mut engine = Engine::new(config, OWNER, LEDGER, token).unwrap();

        engine.deposit_collateral(TRADER, Amount::new(100 * ONE)).unwrap();
        engine.open_position(TRADER, Amount::new(1_000 * ONE), Side::Short).unwrap();
        engine.update_synthetic_asset_price(OWNER, 2_100 * ONE).unwrap();

        let result = engine.close_position(TRADER).unwrap();
        assert_eq!(result.pnl, SignedAmount::new(-50 * ONE as i128));
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::new(50 * ONE));
        assert!(!engine.user_position_open(TRADER));
    }

    #[test]
    fn profit_can_be_withdrawn_when_ledger_holds_tokens() {
        // a second depositor backs the winner's profit
        let mut engine = opened(Side::Long);
        let backer = Address(3);
        engine.token_mut().mint(backer, Amount::new(TOKEN_MINT));
        engine.token_mut().approve(backer, LEDGER, Amount::new(TOKEN_MINT));
        engine.deposit_collateral(backer, Amount::new(TOKEN_MINT)).unwrap();

        engine.update_synthetic_asset_price(OWNER, 1200).unwrap();
        engine.close_position(TRADER).unwrap();
        engine.withdraw_collateral(TRADER, Amount::new(11 * ONE)).unwrap();

        assert_eq!(engine.token().balance_of(TRADER), Amount::new(11 * ONE));
    }
}

mod pause_gate {
    use super::*;

    #[test]
    fn every_mutation_rejected_while_paused() {
        let mut engine = opened(Side::Long);
        engine.pause(OWNER).unwrap();

        assert_eq!(
            engine.deposit_collateral(TRADER, Amount::new(1)),
            Err(EngineError::ContractPaused)
        );
        assert_eq!(
            engine.withdraw_collateral(TRADER, Amount::new(1)),
            Err(EngineError::ContractPaused)
        );
        assert_eq!(
            engine.open_position(Address(9), Amount::new(1), Side::Short),
            Err(EngineError::ContractPaused)
        );
        assert_eq!(engine.close_position(TRADER), Err(EngineError::ContractPaused));
        assert_eq!(
            engine.update_synthetic_asset_price(OWNER, 1200),
            Err(EngineError::ContractPaused)
        );

        // reads stay available
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::new(TOKEN_MINT));
        assert!(engine.user_position_open(TRADER));
        assert_eq!(engine.synthetic_asset_price().value(), 1000);
        assert!(engine.paused());
    }

    #[test]
    fn mutations_resume_after_unpause() {
        let mut engine = opened(Side::Long);
        engine.pause(OWNER).unwrap();
        engine.unpause(OWNER).unwrap();

        engine.update_synthetic_asset_price(OWNER, 1200).unwrap();
        engine.close_position(TRADER).unwrap();
        engine.withdraw_collateral(TRADER, Amount::new(ONE)).unwrap();
        assert_eq!(engine.user_collateral_balance(TRADER), Amount::new(10 * ONE));
    }
}

mod audit {
    use super::*;

    #[test]
    fn events_follow_transactions() {
        let mut engine = opened(Side::Short);
        engine.update_synthetic_asset_price(OWNER, 800).unwrap();
        engine.close_position(TRADER).unwrap();

        let kinds: Vec<&str> = engine
            .events()
            .iter()
            .map(|e| match e.payload {
                EventPayload::Deposit(_) => "deposit",
                EventPayload::PositionOpened(_) => "opened",
                EventPayload::PriceUpdated(_) => "price",
                EventPayload::PositionClosed(_) => "closed",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["deposit", "opened", "price", "closed"]);
    }

    #[test]
    fn failed_transactions_emit_nothing() {
        let mut engine = deposited();
        let before = engine.events().len();

        let _ = engine.withdraw_collateral(TRADER, Amount::new(TOKEN_MINT + 1));
        let _ = engine.close_position(TRADER);
        let _ = engine.update_synthetic_asset_price(TRADER, 5);
        let _ = engine.update_synthetic_asset_price(OWNER, 0);

        assert_eq!(engine.events().len(), before);
    }

    #[test]
    fn event_buffer_is_capped() {
        let config = LedgerConfig {
            max_events: 3,
            ..LedgerConfig::default()
        };
        let mut engine = Engine::new(config, OWNER, LEDGER, MockToken::default()).unwrap();
        for price in 1..=10 {
            engine.update_synthetic_asset_price(OWNER, price).unwrap();
        }

        assert_eq!(engine.events().len(), 3);
        assert_eq!(engine.events()[0].id, EventId(8));
        assert_eq!(engine.recent_events(1).next().map(|e| e.id), Some(EventId(10)));
    }

    #[test]
    fn events_serialize_to_json() {
        let mut engine = opened(Side::Long);
        engine.update_synthetic_asset_price(OWNER, 1200).unwrap();
        engine.close_position(TRADER).unwrap();

        let last = engine.events().back().unwrap();
        let json = serde_json::to_string(last).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();

        assert_eq!(back.payload, last.payload);
        assert!(json.contains("PositionClosed"));
    }
}
