//! Synthetic asset ledger simulation.
//!
//! Walks through the ledger lifecycle: deposits, leveraged longs and shorts,
//! owner price updates, settlement, the pause gate and loss clamping.
//! Set `RUST_LOG=debug` to see every committed event.

use synth_ledger::*;

const OWNER: Address = Address(1);
const LEDGER: Address = Address(1000);

// 6-decimal collateral token, so 1 USDC is 1_000_000 raw units
const USDC: u128 = 1_000_000;

fn main() {
    env_logger::init();

    println!("Synthetic Asset Ledger Simulation");
    println!("Single Price, One Position Per Account\n");

    let scenarios: [(&str, fn() -> Result<(), EngineError>); 4] = [
        ("Long and Short Settlement", scenario_1_long_and_short),
        ("Pause Gate", scenario_2_pause_gate),
        ("Loss Beyond Collateral", scenario_3_loss_clamp),
        ("Conservation", scenario_4_conservation),
    ];

    for (i, (name, run)) in scenarios.iter().enumerate() {
        println!("Scenario {}: {}\n", i + 1, name);
        if let Err(e) = run() {
            eprintln!("  scenario failed: {}", e);
            std::process::exit(1);
        }
        println!();
    }

    println!("All simulations completed successfully.");
}

fn new_engine(config: LedgerConfig, funded: &[(Address, u128)]) -> Result<Engine<MockToken>, EngineError> {
    let mut token = MockToken::default();
    for &(account, amount) in funded {
        token.mint(account, Amount::new(amount));
        token.approve(account, LEDGER, Amount::new(amount));
    }
    let mut engine = Engine::new(config, OWNER, LEDGER, token)?;
    engine.set_time(Timestamp::now());
    Ok(engine)
}

fn usdc(engine: &Engine<MockToken>, amount: Amount) -> String {
    match amount.to_decimal(engine.token().decimals()) {
        Some(units) => format!("${}", units),
        None => format!("{} raw", amount),
    }
}

/// Long and short both settle against the same price move.
fn scenario_1_long_and_short() -> Result<(), EngineError> {
    let alice = Address(2);
    let bob = Address(3);
    let mut engine = new_engine(LedgerConfig::default(), &[(alice, 10 * USDC), (bob, 10 * USDC)])?;

    engine.deposit_collateral(alice, Amount::new(10 * USDC))?;
    engine.deposit_collateral(bob, Amount::new(10 * USDC))?;
    println!("  Alice and Bob each deposit $10");

    engine.open_position(alice, Amount::new(5 * USDC), Side::Long)?;
    engine.open_position(bob, Amount::new(5 * USDC), Side::Short)?;
    println!("  Alice longs 5, Bob shorts 5 @ {}", engine.synthetic_asset_price());

    engine.update_synthetic_asset_price(OWNER, 1200)?;
    println!("  Owner moves price to {}", engine.synthetic_asset_price());
    println!(
        "  Unrealized: Alice {}, Bob {}",
        engine.unrealized_pnl(alice)?,
        engine.unrealized_pnl(bob)?
    );

    let a = engine.close_position(alice)?;
    let b = engine.close_position(bob)?;
    println!("  Alice closes, balance {}", usdc(&engine, a.new_balance));
    println!("  Bob closes, balance {}", usdc(&engine, b.new_balance));
    Ok(())
}

/// Every mutating call is rejected while paused, reads still work.
fn scenario_2_pause_gate() -> Result<(), EngineError> {
    let carol = Address(4);
    let mut engine = new_engine(LedgerConfig::default(), &[(carol, 10 * USDC)])?;
    engine.deposit_collateral(carol, Amount::new(10 * USDC))?;

    engine.pause(OWNER)?;
    println!("  Owner pauses the ledger");

    match engine.withdraw_collateral(carol, Amount::new(USDC)) {
        Err(e) => println!("  Carol withdraw: {}", e),
        Ok(_) => println!("  Carol withdraw unexpectedly succeeded"),
    }
    match engine.open_position(carol, Amount::new(USDC), Side::Long) {
        Err(e) => println!("  Carol open: {}", e),
        Ok(_) => println!("  Carol open unexpectedly succeeded"),
    }
    println!(
        "  Reads still work: balance {}, price {}",
        usdc(&engine, engine.user_collateral_balance(carol)),
        engine.synthetic_asset_price()
    );

    engine.unpause(OWNER)?;
    engine.withdraw_collateral(carol, Amount::new(USDC))?;
    println!(
        "  Unpaused, Carol withdraws $1, balance {}",
        usdc(&engine, engine.user_collateral_balance(carol))
    );
    Ok(())
}

/// Default clamp policy vs the revert policy when a loss exceeds collateral.
fn scenario_3_loss_clamp() -> Result<(), EngineError> {
    let dave = Address(5);

    for policy in [LossPolicy::Clamp, LossPolicy::Revert] {
        let config = LedgerConfig::default().with_loss_policy(policy);
        let mut engine = new_engine(config, &[(dave, USDC)])?;
        engine.deposit_collateral(dave, Amount::new(USDC))?;
        engine.open_position(dave, Amount::new(10 * USDC), Side::Long)?;
        engine.update_synthetic_asset_price(OWNER, 500)?;

        let policy = engine.config().loss_policy;
        match engine.close_position(dave) {
            Ok(result) => println!(
                "  {:?}: loss {} applied, bad debt {}, balance {}",
                policy,
                usdc(&engine, result.applied.magnitude()),
                usdc(&engine, result.bad_debt),
                usdc(&engine, result.new_balance)
            ),
            Err(e) => println!("  {:?}: close rejected, {}", policy, e),
        }
    }
    Ok(())
}

/// Ledger balances reconcile with token flow and realized pnl.
fn scenario_4_conservation() -> Result<(), EngineError> {
    let traders: Vec<Address> = (10..20).map(Address).collect();
    let funded: Vec<(Address, u128)> = traders.iter().map(|&t| (t, 100 * USDC)).collect();
    let mut engine = new_engine(LedgerConfig::default(), &funded)?;

    for (i, &trader) in traders.iter().enumerate() {
        engine.deposit_collateral(trader, Amount::new(100 * USDC))?;
        let side = if i % 2 == 0 { Side::Long } else { Side::Short };
        engine.open_position(trader, Amount::new((i as u128 + 1) * USDC), side)?;
    }

    for price in [1100, 950, 1300, 700, 1000, 1050] {
        engine.update_synthetic_asset_price(OWNER, price)?;
        engine.advance_time(60_000);
    }

    for &trader in &traders {
        engine.close_position(trader)?;
        engine.withdraw_collateral(trader, Amount::new(10 * USDC))?;
    }

    let totals = engine.totals();
    println!("  Deposited {}", usdc(&engine, totals.deposited));
    println!("  Withdrawn {}", usdc(&engine, totals.withdrawn));
    println!("  Realized profit {}", usdc(&engine, totals.realized_profit));
    println!("  Realized loss {}", usdc(&engine, totals.realized_loss));
    println!(
        "  Ledger collateral {} (expected {:?})",
        usdc(&engine, engine.total_collateral()),
        totals.expected_collateral().map(|a| usdc(&engine, a))
    );
    println!("  Tokens held {}", usdc(&engine, engine.token().balance_of(LEDGER)));
    println!("  Events generated: {}", engine.events().len());
    Ok(())
}
