// demos/pricing_demo.rs

//! Demonstration of Black-Scholes pricing and Greeks
//!
//! This demo shows how to:
//! 1. Build pricing inputs for a call and a put
//! 2. Price them with rounded and full-precision output
//! 3. Check put-call parity on the unrounded prices
//! 4. Walk a small strike ladder
//!
//! Usage:
//!     cargo run --example pricing_demo

use anyhow::Result;
use bsm_greeks::{price, price_unrounded, OptionType, PricingInputs};

fn main() -> Result<()> {
    println!("Black-Scholes Pricing Demo");
    println!("==========================");

    let spot = 100.0;
    let days = 30.0;
    let rate = 0.05;
    let vol = 0.2;

    println!("Underlying price: ${:.0}", spot);
    println!("Expiration: {} days ({:.4} years)", days, days / 365.0);
    println!("Rate: {:.1}%  Volatility: {:.1}%", rate * 100.0, vol * 100.0);

    println!("\nStep 1: Pricing the at-the-money call and put...");
    println!(
        "{:<6} {:<8} {:<8} {:<8} {:<8} {:<8} {:<8} {:<8} {:<8}",
        "Type", "d1", "d2", "Price", "Delta", "Gamma", "Theta", "Vega", "Rho"
    );
    println!("{}", "-".repeat(78));

    for option_type in [OptionType::Call, OptionType::Put] {
        let inputs = PricingInputs::new(spot, 100.0, days, rate, vol, option_type);
        let r = price(&inputs)?;
        println!(
            "{:<6} {:<8} {:<8} {:<8} {:<8} {:<8} {:<8} {:<8} {:<8}",
            option_type, r.d1, r.d2, r.price, r.delta, r.gamma, r.theta, r.vega, r.rho
        );
    }

    println!("\nStep 2: Put-call parity on unrounded prices...");
    let call = price_unrounded(&PricingInputs::new(spot, 100.0, days, rate, vol, OptionType::Call))?;
    let put = price_unrounded(&PricingInputs::new(spot, 100.0, days, rate, vol, OptionType::Put))?;
    let forward_gap = spot - 100.0 * (-rate * days / 365.0).exp();
    println!("  call - put:       {:.10}", call.price - put.price);
    println!("  S - K*exp(-r*t):  {:.10}", forward_gap);

    println!("\nStep 3: Strike ladder...");
    println!(
        "{:<8} {:<12} {:<12} {:<12} {:<12}",
        "Strike", "Call Price", "Call Delta", "Put Price", "Put Delta"
    );
    println!("{}", "-".repeat(56));

    for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
        let call = price(&PricingInputs::new(spot, strike, days, rate, vol, OptionType::Call))?;
        let put = price(&PricingInputs::new(spot, strike, days, rate, vol, OptionType::Put))?;
        println!(
            "{:<8.0} {:<12.2} {:<12.3} {:<12.2} {:<12.3}",
            strike, call.price, call.delta, put.price, put.delta
        );
    }

    Ok(())
}
