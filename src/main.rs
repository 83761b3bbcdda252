//! Command-line front end: prices one option, prints the result and charts
//! the price and Greeks against the underlying price.
//!
//! Usage:
//!     bsm-greeks --spot 100 --strike 100 --days 30 --rate 0.05 --volatility 0.2 --option-type call
//!
//! Any pricing input left off the command line is prompted for on stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{debug, info};

use bsm_greeks::{
    price, sweep_with_config, visualize, write_csv, DriverConfig, OptionType, PricingInputs,
    PricingResult,
};

/// Black-Scholes-Merton price and Greeks for a European option
#[derive(Parser, Debug)]
#[command(name = "bsm-greeks")]
#[command(version, about, long_about = None)]
struct Args {
    /// Price of the underlying asset
    #[arg(long)]
    spot: Option<f64>,

    /// Strike price
    #[arg(long)]
    strike: Option<f64>,

    /// Time to maturity in calendar days
    #[arg(long)]
    days: Option<f64>,

    /// Annualized risk-free rate as a decimal (0.05 for 5%)
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Annualized volatility as a decimal (0.2 for 20%)
    #[arg(long)]
    volatility: Option<f64>,

    /// Option type: call or put
    #[arg(long)]
    option_type: Option<String>,

    /// Driver configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory receiving the charts (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Also export the sweep as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Print the result without sweeping or charting
    #[arg(long)]
    no_plots: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Writes prompts to `output` and reads the answers from `input`.
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn ask<T>(&mut self, prompt: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(anyhow!("unexpected end of input at prompt: {}", prompt.trim()));
        }
        let value = line.trim();
        value
            .parse()
            .with_context(|| format!("could not parse '{value}'"))
    }

    fn or_ask<T>(&mut self, given: Option<T>, prompt: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match given {
            Some(value) => Ok(value),
            None => self.ask(prompt),
        }
    }
}

/// Collect the pricing inputs, taking each from `args` when given and
/// prompting for it otherwise.
fn read_inputs<R: BufRead, W: Write>(args: &Args, input: R, output: W) -> Result<PricingInputs> {
    let mut prompter = Prompter { input, output };

    let spot = prompter.or_ask(args.spot, "Enter the Price of the underlying asset: ")?;
    let strike = prompter.or_ask(args.strike, "Enter a Strike Price: ")?;
    let days = prompter.or_ask(args.days, "Enter a Time to Maturity (in days): ")?;
    let rate = prompter.or_ask(
        args.rate,
        "Enter a Risk Free Rate (annualized in 0.xx format): ",
    )?;
    let volatility = prompter.or_ask(
        args.volatility,
        "Enter a Volatility (annualized in x.xx format): ",
    )?;
    let option_type: OptionType = match &args.option_type {
        Some(raw) => raw.parse()?,
        None => prompter.ask("Enter an Option Type (call/put): ")?,
    };

    Ok(PricingInputs::new(
        spot,
        strike,
        days,
        rate,
        volatility,
        option_type,
    ))
}

fn print_result<W: Write>(mut out: W, result: &PricingResult) -> io::Result<()> {
    writeln!(out, "d1: {}", result.d1)?;
    writeln!(out, "d2: {}", result.d2)?;
    writeln!(out, "Price: {}\n", result.price)?;
    writeln!(out, "Delta: {}", result.delta)?;
    writeln!(out, "Gamma: {}", result.gamma)?;
    writeln!(out, "Theta: {}", result.theta)?;
    writeln!(out, "Vega: {}", result.vega)?;
    writeln!(out, "Rho: {}", result.rho)
}

/// Read the inputs, price them and print the result block. Nothing is printed
/// beyond the prompts when the inputs are rejected.
fn price_and_print<R: BufRead, W: Write>(
    args: &Args,
    input: R,
    mut output: W,
) -> Result<PricingInputs> {
    let inputs = read_inputs(args, input, &mut output)?;
    let result = price(&inputs)?;
    print_result(&mut output, &result)?;
    Ok(inputs)
}

fn load_config(args: &Args) -> Result<DriverConfig> {
    let mut config = match &args.config {
        Some(path) => DriverConfig::load(path)?,
        None => DriverConfig::default(),
    };
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = load_config(&args)?;
    debug!(?config, "driver configuration loaded");

    let inputs = price_and_print(&args, io::stdin().lock(), io::stdout())?;

    if args.no_plots {
        if let Some(path) = &args.csv {
            write_csv(&sweep_with_config(&inputs, &config.sweep)?, path)?;
        }
        return Ok(());
    }

    let (sweep, charts) = visualize(&inputs, &config)?;
    for path in &charts {
        info!(path = %path.display(), "saved chart");
    }
    if let Some(path) = &args.csv {
        write_csv(&sweep, path)?;
    }
    println!("\nCharts saved to {}", config.output_dir.display());

    Ok(())
}
