//! wallet-fx CLI - currency conversion and exchange simulation
//!
//! ## Example Usage
//!
//! ```bash
//! # Convert with the configured rate table
//! wallet-fx convert USD EUR 100
//!
//! # Carbon estimate for a transfer amount
//! wallet-fx carbon 250
//!
//! # Simulate an exchange at the latest dated snapshot
//! wallet-fx exchange USD AUD 200 --rates fx_data/fxrates.json \
//!     --balances fx_data/balances.json --log fx_data/transactions.json --save
//!
//! # Show the dashboard built from mock data
//! wallet-fx dashboard --currency AUD
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use wallet_fx::amount::{format_money, parse_amount};
use wallet_fx::carbon::CarbonBand;
use wallet_fx::compliance::ComplianceStatus;
use wallet_fx::config::WalletConfig;
use wallet_fx::currency::Currency;
use wallet_fx::fx::{convert_input, ConversionRequest, MissingRatePolicy, RateHistory, RateReader};
use wallet_fx::seed;
use wallet_fx::transaction::TransactionStatus;
use wallet_fx::view::dashboard;
use wallet_fx::wallet::{ExchangeReceipt, Wallet};

/// wallet-fx: currency conversion for a multi-currency wallet
#[derive(Parser, Debug)]
#[command(name = "wallet-fx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Currency conversion and exchange simulation", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an amount between currencies
    Convert {
        #[arg(value_name = "FROM")]
        from: Currency,

        #[arg(value_name = "TO")]
        to: Currency,

        #[arg(value_name = "AMOUNT")]
        amount: String,

        /// Fail when the pair has no configured rate
        #[arg(long)]
        strict: bool,
    },

    /// Estimate the carbon footprint of a transfer
    Carbon {
        #[arg(value_name = "AMOUNT")]
        amount: String,
    },

    /// Simulate exchanging funds in a wallet
    Exchange {
        #[arg(value_name = "FROM")]
        from: Currency,

        #[arg(value_name = "TO")]
        to: Currency,

        #[arg(value_name = "AMOUNT")]
        amount: String,

        /// Dated rate snapshots (JSON); the latest day is used
        #[arg(short = 'r', long)]
        rates: Option<PathBuf>,

        /// Balances file (JSON); mock balances when omitted
        #[arg(short = 'b', long)]
        balances: Option<PathBuf>,

        /// Append the receipt to this JSON transaction log
        #[arg(short = 'l', long)]
        log: Option<PathBuf>,

        /// Write updated balances back to the balances file
        #[arg(long, requires = "balances")]
        save: bool,
    },

    /// List configured rates
    Rates {
        /// Dated rate snapshots (JSON); shows the latest day
        #[arg(short = 'r', long)]
        rates: Option<PathBuf>,
    },

    /// Show balances and recent transactions from mock data
    Dashboard {
        /// Currency to total balances in
        #[arg(long)]
        currency: Option<Currency>,
    },

    /// Show configuration
    Info,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".wallet-fx").join("config.toml"))
}

fn parse_config(contents: &str) -> Result<WalletConfig> {
    toml::from_str(contents).context("Failed to parse config")
}

fn load_config(path: Option<&Path>) -> Result<WalletConfig> {
    if let Some(config_path) = path {
        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        return parse_config(&contents);
    }

    // Try default location
    if let Some(default_config) = default_config_path() {
        if default_config.exists() {
            match fs::read_to_string(&default_config) {
                Ok(contents) => return parse_config(&contents),
                Err(e) => eprintln!("{} Failed to read config: {}", "Warning:".yellow(), e),
            }
        }
    }

    Ok(WalletConfig::default())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    if cli.verbose {
        println!(
            "{} v{}",
            "wallet-fx".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
    }

    let result = match cli.command {
        Commands::Convert {
            from,
            to,
            amount,
            strict,
        } => run_convert(&config, from, to, &amount, strict),
        Commands::Carbon { amount } => run_carbon(&config, &amount),
        Commands::Exchange {
            from,
            to,
            amount,
            rates,
            balances,
            log,
            save,
        } => run_exchange(ExchangeArgs {
            from,
            to,
            amount,
            rates,
            balances,
            log,
            save,
            config,
        }),
        Commands::Rates { rates } => show_rates(&config, rates.as_deref()),
        Commands::Dashboard { currency } => show_dashboard(&config, currency),
        Commands::Info => show_info(&config, cli.config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

struct ExchangeArgs {
    from: Currency,
    to: Currency,
    amount: String,
    rates: Option<PathBuf>,
    balances: Option<PathBuf>,
    log: Option<PathBuf>,
    save: bool,
    config: WalletConfig,
}

fn run_convert(
    config: &WalletConfig,
    from: Currency,
    to: Currency,
    amount: &str,
    strict: bool,
) -> Result<()> {
    let table = config.rate_table()?;
    let policy = if strict {
        MissingRatePolicy::Strict
    } else {
        config.missing_rate_policy
    };

    if !table.has_rate(from, to) {
        eprintln!(
            "{} no rate configured for {}/{}",
            "Warning:".yellow(),
            from,
            to
        );
    }

    let conversion = convert_input(amount, from, to, &table, policy)?;
    println!(
        "{} {} {} {} {}",
        format_money(conversion.request.amount),
        from,
        "→".dimmed(),
        format_money(conversion.raw).green().bold(),
        to
    );
    println!("  {} {:.4}", "Rate:".bold(), conversion.rate);
    Ok(())
}

fn band_label(band: CarbonBand) -> colored::ColoredString {
    match band {
        CarbonBand::Low => band.to_string().green(),
        CarbonBand::Medium => band.to_string().yellow(),
        CarbonBand::High => band.to_string().red(),
    }
}

fn run_carbon(config: &WalletConfig, amount: &str) -> Result<()> {
    let amount = parse_amount(amount)?;
    let estimate = config.exchange.carbon.estimate(amount)?;
    println!(
        "{:.3} kg CO₂ ({})",
        estimate.kilograms,
        band_label(estimate.band)
    );
    Ok(())
}

fn run_exchange(args: ExchangeArgs) -> Result<()> {
    let amount = parse_amount(&args.amount)?;
    let request = ConversionRequest::new(amount, args.from, args.to)?;

    let mut wallet = match &args.balances {
        Some(path) if path.exists() => Wallet::from_path(path)
            .with_context(|| format!("Failed to load balances from {}", path.display()))?,
        _ => seed::wallet(),
    };

    let receipt = match &args.rates {
        Some(path) => {
            let history = RateHistory::from_path(path)
                .with_context(|| format!("Failed to load rates from {}", path.display()))?;
            wallet.exchange_with_history(
                &request,
                &history,
                args.config.pivot_currency,
                &args.config.exchange,
            )?
        }
        None => {
            let table = args.config.rate_table()?;
            wallet.exchange(&request, &table, &args.config.exchange)?
        }
    };

    print_receipt(&receipt);

    if let Some(log_path) = &args.log {
        append_receipt(log_path, &receipt)?;
        println!("{} Logged to {}", "✓".green().bold(), log_path.display());
    }

    if let (true, Some(path)) = (args.save, &args.balances) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, wallet.to_json_string()?)?;
        println!("{} Balances saved to {}", "✓".green().bold(), path.display());
    }

    Ok(())
}

fn balance_line(receipt_balances: &wallet_fx::wallet::Balances) -> String {
    Currency::all()
        .iter()
        .map(|c| {
            let amount = receipt_balances.get(c).copied().unwrap_or(0.0);
            format!("{} {}", c, format_money(amount))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn print_receipt(receipt: &ExchangeReceipt) {
    let txn = &receipt.transaction;
    println!("{}", "FX Exchange".cyan().bold());
    if let Some(date) = receipt.rate_date {
        println!("  {} {}", "Rates from:".bold(), date);
    }
    println!(
        "  {} {}->{}: {:.6}",
        "Rate".bold(),
        txn.from_currency,
        txn.to_currency,
        receipt.rate
    );
    println!(
        "  {} {} {} → {} {}",
        "Amount:".bold(),
        format_money(txn.from_amount),
        txn.from_currency,
        format_money(txn.to_amount),
        txn.to_currency
    );
    println!();
    println!("  {} {}", "Before:".bold(), balance_line(&receipt.balances_before));
    println!("  {} {}", "After: ".bold(), balance_line(&receipt.balances_after));
    println!();

    let compliance = match receipt.compliance {
        ComplianceStatus::Clear => receipt.compliance.to_string().green(),
        ComplianceStatus::Review => receipt.compliance.to_string().yellow().bold(),
    };
    println!(
        "  {} {:.3} kg CO₂ ({})  |  {} {}",
        "Carbon:".bold(),
        receipt.carbon.kilograms,
        band_label(receipt.carbon.band),
        "Compliance:".bold(),
        compliance
    );
}

fn append_receipt(path: &Path, receipt: &ExchangeReceipt) -> Result<()> {
    let mut log: Vec<serde_json::Value> = if path.exists() {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Transaction log {} is not a JSON array", path.display()))?
        }
    } else {
        Vec::new()
    };

    log.push(serde_json::to_value(receipt)?);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&log)?)?;
    Ok(())
}

fn show_rates(config: &WalletConfig, snapshots: Option<&Path>) -> Result<()> {
    let (label, table) = match snapshots {
        Some(path) => {
            let history = RateHistory::from_path(path)?;
            let (date, table) = history.require_latest()?;
            (format!("Rates for {}", date), table.clone())
        }
        None => ("Configured rates".to_string(), config.rate_table()?),
    };

    println!("{}", label.bold());
    println!("{}", "=".repeat(label.len()).dimmed());
    for (pair, rate) in table.iter() {
        println!("  {}  {:.4}", pair, rate);
    }

    let missing = table.missing_pairs();
    if !missing.is_empty() {
        println!();
        println!("{}", "Missing pairs".yellow().bold());
        for pair in missing {
            let fallback = match config.missing_rate_policy {
                MissingRatePolicy::Identity => "falls back to 1.0",
                MissingRatePolicy::Strict => "rejected",
            };
            println!("  {}  {}", pair, fallback.dimmed());
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct DashboardSummary {
    currency: Currency,
    total_balance: f64,
    transactions: usize,
}

fn show_dashboard(config: &WalletConfig, currency: Option<Currency>) -> Result<()> {
    let table = config.rate_table()?;
    let currency = currency.unwrap_or(config.display_currency);
    let wallet = seed::wallet();
    let history = seed::transactions();
    let view = dashboard(&wallet, &history, currency, &table, config.missing_rate_policy)?;

    println!("{}", "Wallet Balance".bold());
    println!(
        "  {}{} {}",
        currency.symbol(),
        format_money(view.total_balance).green().bold(),
        currency
    );
    for (c, amount) in wallet.balances() {
        println!("  {} {}", c, format_money(*amount));
    }
    println!();

    println!("{}", "Recent Transactions".bold());
    for row in &view.rows {
        let txn = &row.transaction;
        let status = match txn.status {
            TransactionStatus::Completed => txn.status.to_string().green(),
            TransactionStatus::Pending => txn.status.to_string().yellow(),
            TransactionStatus::Failed => txn.status.to_string().red(),
        };
        println!(
            "  {}  {} {} → {} {}  {}  {:.3} kg ({})",
            txn.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            format_money(txn.from_amount),
            txn.from_currency,
            format_money(txn.to_amount),
            txn.to_currency,
            status,
            row.carbon.kilograms,
            band_label(row.carbon.band)
        );
    }

    log::debug!(
        "{}",
        serde_json::to_string(&DashboardSummary {
            currency,
            total_balance: view.total_balance,
            transactions: view.rows.len(),
        })?
    );
    Ok(())
}

fn show_info(config: &WalletConfig, config_path: Option<&Path>) -> Result<()> {
    println!(
        "{} {}",
        "wallet-fx".cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();

    let source = config_path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .filter(|p| p.exists())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());

    println!("{}", "Configuration".bold());
    println!("{}", "=============".dimmed());
    println!("  {} {}", "Source:".bold(), source);
    println!("  {} {:?}", "Missing rates:".bold(), config.missing_rate_policy);
    println!("  {} {}", "Display currency:".bold(), config.display_currency);
    println!("  {} {}", "Pivot currency:".bold(), config.pivot_currency);
    println!("  {} {}", "Rates configured:".bold(), config.rate_table()?.len());
    println!(
        "  {} {}",
        "Review threshold:".bold(),
        format_money(config.exchange.review_threshold)
    );
    println!();
    Ok(())
}
