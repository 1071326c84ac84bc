use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use log::info;
use std::process;

use raydium_quoter::config;
use raydium_quoter::models::{QuoteRequest, PROTOCOL_NAME};
use raydium_quoter::quote::QuoteService;

const AFTER_HELP: &str = "Example:
  raydium-quoter -token EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v -qty 100 -side buy

Note: Uses Raydium protocol. All pairs denominated in SOL/wSOL.";

#[derive(Parser, Debug)]
#[command(
    name = "raydium-quoter",
    version,
    about = "Get a price quote from Raydium DEX on Solana",
    after_help = AFTER_HELP
)]
struct Args {
    /// Token mint address
    #[arg(long)]
    token: String,

    /// Quantity to trade, in SOL
    #[arg(long, allow_hyphen_values = true)]
    qty: String,

    /// Trade side: buy or sell
    #[arg(long)]
    side: String,

    /// Solana RPC URL (overrides RPC_URL)
    #[arg(long)]
    rpc: Option<String>,

    /// Use the built-in mock pools instead of chain data
    #[arg(long)]
    mock: bool,

    /// Use the Raydium API to find pools dynamically
    #[arg(long)]
    api: bool,

    /// Read pool layout and vault balances directly from the chain
    #[arg(long)]
    onchain: bool,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logger();

    let args = match Args::try_parse_from(normalize_args(std::env::args())) {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = config::load_config()?;
    if let Some(rpc) = args.rpc {
        config.rpc_url = rpc;
    }
    config.use_mock = args.mock;
    config.use_api = args.api;
    config.use_onchain = args.onchain;
    info!("Using RPC endpoint {}", config.rpc_url);

    let request = QuoteRequest::parse(&args.token, &args.qty, &args.side)?;
    let service = QuoteService::from_config(&config).context("Failed to create quote service")?;

    if config.use_api {
        println!("API mode enabled - will search for pools dynamically");
    }
    if config.use_onchain {
        println!("Onchain mode enabled - will fetch all data from blockchain");
    }

    println!("Fetching quote from {}...", PROTOCOL_NAME);
    if config.use_mock {
        println!("Using mock data...");
    }

    let quote = service
        .get_quote(&request)
        .await
        .context("Failed to get quote")?;

    println!("\n===== QUOTE RESULT =====");
    println!("Protocol: {}", quote.protocol);
    println!("Token: {}", quote.token_symbol);
    println!("Side: {}", request.side);
    println!("Quantity: {}", args.qty);
    println!("Price: {} SOL", quote.price_formatted);
    println!("Decimals: {}", quote.decimals);
    println!("=======================");

    Ok(())
}

/// Accept single-dash long flags (`-token`) alongside `--token`
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            let single_dash_word = arg.len() > 2
                && arg.starts_with('-')
                && !arg.starts_with("--")
                && arg[1..].starts_with(|c: char| c.is_ascii_alphabetic());
            if i > 0 && single_dash_word {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}

fn init_logger() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or("RUST_LOG", "info")
    );
}
