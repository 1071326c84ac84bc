use clap::Parser;
use log::debug;
use std::process;

use raydium_quoter::padding::pad_numbers;

/// Left-pad every whole number in a string with zeros
#[derive(Parser, Debug)]
#[command(
    name = "padder",
    allow_negative_numbers = true,
    after_help = "Example:\n  padder \"James Bond 7\" 3"
)]
struct Args {
    /// Input string
    #[arg(allow_hyphen_values = true)]
    input: String,

    /// Minimum width of each whole number
    width: i64,
}

fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or("RUST_LOG", "info")
    );

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    debug!("Padding {:?} to width {}", args.input, args.width);
    let output = pad_numbers(&args.input, args.width);
    println!("Input:  {}", args.input);
    println!("Width:  {}", args.width);
    println!("Output: {}", output);
}
