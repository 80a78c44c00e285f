use std::path::PathBuf;

use open_wallet::cli::{Code, parse_flags, program_name};
use open_wallet::{logger, open_wallet, render};

fn run(wallet_path: PathBuf, password: &str, extra: &[String]) -> anyhow::Result<()> {
    let flags = parse_flags(extra).map_err(anyhow::Error::msg)?;

    log::info!(
        "Opening {:?} wallet {}",
        flags.options.format,
        wallet_path.display()
    );
    let text = open_wallet(&wallet_path, password, flags.options)?;
    println!("{}", render(&text, flags.render)?);

    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} <wallet path> <password> [--json] [--separate-iv] [--iterations N]",
            program_name(&args, "open-wallet")
        );
        std::process::exit(Code::UsageError as i32);
    }

    logger::setup_logger();

    let wallet_path = PathBuf::from(&args[1]);
    if !wallet_path.is_file() {
        eprintln!(
            "Error: Wallet file '{}' does not exist.",
            wallet_path.display()
        );
        std::process::exit(Code::UsageError as i32);
    }

    if let Err(e) = run(wallet_path, &args[2], &args[3..]) {
        eprintln!("Error: {e}");
        std::process::exit(Code::from_error(&e) as i32);
    }
}
