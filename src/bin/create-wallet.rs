use std::path::PathBuf;

use open_wallet::cli::{Code, parse_flags, program_name};
use open_wallet::{RenderMode, create_wallet, logger, render};

fn run(
    payload_path: PathBuf,
    wallet_path: PathBuf,
    password: &str,
    extra: &[String],
) -> anyhow::Result<()> {
    let flags = parse_flags(extra).map_err(anyhow::Error::msg)?;

    let plaintext = std::fs::read_to_string(&payload_path)?;
    if flags.render == RenderMode::Json {
        // Refuse to seal a payload that will not open as JSON later
        render(&plaintext, RenderMode::Json)?;
    }
    create_wallet(&wallet_path, &plaintext, password, flags.options)?;

    println!(
        "Wallet created successfully. Saved to: {}",
        wallet_path.display()
    );
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 4 {
        eprintln!(
            "Usage: {} <payload path> <wallet path> <password> [--json] [--separate-iv] [--iterations N]",
            program_name(&args, "create-wallet")
        );
        std::process::exit(Code::UsageError as i32);
    }

    logger::setup_logger();

    let payload_path = PathBuf::from(&args[1]);
    if !payload_path.is_file() {
        eprintln!(
            "Error: Payload file '{}' does not exist.",
            payload_path.display()
        );
        std::process::exit(Code::UsageError as i32);
    }
    let wallet_path = PathBuf::from(&args[2]);

    if let Err(e) = run(payload_path, wallet_path, &args[3], &args[4..]) {
        eprintln!("Error: {e}");
        std::process::exit(Code::from_error(&e) as i32);
    }
}
