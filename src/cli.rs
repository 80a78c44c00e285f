use crate::error::WalletError;
use crate::format::WalletFormat;
use crate::payload::RenderMode;
use crate::wallet::WalletOptions;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    UsageError = 1,
    FormatError = 2,
    AuthenticationError = 3,
    OtherError = 4,
}

impl Code {
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<WalletError>() {
            Some(WalletError::Format(_)) => Code::FormatError,
            Some(WalletError::Authentication) => Code::AuthenticationError,
            _ => Code::OtherError,
        }
    }
}

/// `argv[0]`, or `fallback` when the process was started with an empty argv.
pub fn program_name<'a>(args: &'a [String], fallback: &'a str) -> &'a str {
    args.first().map_or(fallback, String::as_str)
}

/// Options shared by the wallet binaries.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub options: WalletOptions,
    pub render: RenderMode,
}

/// Parse `--separate-iv`, `--iterations N` and `--json` out of trailing arguments.
pub fn parse_flags(args: &[String]) -> Result<Flags, String> {
    let mut flags = Flags::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--separate-iv" => flags.options.format = WalletFormat::SeparateIv,
            "--json" => flags.render = RenderMode::Json,
            "--iterations" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--iterations needs a value".to_string())?;
                flags.options.iterations = match value.parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(format!("Invalid iteration count: {value}")),
                };
            }
            other => return Err(format!("Unknown option: {other}")),
        }
    }
    Ok(flags)
}
