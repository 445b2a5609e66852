//! sns-verify: validate an SNS message from the command line
//!
//! Reads a JSON-encoded SNS message (HTTP endpoint or Lambda shape) from a
//! file or stdin, fetches its signing certificate and checks the signature.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sns_message_validator::{
    FetcherConfig, HttpCertificateFetcher, MessageValidationApi, SnsMessage, SnsValidator,
    ValidationError,
};

/// sns-verify: SNS message validator
#[derive(Parser, Debug)]
#[command(name = "sns-verify")]
#[command(about = "Validate the structure and signature of an SNS message")]
struct Args {
    /// JSON message file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Whole-request timeout for the certificate fetch, in seconds
    #[arg(long, default_value = "10")]
    request_timeout: u64,

    /// Connect timeout for the certificate fetch, in seconds
    #[arg(long, default_value = "5")]
    connect_timeout: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(input = ?args.input, "Reading SNS message");
    let encoded = read_input(args.input.as_deref())?;

    let message = match SnsMessage::from_json(&encoded) {
        Ok(message) => message,
        Err(err) => {
            println!("{}: {}", err.kind(), err);
            return Ok(ExitCode::from(2));
        }
    };

    let config = FetcherConfig {
        request_timeout: args.request_timeout,
        connect_timeout: args.connect_timeout,
        ..Default::default()
    };
    let fetcher = HttpCertificateFetcher::new(&config).context("invalid fetcher configuration")?;

    let fields = message.to_field_map();
    let result = SnsValidator::new_v1(&fields, fetcher)
        .validate_message()
        .await;

    println!("{}", summarize(&result, &message.message_id));
    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// One-line outcome: `OK <MessageId>` or `<Kind>: <reason>`.
fn summarize(result: &Result<(), ValidationError>, message_id: &str) -> String {
    match result {
        Ok(()) => format!("OK {message_id}"),
        Err(err) => format!("{}: {}", err.kind(), err),
    }
}
