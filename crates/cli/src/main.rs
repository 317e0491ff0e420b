use clap::{Parser, Subcommand};
use dnsproof_domain::{CliOverrides, DomainError, PayloadEncoding};
use std::process::ExitCode;
use tracing::{debug, error};

mod bootstrap;
mod di;
mod report;

use report::{ClaimReport, EligibilityReport};

/// Eligible name, or a claim address was found.
const EXIT_OK: u8 = 0;
/// The lookup succeeded but carried no valid claim address.
const EXIT_NO_PROOF: u8 = 1;
const EXIT_INELIGIBLE: u8 = 2;
/// Transport, decode or response-mismatch failure.
const EXIT_LOOKUP_FAILED: u8 = 3;

#[derive(Parser)]
#[command(name = "dnsproof")]
#[command(version)]
#[command(about = "Check DNS claim proofs published as TXT records under _ens.<name>")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up the claim proof for NAME over DNS-over-HTTPS
    Check {
        name: String,

        /// DoH endpoint, without query string
        #[arg(long, value_name = "URL")]
        resolver: Option<String>,

        /// Request timeout in seconds
        #[arg(short = 't', long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Payload encoding of the dns parameter (base64, base64url)
        #[arg(long)]
        encoding: Option<PayloadEncoding>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report whether NAME has an eligible shape, without network access
    Eligible {
        name: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            log_level: self.log_level.clone(),
            ..CliOverrides::default()
        };
        if let Command::Check {
            resolver,
            timeout,
            encoding,
            ..
        } = &self.command
        {
            overrides.resolver_url = resolver.clone();
            overrides.timeout_secs = *timeout;
            overrides.encoding = *encoding;
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config);
    bootstrap::log_config(&config);

    let code = match &cli.command {
        Command::Eligible { name, json } => {
            let report = EligibilityReport::new(name);
            print_report(&report, *json, EligibilityReport::render_text)?;
            if report.eligible {
                EXIT_OK
            } else {
                EXIT_INELIGIBLE
            }
        }
        Command::Check { name, json, .. } => {
            let use_cases = di::UseCases::new(&config);
            match use_cases.check_claim.execute(name).await {
                Ok(check) => {
                    let report = ClaimReport::new(&check, &config.resolver.url);
                    print_report(&report, *json, ClaimReport::render_text)?;
                    if report.has_proof() {
                        EXIT_OK
                    } else {
                        EXIT_NO_PROOF
                    }
                }
                Err(DomainError::EligibilityRejected(rejected)) => {
                    debug!(name = %rejected, "No query sent for ineligible name");
                    eprintln!("{}: not eligible for a DNS claim", rejected);
                    EXIT_INELIGIBLE
                }
                Err(e) => {
                    error!(error = %e, "Claim check failed");
                    eprintln!("error: {}", e);
                    EXIT_LOOKUP_FAILED
                }
            }
        }
    };

    Ok(ExitCode::from(code))
}

fn print_report<T: serde::Serialize>(
    report: &T,
    json: bool,
    render_text: fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", render_text(report).trim_end());
    }
    Ok(())
}
