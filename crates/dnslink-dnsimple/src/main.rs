// # dnslink-dnsimple
//
// Publish or update a dnslink TXT record on a DNSimple-managed domain.
//
// This binary is a THIN integration layer. Account resolution and record
// reconciliation live in dnslink-core.
//
// ## Configuration
//
// - `DNSIMPLE_TOKEN`: API token (required; `--token` also accepted)
// - `DNSIMPLE_BASE_URL`: API endpoint (optional, e.g. the sandbox)
//
// ## Example
//
// ```bash
// DNSIMPLE_TOKEN=$(cat dnsimple-token) dnslink-dnsimple -d domain.net -r _dnslink -l /ipns/ipfs.io
// ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use dnslink_core::config::{DEFAULT_BASE_URL, DEFAULT_RECORD_NAME, DEFAULT_TTL};
use dnslink_core::{DnslinkPublisher, DnslinkTarget, ProviderConfig, PublishConfig};
use dnslink_provider_dnsimple::DnsimpleClient;
use std::process::ExitCode;
use tracing::{Dispatch, Level};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the different ways a run can end
///
/// - 0: Record published
/// - 1: Missing or invalid input, nothing sent
/// - 2: Resolution or API failure
#[derive(Debug, Clone, Copy)]
enum DnslinkExitCode {
    /// Record created or updated
    Success = 0,
    /// Configuration error
    ConfigError = 1,
    /// Runtime error (zone not found, API failure)
    RuntimeError = 2,
}

impl From<DnslinkExitCode> for ExitCode {
    fn from(code: DnslinkExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(name = "dnslink-dnsimple")]
#[command(about = "Publish a dnslink TXT record to a DNSimple domain", long_about = None)]
#[command(version)]
#[command(after_help = "EXAMPLES:\n    \
    DNSIMPLE_TOKEN=$(cat dnsimple-token) dnslink-dnsimple -d domain.net -r _dnslink -l /ipns/ipfs.io")]
struct Cli {
    /// DNSimple domain name
    #[arg(short, long)]
    domain: String,

    /// Domain record name
    #[arg(short, long, default_value = DEFAULT_RECORD_NAME)]
    record: String,

    /// dnslink value, e.g. an ipfs path
    #[arg(short, long)]
    link: String,

    /// TTL of the record in seconds
    #[arg(long, default_value_t = DEFAULT_TTL)]
    ttl: u32,

    /// Show logging output
    #[arg(short, long)]
    verbose: bool,

    /// Resolve and log the intended write without sending it
    #[arg(long)]
    dry_run: bool,

    /// DNSimple API token
    #[arg(long, env = "DNSIMPLE_TOKEN", hide_env_values = true)]
    token: String,

    /// DNSimple API endpoint
    #[arg(long, env = "DNSIMPLE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

impl Cli {
    fn into_config(self) -> (PublishConfig, bool) {
        let config = PublishConfig {
            provider: ProviderConfig::new(self.token)
                .with_base_url(self.base_url)
                .with_dry_run(self.dry_run),
            target: DnslinkTarget::new(self.domain, self.record, self.link).with_ttl(self.ttl),
        };
        (config, self.verbose)
    }
}

/// Log sink selected once at startup: stderr when verbose, nowhere otherwise
fn log_dispatch(verbose: bool) -> Dispatch {
    if !verbose {
        return Dispatch::none();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    Dispatch::new(subscriber)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            if e.print().is_err() {
                eprintln!("{}", e);
            }
            return DnslinkExitCode::ConfigError.into();
        }
    };
    let (config, verbose) = cli.into_config();

    if let Err(e) = config.validate() {
        eprintln!("error: {}", config.provider.api_token.redact(&e.to_string()));
        eprintln!("{}", Cli::command().render_usage());
        return DnslinkExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {}", e);
            return DnslinkExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(run(&config, log_dispatch(verbose))) {
        Ok(line) => {
            println!("{}", line);
            DnslinkExitCode::Success.into()
        }
        Err(e) => {
            eprintln!("error: {}", config.provider.api_token.redact(&e.to_string()));
            DnslinkExitCode::RuntimeError.into()
        }
    }
}

/// Publish the record and return the line to print
async fn run(config: &PublishConfig, dispatch: Dispatch) -> Result<String> {
    let client =
        tracing::dispatcher::with_default(&dispatch, || DnsimpleClient::new(&config.provider))?;
    let publisher = DnslinkPublisher::new(Box::new(client)).with_dispatch(dispatch);

    let report = publisher.publish(&config.target).await?;

    let line = report.summary_line();
    if config.provider.dry_run {
        Ok(format!("[dry-run] would {}", line.replacen("updated", "update", 1)))
    } else {
        Ok(line)
    }
}
