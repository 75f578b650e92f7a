use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::error;
use tracing::info;

use crate::Result;
use crate::config::Config;
use crate::config::load_config;
use crate::err_with_loc;
use crate::error::ScannerError;
use crate::model::WalletOccurrence;
use crate::service::FirstBuyerService;
use crate::tracing::setup_tracing;

#[derive(Debug, Parser)]
#[command(name = "kashif", version, about = "Find the first buyers of Solana tokens")]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = "Config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// First buyers of one token
    FirstBuyers {
        #[arg(long)]
        token: String,
        #[arg(long)]
        limit: usize,
        /// Print the full scan report instead of the address list
        #[arg(long)]
        report: bool,
    },
    /// Wallets found among the first buyers of several tokens
    CommonBuyers {
        #[arg(long)]
        limit: usize,
        #[arg(long = "token", required = true)]
        tokens: Vec<String>,
        /// Only wallets seen in more than one token
        #[arg(long)]
        common_only: bool,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FirstBuyersResponse {
    first_buyers: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommonBuyersResponse {
    common_buyers: Vec<WalletOccurrence>,
}

#[derive(Clone)]
pub struct Kashif {
    pub config: Config,
    pub service: Arc<FirstBuyerService>,
}

impl Kashif {
    pub async fn run() -> Result<()> {
        Self::run_with(Cli::parse()).await
    }

    pub async fn run_with(cli: Cli) -> Result<()> {
        let config = load_config(&cli.config)?;
        let _tracing_guard = setup_tracing("kashif", &config.logging);
        info!("Starting Kashif (كاشف): The Revealer");

        let cancellation_token = CancellationToken::new();
        let service = FirstBuyerService::from_config(&config, cancellation_token.clone())?;
        let kashif = Kashif {
            config,
            service: Arc::new(service),
        };

        let signal_token = cancellation_token.clone();
        let signal_watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("termination_signal::cancelling_scans");
                signal_token.cancel();
            }
        });

        let output = kashif.execute(cli.command).await;
        signal_watcher.abort();

        if cancellation_token.is_cancelled() {
            return Err(err_with_loc!(ScannerError::Cancelled("interrupted by termination signal".to_string())));
        }

        match output {
            Ok(output) => {
                println!("{}", output);
                info!("kashif::shutdown");
                Ok(())
            },
            Err(e) => {
                error!("kashif::failed::{:#}", e);
                Err(e)
            },
        }
    }

    /// Run one command and render its JSON response
    pub async fn execute(
        &self,
        command: Command,
    ) -> Result<String> {
        match command {
            Command::FirstBuyers {
                token,
                limit,
                report,
            } => {
                if report {
                    let report = self.service.first_buyers_report(&token, limit).await?;
                    return render(&report);
                }
                let first_buyers = self.service.get_first_buyers_of_token(&token, limit).await?;
                render(&FirstBuyersResponse { first_buyers })
            },
            Command::CommonBuyers {
                limit,
                tokens,
                common_only,
            } => {
                let mut common_buyers = self.service.find_common_addresses_in_tokens(limit, &tokens).await?;
                if common_only {
                    common_buyers.retain(WalletOccurrence::is_common);
                }
                render(&CommonBuyersResponse { common_buyers })
            },
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| err_with_loc!(format!("failed to render response: {}", e)))
}
