use async_trait::async_trait;
use tracing::debug;
use tracing::warn;

use super::status_error;
use super::transport_error;
use crate::Result;
use crate::config::RetryPolicy;
use crate::config::SolscanConfig;
use crate::constants::MINT_EXPORT_COLUMNS;
use crate::constants::MINT_EXPORT_HEADER;
use crate::constants::MINT_ROW_TYPE;
use crate::err_with_loc;
use crate::error::ScannerError;
use crate::model::MintTransactionRecord;
use crate::utils::unix_now;
use crate::utils::with_retry;

#[async_trait]
pub trait MintLocator: Send + Sync {
    /// Find the mint transaction of a token
    async fn locate_mint(
        &self,
        token_address: &str,
    ) -> Result<MintTransactionRecord>;
}

/// Reads the mint row out of the Solscan token transfer export
pub struct SolscanMintLocator {
    client: reqwest::Client,
    config: SolscanConfig,
    retry: RetryPolicy,
}

impl SolscanMintLocator {
    pub fn new(
        client: reqwest::Client,
        config: SolscanConfig,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            config,
            retry,
        }
    }

    async fn export(
        &self,
        token_address: &str,
    ) -> Result<String> {
        let query = [
            ("token_address", token_address.to_string()),
            ("type", MINT_ROW_TYPE.to_string()),
            ("timefrom", self.config.time_from.to_string()),
            ("timeto", unix_now().to_string()),
        ];

        let mut request = self.client.get(&self.config.export_url).query(&query);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("token", api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| err_with_loc!(transport_error(&format!("mint export for {}", token_address), &e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(err_with_loc!(status_error(&format!("mint export for {}", token_address), status)));
        }

        response
            .text()
            .await
            .map_err(|e| err_with_loc!(transport_error(&format!("mint export body for {}", token_address), &e)))
    }
}

#[async_trait]
impl MintLocator for SolscanMintLocator {
    async fn locate_mint(
        &self,
        token_address: &str,
    ) -> Result<MintTransactionRecord> {
        debug!("locating_mint::token::{}", token_address);
        let body = with_retry(&self.retry, "mint_export", || self.export(token_address)).await?;
        let record = parse_mint_export(&body, token_address)?;
        debug!(
            "mint_located::token::{}::deployer::{}::slot::{}",
            token_address,
            record.deployer(),
            record.slot
        );
        Ok(record)
    }
}

/// First `mint` row of the export. The header row is skipped, and every other
/// row must carry the full column set.
pub fn parse_mint_export(
    body: &str,
    token_address: &str,
) -> Result<MintTransactionRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(body.as_bytes());

    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| {
            err_with_loc!(ScannerError::Parse(format!("mint export row {} for {}: {}", index, token_address, e)))
        })?;

        let kind = row.get(0).unwrap_or_default();
        if kind == MINT_EXPORT_HEADER {
            continue;
        }

        if row.len() != MINT_EXPORT_COLUMNS {
            return Err(err_with_loc!(ScannerError::Parse(format!(
                "mint export row {} for {} has {} columns, expected {}",
                index,
                token_address,
                row.len(),
                MINT_EXPORT_COLUMNS
            ))));
        }

        if kind != MINT_ROW_TYPE {
            continue;
        }

        let columns: Vec<&str> = row.iter().collect();
        if let Some(record) = MintTransactionRecord::from_columns(&columns) {
            if record.is_empty() {
                warn!("mint_row_missing_deployer::token::{}::row::{}", token_address, index);
                continue;
            }
            return Ok(record);
        }
    }

    Err(err_with_loc!(ScannerError::MintNotFound(token_address.to_string())))
}
