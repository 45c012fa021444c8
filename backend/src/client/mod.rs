//! Upstream HTTP access.
//!
//! The collector reaches two upstream services: the placement driver for
//! region statistics and the SQL layer for schema metadata. Both sit
//! behind the [`RegionSource`] trait so tests can substitute a static
//! source. The consumer-side [`fetch_heatmaps`] lives here too.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::collector::catalog::{TableCatalog, TableMeta};
use crate::models::{RawHeatmapResponse, RegionInfo};

/// Failures while talking to an upstream service.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },
}

/// Access to the upstream region and schema APIs.
#[async_trait]
pub trait RegionSource: Send + Sync {
    /// All regions, sorted by start key.
    async fn scan_regions(&self) -> Result<Vec<RegionInfo>, SourceError>;

    /// Current table catalog.
    async fn load_catalog(&self) -> Result<TableCatalog, SourceError>;
}

/// reqwest-backed [`RegionSource`].
pub struct HttpRegionSource {
    http: reqwest::Client,
    pd_addr: String,
    tidb_addr: String,
    scan_limit: usize,
}

#[derive(Debug, Default, Deserialize)]
struct RegionsPage {
    #[serde(default)]
    regions: Vec<RegionInfo>,
}

#[derive(Debug, Deserialize)]
struct WireName {
    #[serde(rename = "O")]
    original: String,
    #[serde(rename = "L")]
    #[allow(dead_code)]
    lowercase: String,
}

#[derive(Debug, Deserialize)]
struct WireDatabase {
    #[serde(rename = "db_name")]
    name: WireName,
    state: i32,
}

#[derive(Debug, Deserialize)]
struct WireIndex {
    id: i64,
    #[serde(rename = "idx_name")]
    name: WireName,
}

#[derive(Debug, Deserialize)]
struct WireTable {
    id: i64,
    name: WireName,
    #[serde(rename = "index_info", default)]
    indices: Vec<WireIndex>,
}

impl HttpRegionSource {
    pub fn new(pd_addr: impl Into<String>, tidb_addr: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            pd_addr: pd_addr.into(),
            tidb_addr: tidb_addr.into(),
            scan_limit: 1024,
        }
    }

    pub fn with_scan_limit(mut self, limit: usize) -> Self {
        self.scan_limit = limit.max(1);
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SourceError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let mut deserializer = serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
            SourceError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }
}

#[async_trait]
impl RegionSource for HttpRegionSource {
    async fn scan_regions(&self) -> Result<Vec<RegionInfo>, SourceError> {
        let url = format!("{}/pd/api/v1/regions/key", self.pd_addr);
        let limit = self.scan_limit.to_string();

        let mut regions: Vec<RegionInfo> = Vec::new();
        let mut key = String::new();
        loop {
            let page: RegionsPage = self
                .get_json(&url, &[("key", key.as_str()), ("limit", limit.as_str())])
                .await?;
            if page.regions.is_empty() {
                break;
            }
            regions.extend(page.regions);

            let Some(last) = regions.last() else {
                break;
            };
            if last.end_key.is_empty() {
                break;
            }
            // The scan resumes from the raw key; end keys arrive hex-encoded.
            key = match hex::decode(&last.end_key) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(_) => {
                    warn!(end_key = %last.end_key, "undecodable end key, stopping scan");
                    break;
                }
            };
        }

        Ok(regions)
    }

    async fn load_catalog(&self) -> Result<TableCatalog, SourceError> {
        let databases: Vec<WireDatabase> = self
            .get_json(&format!("{}/schema", self.tidb_addr), &[])
            .await?;

        let mut tables = Vec::new();
        for database in databases {
            // State 0 marks a dropped database still visible in the schema.
            if database.state == 0 {
                continue;
            }

            let wire_tables: Vec<WireTable> = self
                .get_json(
                    &format!("{}/schema/{}", self.tidb_addr, database.name.original),
                    &[],
                )
                .await?;

            for table in wire_tables {
                let indices: BTreeMap<i64, String> = table
                    .indices
                    .into_iter()
                    .map(|idx| (idx.id, idx.name.original))
                    .collect();
                tables.push(TableMeta {
                    id: table.id,
                    db: database.name.original.clone(),
                    name: table.name.original,
                    indices,
                });
            }
        }

        Ok(TableCatalog::new(tables))
    }
}

/// Query parameters for [`fetch_heatmaps`].
#[derive(Debug, Clone, Default)]
pub struct HeatmapQuery {
    /// Window start relative to now, e.g. `-60m`.
    pub start: Option<String>,
    /// Window end relative to now.
    pub end: Option<String>,
    /// Metric tag, e.g. `written_bytes`.
    pub tag: Option<String>,
}

/// Fetch a heatmap payload from a keyviz server.
///
/// Network and decode failures are reported, not swallowed; callers decide
/// whether an empty render or a retry is appropriate.
pub async fn fetch_heatmaps(
    http: &reqwest::Client,
    base_url: &str,
    query: &HeatmapQuery,
) -> Result<RawHeatmapResponse, SourceError> {
    let url = format!("{}/heatmaps", base_url);
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    if let Some(start) = query.start.as_deref() {
        pairs.push(("start", start));
    }
    if let Some(end) = query.end.as_deref() {
        pairs.push(("end", end));
    }
    if let Some(tag) = query.tag.as_deref() {
        pairs.push(("tag", tag));
    }

    let response = http.get(&url).query(&pairs).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url,
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let mut deserializer = serde_json::Deserializer::from_str(&body);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|source| SourceError::Decode { url, source })
}
