//! Where store lists and the global ratio come from
//!
//! The backend API is an external collaborator; [`ApiClient`] only reads
//! the two endpoints this crate needs. [`JsonFileSource`] serves the same
//! data from a local snapshot.

use crate::config::Config;
use crate::constants::api::{OCCUPATIONS_PATH, STORES_PATH};
use crate::error::{Error, Result};
use crate::store::{deserialize_stores, parse_stores, Store};
use crate::territory::ratio::OccupationRatio;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Supplier of stores and the global occupation ratio
pub trait StoreSource: Send + Sync {
    /// All stores to place on the map
    fn fetch_stores(&self) -> impl std::future::Future<Output = Result<Vec<Store>>> + Send;

    /// Pre-aggregated global ratio
    fn fetch_occupations(
        &self,
    ) -> impl std::future::Future<Output = Result<OccupationRatio>> + Send;
}

/// Read-only client for the backend REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Source(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client for the backend named in config
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api.base_url, config.api.timeout_secs)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Source(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Source(format!(
                "{} returned status: {}",
                url,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Source(format!("Failed to parse response from {}: {}", url, e)))
    }
}

impl StoreSource for ApiClient {
    async fn fetch_stores(&self) -> Result<Vec<Store>> {
        let records: Vec<serde_json::Value> = self.get_json(STORES_PATH).await?;
        Ok(parse_stores(records))
    }

    async fn fetch_occupations(&self) -> Result<OccupationRatio> {
        self.get_json(OCCUPATIONS_PATH).await
    }
}

/// On-disk snapshot layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "deserialize_stores")]
    pub stores: Vec<Store>,
    #[serde(default)]
    pub occupations: OccupationRatio,
}

/// Stores and occupations read from a JSON snapshot file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole snapshot
    pub fn load(&self) -> Result<Snapshot> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            Error::Source(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Source(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }
}

impl StoreSource for JsonFileSource {
    async fn fetch_stores(&self) -> Result<Vec<Store>> {
        Ok(self.load()?.stores)
    }

    async fn fetch_occupations(&self) -> Result<OccupationRatio> {
        Ok(self.load()?.occupations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreType;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_api_client_fetches_stores() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/store"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"store_id": "1", "store_name": "만주점", "address": "서울 중구", "store_type": "food"},
                {"store_id": "2", "store_name": "척화비국수", "address": "서울 종로구", "store_type": "drink"}
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), 5).unwrap();
        let stores = client.fetch_stores().await.unwrap();

        assert_eq!(stores.len(), 2);
        assert_eq!(stores[1].store_type, StoreType::Drink);
    }

    #[tokio::test]
    async fn test_api_client_fetches_occupations() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/occupations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "goguryeo_ratio": 34.0, "baekjae_ratio": 33.0, "shinla_ratio": 33.0
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/", server.uri()), 5).unwrap();
        let ratio = client.fetch_occupations().await.unwrap();

        assert_eq!(ratio, OccupationRatio::new(34.0, 33.0, 33.0));
    }

    #[tokio::test]
    async fn test_api_client_reports_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), 5).unwrap();
        let err = client.fetch_stores().await.unwrap_err();
        assert!(matches!(err, Error::Source(_)));
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snapshot.json");
        fs::write(
            &path,
            json!({
                "stores": [
                    {"store_id": "1", "store_name": "a", "address": "x", "store_type": "cafe"}
                ]
            })
            .to_string(),
        )
        .unwrap();

        let source = JsonFileSource::new(&path);
        assert_eq!(source.fetch_stores().await.unwrap().len(), 1);
        assert_eq!(
            source.fetch_occupations().await.unwrap(),
            OccupationRatio::default()
        );
    }

    #[tokio::test]
    async fn test_json_file_source_keeps_good_stores() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snapshot.json");
        fs::write(
            &path,
            json!({
                "stores": [
                    {"store_id": "a", "store_name": "a", "address": "x", "store_type": "food"},
                    {"store_id": "b", "store_name": "b", "address": "y", "store_type": "bakery"},
                    {"store_id": "c", "store_name": "c", "store_type": "cafe"}
                ]
            })
            .to_string(),
        )
        .unwrap();

        let stores = JsonFileSource::new(&path).fetch_stores().await.unwrap();
        let ids: Vec<&str> = stores.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(stores[1].store_type, StoreType::Other);
    }

    #[tokio::test]
    async fn test_api_client_drops_malformed_store() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/store"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"store_id": "1", "store_name": "a", "address": "x", "store_type": "food"},
                {"store_id": 2, "store_name": null}
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), 5).unwrap();
        let stores = client.fetch_stores().await.unwrap();

        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].id, "1");
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let source = JsonFileSource::new("/nonexistent/snapshot.json");
        assert!(source.fetch_stores().await.is_err());
    }
}
