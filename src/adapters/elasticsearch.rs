use crate::core::{SearchIndex, ThreatDocument};
use crate::utils::error::{Result, ScoreError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Debug, Deserialize)]
struct Hits {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: ThreatDocument,
}

/// Client for an Elasticsearch compatible REST endpoint.
///
/// Obtained with [`ElasticsearchClient::connect`] and released with
/// [`ElasticsearchClient::close`]; callers pass it to whatever needs the index.
#[derive(Debug, Clone)]
pub struct ElasticsearchClient {
    client: Client,
    base_url: Url,
}

impl ElasticsearchClient {
    pub fn connect(endpoint: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(endpoint)?;
        // Url::join 會把最後一段路徑換掉，所以確保以 '/' 結尾
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;
        tracing::debug!("Search client ready for {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn close(self) {
        tracing::debug!("Closing search client for {}", self.base_url);
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn check(index_name: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ScoreError::SearchIndexError {
            index: index_name.to_string(),
            status: status.as_u16(),
            message,
        })
    }

    pub fn index_mapping() -> serde_json::Value {
        json!({
            "mappings": {
                "properties": {
                    "department": { "type": "keyword" },
                    "threat_scores": {
                        "type": "nested",
                        "properties": { "score": { "type": "integer" } }
                    }
                }
            }
        })
    }
}

#[async_trait]
impl SearchIndex for ElasticsearchClient {
    async fn ensure_index(&self, index_name: &str) -> Result<()> {
        let url = self.url(index_name)?;
        tracing::debug!("Checking index at {}", url);

        let response = self.client.head(url.clone()).send().await?;
        if response.status().is_success() {
            tracing::debug!("Index {} already exists", index_name);
            return Ok(());
        }
        if response.status() != StatusCode::NOT_FOUND {
            return Self::check(index_name, response).await.map(|_| ());
        }

        tracing::info!("🗂️ Creating index {}", index_name);
        let response = self
            .client
            .put(url)
            .json(&Self::index_mapping())
            .send()
            .await?;
        Self::check(index_name, response).await?;
        Ok(())
    }

    async fn index(&self, index_name: &str, document: &ThreatDocument) -> Result<()> {
        let url = self.url(&format!("{}/_doc", index_name))?;
        tracing::debug!("Indexing {} into {}", document.department, index_name);

        let response = self.client.post(url).json(document).send().await?;
        Self::check(index_name, response).await?;
        Ok(())
    }

    async fn refresh(&self, index_name: &str) -> Result<()> {
        let url = self.url(&format!("{}/_refresh", index_name))?;
        let response = self.client.post(url).send().await?;
        Self::check(index_name, response).await?;
        Ok(())
    }

    async fn query_by_department(&self, index_name: &str, department: &str) -> Result<Vec<i64>> {
        let url = self.url(&format!("{}/_search", index_name))?;
        let query = json!({
            "query": { "match": { "department": department } },
            "size": 1
        });
        tracing::debug!("Searching {} for department {}", index_name, department);

        let response = self.client.post(url).json(&query).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Index {} not found, returning no scores", index_name);
            return Ok(Vec::new());
        }

        let body: SearchResponse = Self::check(index_name, response).await?.json().await?;
        Ok(body
            .hits
            .hits
            .into_iter()
            .next()
            .map(|hit| hit.source.scores())
            .unwrap_or_default())
    }
}
