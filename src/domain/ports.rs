use crate::domain::model::{ScoreRow, ThreatDocument};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Byte-level file access, rooted wherever the adapter decides.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

/// Keyed tables of score rows.
pub trait TabularStore: Send + Sync {
    fn save(
        &self,
        key: &str,
        rows: &[ScoreRow],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn load(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<ScoreRow>>>> + Send;
}

#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Creates the index with the threat score mapping unless it already exists.
    async fn ensure_index(&self, index_name: &str) -> Result<()>;
    async fn index(&self, index_name: &str, document: &ThreatDocument) -> Result<()>;
    /// Makes previously indexed documents visible to search.
    async fn refresh(&self, index_name: &str) -> Result<()>;
    /// Scores of the first document matching `department`; empty when nothing
    /// matches or the index does not exist.
    async fn query_by_department(&self, index_name: &str, department: &str) -> Result<Vec<i64>>;
}

pub trait ConfigProvider: Send + Sync {
    fn output_dir(&self) -> &str;
    fn seed(&self) -> Option<u64>;
    fn refresh(&self) -> bool;
    /// Copy the source table into the search index.
    fn index_enabled(&self) -> bool;
    /// Department to look up in the search index after the run.
    fn query(&self) -> Option<&str>;
    fn search_endpoint(&self) -> &str;
    fn index_name(&self) -> &str;
    fn source_csv(&self) -> &str;
    fn timeout_seconds(&self) -> u64;

    fn search_enabled(&self) -> bool {
        self.index_enabled() || self.query().is_some()
    }
}
