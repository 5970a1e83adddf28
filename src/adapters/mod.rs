// Adapters layer: concrete implementations of the domain ports.

pub mod csv_store;
pub mod elasticsearch;
pub mod local_storage;

pub use csv_store::CsvScoreStore;
pub use elasticsearch::ElasticsearchClient;
pub use local_storage::LocalStorage;
