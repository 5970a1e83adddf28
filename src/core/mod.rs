pub mod aggregate;
pub mod indexing;
pub mod runner;
pub mod scenario;
pub mod score_list;

pub use crate::domain::model::{Company, Department, ScoreRow, ThreatDocument};
pub use crate::domain::ports::{ConfigProvider, SearchIndex, Storage, TabularStore};
pub use crate::utils::error::Result;
