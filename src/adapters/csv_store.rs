use crate::core::score_list::{format_score_list, parse_score_list};
use crate::core::{ScoreRow, Storage, TabularStore};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Column layout of a stored score table.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Threat_Scores")]
    threat_scores: String,
    #[serde(rename = "Aggregated_Score")]
    aggregated_score: f64,
}

/// Score tables as `<key>.csv` files in a [`Storage`].
#[derive(Debug, Clone)]
pub struct CsvScoreStore<S: Storage> {
    storage: S,
}

impl<S: Storage> CsvScoreStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn file_name(key: &str) -> String {
        format!("{}.csv", key)
    }
}

pub fn encode_rows(rows: &[ScoreRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    // 沒有資料列時 serde 不會寫出標頭
    if rows.is_empty() {
        writer.write_record(["Department", "Threat_Scores", "Aggregated_Score"])?;
    }
    for row in rows {
        writer.serialize(CsvRow {
            department: row.department.clone(),
            threat_scores: format_score_list(&row.threat_scores),
            aggregated_score: row.aggregated_score,
        })?;
    }
    writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()).into())
}

pub fn decode_rows(data: &[u8]) -> Result<Vec<ScoreRow>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut rows = Vec::new();
    for record in reader.deserialize::<CsvRow>() {
        let record = record?;
        rows.push(ScoreRow {
            threat_scores: parse_score_list(&record.threat_scores)?,
            department: record.department,
            aggregated_score: record.aggregated_score,
        });
    }
    Ok(rows)
}

impl<S: Storage> TabularStore for CsvScoreStore<S> {
    async fn save(&self, key: &str, rows: &[ScoreRow]) -> Result<()> {
        let data = encode_rows(rows)?;
        self.storage.write_file(&Self::file_name(key), &data).await
    }

    async fn load(&self, key: &str) -> Result<Option<Vec<ScoreRow>>> {
        let file_name = Self::file_name(key);
        if !self.storage.exists(&file_name).await? {
            return Ok(None);
        }
        let data = self.storage.read_file(&file_name).await?;
        decode_rows(&data).map(Some)
    }
}
