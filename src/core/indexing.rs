use crate::core::{SearchIndex, TabularStore};
use crate::domain::model::{ScoreEntry, ScoreRow, ThreatDocument};
use crate::utils::error::{Result, ScoreError};

/// Index document for a stored row. Scores must be whole numbers because the
/// index maps them as integers.
pub fn to_document(row: &ScoreRow) -> Result<ThreatDocument> {
    let threat_scores = row
        .threat_scores
        .iter()
        .map(|&score| {
            if score.fract() != 0.0 || score.abs() >= i64::MAX as f64 {
                return Err(ScoreError::ValidationError {
                    message: format!(
                        "score {} of department '{}' is not a 64-bit integer",
                        score, row.department
                    ),
                });
            }
            Ok(ScoreEntry {
                score: score as i64,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ThreatDocument {
        department: row.department.clone(),
        threat_scores,
    })
}

/// Copies the table stored under `source_key` into `index_name`, one document
/// per row. Returns how many documents were indexed; 0 if the table is absent.
pub async fn populate_index<T, I>(
    store: &T,
    index: &I,
    source_key: &str,
    index_name: &str,
) -> Result<usize>
where
    T: TabularStore,
    I: SearchIndex + ?Sized,
{
    let Some(rows) = store.load(source_key).await? else {
        tracing::info!("No source table {}, skipping index population", source_key);
        return Ok(0);
    };

    let documents = rows.iter().map(to_document).collect::<Result<Vec<_>>>()?;

    index.ensure_index(index_name).await?;
    for document in &documents {
        index.index(index_name, document).await?;
    }
    index.refresh(index_name).await?;

    tracing::info!("📥 Indexed {} documents into {}", documents.len(), index_name);
    Ok(documents.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingIndex {
        calls: Mutex<Vec<String>>,
        documents: Mutex<Vec<ThreatDocument>>,
    }

    #[async_trait]
    impl SearchIndex for RecordingIndex {
        async fn ensure_index(&self, index_name: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("ensure {index_name}"));
            Ok(())
        }

        async fn index(&self, index_name: &str, document: &ThreatDocument) -> Result<()> {
            self.calls.lock().unwrap().push(format!("index {index_name}"));
            self.documents.lock().unwrap().push(document.clone());
            Ok(())
        }

        async fn refresh(&self, index_name: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("refresh {index_name}"));
            Ok(())
        }

        async fn query_by_department(&self, _: &str, department: &str) -> Result<Vec<i64>> {
            Ok(self
                .documents
                .lock()
                .unwrap()
                .iter()
                .find(|d| d.department == department)
                .map(ThreatDocument::scores)
                .unwrap_or_default())
        }
    }

    struct FixedStore(Option<Vec<ScoreRow>>);

    impl TabularStore for FixedStore {
        async fn save(&self, _: &str, _: &[ScoreRow]) -> Result<()> {
            Ok(())
        }

        async fn load(&self, _: &str) -> Result<Option<Vec<ScoreRow>>> {
            Ok(self.0.clone())
        }
    }

    fn row(department: &str, scores: &[f64]) -> ScoreRow {
        ScoreRow {
            department: department.to_string(),
            threat_scores: scores.to_vec(),
            aggregated_score: 0.0,
        }
    }

    #[test]
    fn test_to_document_rejects_fractional_scores() {
        assert!(to_document(&row("HR", &[1.0, 2.5])).is_err());

        let doc = to_document(&row("HR", &[1.0, -2.0])).unwrap();
        assert_eq!(doc.scores(), vec![1, -2]);
    }

    #[test]
    fn test_to_document_rejects_scores_beyond_i64() {
        let two_pow_63 = 2f64.powi(63);
        assert!(to_document(&row("HR", &[two_pow_63])).is_err());
        assert!(to_document(&row("HR", &[-two_pow_63 * 2.0])).is_err());
        assert!(to_document(&row("HR", &[f64::INFINITY])).is_err());

        let doc = to_document(&row("HR", &[9_007_199_254_740_992.0])).unwrap();
        assert_eq!(doc.scores(), vec![9_007_199_254_740_992]);
    }

    #[tokio::test]
    async fn test_populate_indexes_each_row_then_refreshes() {
        let store = FixedStore(Some(vec![row("Finance", &[20.0, 90.0]), row("HR", &[25.0])]));
        let index = RecordingIndex::default();

        let count = populate_index(&store, &index, "threat_scores", "company_threat_scores")
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            *index.calls.lock().unwrap(),
            vec![
                "ensure company_threat_scores",
                "index company_threat_scores",
                "index company_threat_scores",
                "refresh company_threat_scores",
            ]
        );
        assert_eq!(
            index.query_by_department("company_threat_scores", "Finance").await.unwrap(),
            vec![20, 90]
        );
    }

    #[tokio::test]
    async fn test_populate_without_source_does_nothing() {
        let index = RecordingIndex::default();
        let count = populate_index(&FixedStore(None), &index, "threat_scores", "idx")
            .await
            .unwrap();

        assert_eq!(count, 0);
        assert!(index.calls.lock().unwrap().is_empty());
    }
}
