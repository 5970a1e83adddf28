use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;

/// A department and the threat score of each of its users.
#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    name: String,
    scores: Vec<f64>,
}

impl Department {
    /// Builds a department. The name must not be blank; the score list may be empty.
    pub fn new(name: impl Into<String>, scores: Vec<f64>) -> Result<Self> {
        let name = name.into();
        validate_non_empty_string("department.name", &name)?;
        Ok(Self { name, scores })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn user_count(&self) -> usize {
        self.scores.len()
    }
}

/// Departments in reporting order. Duplicate names are kept as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Company {
    departments: Vec<Department>,
}

impl Company {
    pub fn new(departments: Vec<Department>) -> Self {
        Self { departments }
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn total_users(&self) -> usize {
        self.departments.iter().map(Department::user_count).sum()
    }
}

/// One persisted row: a department, its scores, and the company aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub department: String,
    pub threat_scores: Vec<f64>,
    pub aggregated_score: f64,
}

/// Search index document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatDocument {
    pub department: String,
    pub threat_scores: Vec<ScoreEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: i64,
}

impl ThreatDocument {
    pub fn scores(&self) -> Vec<i64> {
        self.threat_scores.iter().map(|entry| entry.score).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub key: String,
    pub company: Company,
    pub aggregate: f64,
    pub cached: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub name: String,
    pub users: usize,
    pub mean: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub key: String,
    pub aggregate: f64,
    pub cached: bool,
    pub departments: Vec<DepartmentSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub scenarios: Vec<ScenarioSummary>,
}
