use crate::domain::model::{Company, Department};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

pub const DEPARTMENTS: [&str; 5] = ["Engineering", "Marketing", "Finance", "HR", "Science"];

const DEFAULT_USERS: usize = 10;
const DEFAULT_RANGE: Range<i64> = 0..90;

/// Source of random integer scores. Seeded generators give repeatable scenarios.
pub struct ScoreGenerator {
    rng: StdRng,
}

impl ScoreGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// `users` scores drawn uniformly from `range` (upper bound excluded).
    pub fn scores(&mut self, users: usize, range: Range<i64>) -> Vec<f64> {
        (0..users)
            .map(|_| self.rng.gen_range(range.clone()) as f64)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Four departments score low, Science scores high.
    OneHighMean,
    /// Every department draws from the same narrow band.
    SameMean,
    /// Fixed scores: equal means everywhere, one outlier user in Finance.
    SameMeanOneHigh,
    /// Departments of 22, 33, 44, 55 and 66 users.
    DifferentUsers,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::OneHighMean,
        Scenario::SameMean,
        Scenario::SameMeanOneHigh,
        Scenario::DifferentUsers,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::OneHighMean => "one_high_mean",
            Scenario::SameMean => "same_mean",
            Scenario::SameMeanOneHigh => "same_mean_one_high",
            Scenario::DifferentUsers => "different_users",
        }
    }

    /// Storage key; the CSV file is `<key>.csv`.
    pub fn key(&self) -> &'static str {
        match self {
            Scenario::OneHighMean => "test_oneHighMean",
            Scenario::SameMean => "test_sameMean",
            Scenario::SameMeanOneHigh => "test_sameMeanOneHigh",
            Scenario::DifferentUsers => "test_differentUsers",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::OneHighMean => "One department has a high threat score, others low",
            Scenario::SameMean => "All departments have similar threat scores",
            Scenario::SameMeanOneHigh => {
                "All departments have the same mean, but one has a very high threat score"
            }
            Scenario::DifferentUsers => "All departments have different numbers of users",
        }
    }

    pub fn build(&self, generator: &mut ScoreGenerator) -> Result<Company> {
        let score_lists: Vec<Vec<f64>> = match self {
            Scenario::OneHighMean => DEPARTMENTS
                .iter()
                .map(|&name| {
                    let range = if name == "Science" { 80..90 } else { 20..30 };
                    generator.scores(DEFAULT_USERS, range)
                })
                .collect(),
            Scenario::SameMean => DEPARTMENTS
                .iter()
                .map(|_| generator.scores(DEFAULT_USERS, 30..35))
                .collect(),
            Scenario::SameMeanOneHigh => fixed_scores()
                .iter()
                .map(|scores| scores.iter().map(|&s| s as f64).collect::<Vec<f64>>())
                .collect(),
            Scenario::DifferentUsers => [22, 33, 44, 55, 66]
                .iter()
                .map(|&users| generator.scores(users, DEFAULT_RANGE))
                .collect(),
        };

        let departments = DEPARTMENTS
            .iter()
            .zip(score_lists)
            .map(|(name, scores)| Department::new(*name, scores))
            .collect::<Result<Vec<_>>>()?;

        Ok(Company::new(departments))
    }
}

fn fixed_scores() -> [[i64; 10]; 5] {
    [
        [22, 30, 25, 29, 22, 24, 26, 24, 28, 30],
        [23, 27, 25, 26, 27, 28, 26, 24, 29, 25],
        [20, 18, 24, 20, 17, 14, 17, 90, 18, 22],
        [25, 24, 28, 26, 27, 26, 28, 25, 29, 22],
        [23, 28, 26, 27, 25, 28, 27, 25, 28, 23],
    ]
}
