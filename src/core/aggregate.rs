use crate::domain::model::{Company, Department};

/// Arithmetic mean of `scores`, or 0 for an empty slice.
pub fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Sum of the department means. Every department counts once, whatever its
/// number of users, so this is not the company-wide mean of all users.
pub fn aggregate(departments: &[Department]) -> f64 {
    departments.iter().map(Department::mean).sum()
}

impl Department {
    pub fn mean(&self) -> f64 {
        mean(self.scores())
    }
}

impl Company {
    pub fn aggregated_threat_score(&self) -> f64 {
        aggregate(self.departments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(name: &str, scores: &[f64]) -> Department {
        Department::new(name, scores.to_vec()).unwrap()
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert!(!mean(&[]).is_nan());
    }

    #[test]
    fn test_mean_is_sum_over_count() {
        assert_eq!(mean(&[2.0, 4.0, 9.0]), 5.0);
        assert_eq!(mean(&[-3.0, 3.0]), 0.0);
        assert_eq!(mean(&[7.5]), 7.5);
    }

    #[test]
    fn test_aggregate_of_no_departments_is_zero() {
        assert_eq!(aggregate(&[]), 0.0);
        assert_eq!(Company::default().aggregated_threat_score(), 0.0);
    }

    #[test]
    fn test_aggregate_of_single_department_is_its_mean() {
        let d = dep("Finance", &[20.0, 18.0, 24.0, 20.0, 17.0, 14.0, 17.0, 90.0, 18.0, 22.0]);
        assert_eq!(d.mean(), 26.0);
        assert_eq!(aggregate(std::slice::from_ref(&d)), d.mean());
    }

    #[test]
    fn test_empty_department_contributes_zero() {
        let company = Company::new(vec![dep("Science", &[]), dep("HR", &[10.0, 20.0])]);
        assert_eq!(company.aggregated_threat_score(), 15.0);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let a = dep("Engineering", &[1.0, 2.0, 3.0]);
        let b = dep("Marketing", &[10.0]);
        let c = dep("HR", &[4.0, 4.0, 4.0, 4.0]);

        let forward = aggregate(&[a.clone(), b.clone(), c.clone()]);
        let reversed = aggregate(&[c.clone(), b.clone(), a.clone()]);
        let shuffled = aggregate(&[b, a, c]);

        assert_eq!(forward, 16.0);
        assert_eq!(forward, reversed);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_aggregate_ignores_department_size() {
        // company-wide mean would be (1*10 + 9*0) / 10 = 1.0
        let small = dep("Small", &[10.0]);
        let large = dep("Large", &[0.0; 9]);
        assert_eq!(aggregate(&[small, large]), 10.0);
    }
}
