// src/store/results.rs

use uuid::Uuid;

use crate::models::test_result::{ScoreBucket, TestResult};

/// Finished quiz results in submission order.
#[derive(Debug, Default)]
pub struct ResultsStore {
    results: Vec<TestResult>,
}

impl ResultsStore {
    /// Replaces any result for the same (user, course) pair and appends the new one.
    pub fn upsert(&mut self, result: TestResult) {
        self.results
            .retain(|r| !(r.user_email == result.user_email && r.course == result.course));
        self.results.push(result);
    }

    pub fn find(&self, user_email: &str, course: &str) -> Option<&TestResult> {
        self.results
            .iter()
            .find(|r| r.user_email == user_email && r.course == course)
    }

    pub fn get(&self, id: Uuid) -> Option<&TestResult> {
        self.results.iter().find(|r| r.id == id)
    }

    pub fn all(&self) -> &[TestResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The `limit` most recent results, newest first.
    pub fn recent(&self, limit: usize) -> Vec<TestResult> {
        self.results.iter().rev().take(limit).cloned().collect()
    }

    /// Histogram of score percentages in four quartile buckets.
    pub fn score_distribution(&self) -> Vec<ScoreBucket> {
        let mut counts = [0usize; 4];
        for result in &self.results {
            let total = result.total_questions.max(1) as f64;
            let percentage = result.score as f64 / total * 100.0;
            let bucket = if percentage <= 25.0 {
                0
            } else if percentage <= 50.0 {
                1
            } else if percentage <= 75.0 {
                2
            } else {
                3
            };
            counts[bucket] += 1;
        }

        let total = self.results.len().max(1) as f64;
        ["0-25%", "26-50%", "51-75%", "76-100%"]
            .into_iter()
            .zip(counts)
            .map(|(range, count)| ScoreBucket {
                range,
                count,
                percentage: count as f64 / total * 100.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(email: &str, course: &str, score: u32, total: u32) -> TestResult {
        TestResult {
            id: Uuid::new_v4(),
            user_email: email.to_string(),
            course: course.to_string(),
            score,
            total_questions: total,
            discount: 0,
            date: Utc::now(),
            selected_answers: vec![None; total as usize],
        }
    }

    #[test]
    fn test_upsert_replaces_same_pair() {
        let mut store = ResultsStore::default();
        store.upsert(result("a@x.com", "MM", 1, 5));
        store.upsert(result("b@x.com", "MM", 2, 5));
        store.upsert(result("a@x.com", "MM", 4, 5));

        assert_eq!(store.len(), 2);
        let found = store.find("a@x.com", "MM").unwrap();
        assert_eq!(found.score, 4);
        assert_eq!(store.all().last().unwrap().user_email, "a@x.com");
    }

    #[test]
    fn test_upsert_keeps_other_courses() {
        let mut store = ResultsStore::default();
        store.upsert(result("a@x.com", "MM", 1, 5));
        store.upsert(result("a@x.com", "SD", 3, 5));
        assert_eq!(store.len(), 2);
        assert!(store.find("a@x.com", "MM").is_some());
    }

    #[test]
    fn test_lookup_by_stable_id_survives_replacement_of_others() {
        let mut store = ResultsStore::default();
        store.upsert(result("a@x.com", "MM", 1, 5));
        let kept = result("b@x.com", "MM", 2, 5);
        let kept_id = kept.id;
        store.upsert(kept);
        store.upsert(result("a@x.com", "MM", 5, 5));

        assert_eq!(store.get(kept_id).unwrap().user_email, "b@x.com");
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut store = ResultsStore::default();
        for i in 0..7 {
            store.upsert(result(&format!("u{i}@x.com"), "MM", i, 10));
        }
        let recent = store.recent(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].user_email, "u6@x.com");
    }

    #[test]
    fn test_score_distribution_buckets() {
        let mut store = ResultsStore::default();
        store.upsert(result("a@x.com", "MM", 1, 4)); // 25%
        store.upsert(result("b@x.com", "MM", 2, 4)); // 50%
        store.upsert(result("c@x.com", "MM", 3, 4)); // 75%
        store.upsert(result("d@x.com", "MM", 4, 4)); // 100%

        let buckets = store.score_distribution();
        assert!(buckets.iter().all(|b| b.count == 1));
        assert_eq!(buckets[3].range, "76-100%");
        assert_eq!(buckets[0].percentage, 25.0);
    }

    #[test]
    fn test_score_distribution_empty_store() {
        let store = ResultsStore::default();
        assert!(store.score_distribution().iter().all(|b| b.count == 0 && b.percentage == 0.0));
    }
}
