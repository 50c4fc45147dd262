//! Scoring: per-question result entries and the end-of-session summary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::practice_engine::{arithmetic, helpers::format_number, models::Question};

/// Outcome of one question, appended once in traversal order and never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub question: Question,
    /// `None` when time ran out with nothing (or nothing numeric) typed.
    pub user_answer: Option<f64>,
    pub is_correct: bool,
}

impl ResultEntry {
    pub fn score(question: Question, user_answer: Option<f64>) -> Self {
        let is_correct = user_answer
            .is_some_and(|given| arithmetic::is_within_tolerance(given, question.answer()));
        ResultEntry { question, user_answer, is_correct }
    }

    /// Presentation text for the summary list.
    pub fn render(&self) -> ResultLine {
        ResultLine {
            question: format!("{} = ?", self.question.prompt()),
            your_answer: self
                .user_answer
                .map_or_else(|| "No answer".to_string(), format_number),
            correct_answer: format_number(self.question.answer()),
            is_correct: self.is_correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLine {
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceTier {
    Perfect,
    Excellent,
    Great,
    Good,
    KeepPracticing,
}

impl PerformanceTier {
    /// 100 → Perfect, ≥80 → Excellent, ≥60 → Great, ≥40 → Good, otherwise Keep Practicing.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            PerformanceTier::Perfect
        } else if percentage >= 80.0 {
            PerformanceTier::Excellent
        } else if percentage >= 60.0 {
            PerformanceTier::Great
        } else if percentage >= 40.0 {
            PerformanceTier::Good
        } else {
            PerformanceTier::KeepPracticing
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceTier::Perfect        => write!(f, "Perfect!"),
            PerformanceTier::Excellent      => write!(f, "Excellent!"),
            PerformanceTier::Great          => write!(f, "Great Job!"),
            PerformanceTier::Good           => write!(f, "Good Effort!"),
            PerformanceTier::KeepPracticing => write!(f, "Keep Practicing!"),
        }
    }
}

/// Read-only view over a finished session's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub participant: String,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub tier: PerformanceTier,
    pub entries: Vec<ResultEntry>,
}

impl Summary {
    pub fn from_results(participant: impl Into<String>, entries: &[ResultEntry], total: u32) -> Self {
        let score = entries.iter().filter(|e| e.is_correct).count() as u32;
        let percentage = if total == 0 { 0.0 } else { 100.0 * f64::from(score) / f64::from(total) };
        Summary {
            participant: participant.into(),
            score,
            total,
            percentage,
            tier: PerformanceTier::from_percentage(percentage),
            entries: entries.to_vec(),
        }
    }

    /// e.g. `"Ada's Results"`.
    pub fn heading(&self) -> String {
        if self.participant.is_empty() {
            "Results".to_string()
        } else {
            format!("{}'s Results", self.participant)
        }
    }

    /// e.g. `"67% Correct"`.
    pub fn percent_label(&self) -> String {
        format!("{:.0}% Correct", self.percentage)
    }

    pub fn lines(&self) -> Vec<ResultLine> {
        self.entries.iter().map(ResultEntry::render).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice_engine::models::QuestionBody;

    fn question(answer_hundredths: u32) -> Question {
        // percentage of 1 yields answer_hundredths / 100
        Question::new(1, QuestionBody::Percentage { number: 1, percentage: answer_hundredths })
    }

    #[test]
    fn tolerance_decides_correctness() {
        let q = Question::new(1, QuestionBody::Multiplication { multiplicand: 6, multiplier: 7 });
        assert!(ResultEntry::score(q.clone(), Some(42.0)).is_correct);
        assert!(ResultEntry::score(q.clone(), Some(42.009)).is_correct);
        assert!(!ResultEntry::score(q.clone(), Some(42.02)).is_correct);
        let missed = ResultEntry::score(q, None);
        assert!(!missed.is_correct);
        assert_eq!(missed.user_answer, None);
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(PerformanceTier::from_percentage(100.0), PerformanceTier::Perfect);
        assert_eq!(PerformanceTier::from_percentage(80.0), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_percentage(79.9), PerformanceTier::Great);
        assert_eq!(PerformanceTier::from_percentage(60.0), PerformanceTier::Great);
        assert_eq!(PerformanceTier::from_percentage(40.0), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_percentage(39.9), PerformanceTier::KeepPracticing);
        assert_eq!(PerformanceTier::from_percentage(0.0), PerformanceTier::KeepPracticing);
    }

    #[test]
    fn summary_counts_correct_entries() {
        let entries = vec![
            ResultEntry::score(question(50), Some(0.5)),
            ResultEntry::score(question(75), Some(0.7)),
            ResultEntry::score(question(125), None),
        ];
        let summary = Summary::from_results("Ada", &entries, 3);
        assert_eq!(summary.score, 1);
        assert!((summary.percentage - 33.333).abs() < 0.01);
        assert_eq!(summary.tier, PerformanceTier::KeepPracticing);
        assert_eq!(summary.heading(), "Ada's Results");
        assert_eq!(summary.percent_label(), "33% Correct");

        let lines = summary.lines();
        assert_eq!(lines[0].question, "50% of 1 = ?");
        assert_eq!(lines[1].your_answer, "0.7");
        assert_eq!(lines[1].correct_answer, "0.75");
        assert_eq!(lines[2].your_answer, "No answer");
    }

    #[test]
    fn empty_total_scores_zero_percent() {
        let summary = Summary::from_results("", &[], 0);
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.heading(), "Results");
    }
}
