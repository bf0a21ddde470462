//! # Scores Module
//!
//! Per-application self-assessment: one integer score in `1..=10` for each
//! tech stack the project declares.
//!
//! Scores start at [`DEFAULT_SCORE`]. Updates are clamped, never rejected
//! for range. On submission the sheet is flattened into two parallel
//! sequences ordered like the project's `techStacks`; the backend pairs
//! them by position.

use crate::model::{ProjectApplyRequest, UserId};
use crate::{DEFAULT_SCORE, MAX_SCORE, MIN_SCORE};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Clamp any integer into `MIN_SCORE..=MAX_SCORE`.
pub fn clamp_score(score: i64) -> u8 {
    score.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE)) as u8
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("'{0}' is not one of the project's tech stacks")]
    UnknownTech(String),
}

// =============================================================================
// SKILL LEVEL
// =============================================================================

/// Coarse reading of a score, shown next to each slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkillLevel {
    /// 1-3
    Beginner,
    /// 4-6
    Intermediate,
    /// 7-8
    Advanced,
    /// 9-10
    Expert,
}

impl SkillLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=3 => Self::Beginner,
            4..=6 => Self::Intermediate,
            7..=8 => Self::Advanced,
            _ => Self::Expert,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner - still learning",
            Self::Intermediate => "intermediate - can build the basics",
            Self::Advanced => "advanced - productive and experienced",
            Self::Expert => "expert - can teach others",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// =============================================================================
// SCORE SHEET
// =============================================================================

/// Scores keyed by tech stack, remembering the project's declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechScoreSheet {
    declared: Vec<String>,
    scores: BTreeMap<String, u8>,
}

impl TechScoreSheet {
    /// Every declared tech starts at [`DEFAULT_SCORE`].
    pub fn new(tech_stacks: &[String]) -> Self {
        let scores = tech_stacks
            .iter()
            .map(|tech| (tech.clone(), DEFAULT_SCORE))
            .collect();
        Self {
            declared: tech_stacks.to_vec(),
            scores,
        }
    }

    /// Set the score for `tech`, clamped. Returns the stored value.
    pub fn set(&mut self, tech: &str, score: i64) -> Result<u8, ScoreError> {
        let slot = self
            .scores
            .get_mut(tech)
            .ok_or_else(|| ScoreError::UnknownTech(tech.to_string()))?;
        *slot = clamp_score(score);
        Ok(*slot)
    }

    pub fn get(&self, tech: &str) -> Option<u8> {
        self.scores.get(tech).copied()
    }

    /// The project's tech stacks, in declared order.
    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    /// `(tech, score)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> + '_ {
        self.declared.iter().map(|tech| {
            let score = self.scores.get(tech).copied().unwrap_or(DEFAULT_SCORE);
            (tech.as_str(), score)
        })
    }

    /// Flatten into `(techStacks, techScores)` with `scores[i]` for `techs[i]`.
    pub fn to_parallel(&self) -> (Vec<String>, Vec<u8>) {
        self.iter()
            .map(|(tech, score)| (tech.to_string(), score))
            .unzip()
    }

    /// Mean score in tenths, rounded half up (`55` reads as 5.5).
    ///
    /// Averages over [`Self::iter`], so a tech declared twice counts twice.
    pub fn average_tenths(&self) -> u32 {
        let (count, sum) = self
            .iter()
            .fold((0u32, 0u32), |(n, sum), (_, score)| (n + 1, sum + u32::from(score)));
        if count == 0 {
            return 0;
        }
        (sum * 100 / count + 5) / 10
    }

    /// Mean score with one decimal, e.g. `"6.5"`.
    pub fn average_display(&self) -> String {
        let tenths = self.average_tenths();
        format!("{}.{}", tenths / 10, tenths % 10)
    }

    /// Build the apply request body for `user_id`.
    pub fn to_apply_request(&self, user_id: UserId) -> ProjectApplyRequest {
        let (tech_stacks, tech_scores) = self.to_parallel();
        ProjectApplyRequest {
            user_id,
            tech_stacks,
            tech_scores,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn techs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_five() {
        let sheet = TechScoreSheet::new(&techs(&["Rust", "React"]));
        assert_eq!(sheet.get("Rust"), Some(5));
        assert_eq!(sheet.get("React"), Some(5));
        assert_eq!(sheet.get("Go"), None);
    }

    #[test]
    fn set_clamps_both_ends() {
        let mut sheet = TechScoreSheet::new(&techs(&["Rust"]));
        assert_eq!(sheet.set("Rust", 0), Ok(1));
        assert_eq!(sheet.set("Rust", -40), Ok(1));
        assert_eq!(sheet.set("Rust", 11), Ok(10));
        assert_eq!(sheet.set("Rust", 7), Ok(7));
        assert_eq!(sheet.get("Rust"), Some(7));
    }

    #[test]
    fn unknown_tech_is_rejected() {
        let mut sheet = TechScoreSheet::new(&techs(&["Rust"]));
        assert_eq!(
            sheet.set("Go", 3),
            Err(ScoreError::UnknownTech("Go".to_string()))
        );
    }

    #[test]
    fn parallel_arrays_follow_declared_order() {
        let mut sheet = TechScoreSheet::new(&techs(&["TypeScript", "Java", "AWS"]));
        let _ = sheet.set("AWS", 2);
        let _ = sheet.set("TypeScript", 9);
        let (names, scores) = sheet.to_parallel();
        assert_eq!(names, vec!["TypeScript", "Java", "AWS"]);
        assert_eq!(scores, vec![9, 5, 2]);
    }

    #[test]
    fn apply_request_carries_user() {
        let sheet = TechScoreSheet::new(&techs(&["Rust"]));
        let req = sheet.to_apply_request(UserId(3));
        assert_eq!(req.user_id, UserId(3));
        assert_eq!(req.tech_stacks, vec!["Rust"]);
        assert_eq!(req.tech_scores, vec![5]);
    }

    #[test]
    fn average_rounds_to_tenths() {
        let mut sheet = TechScoreSheet::new(&techs(&["a", "b", "c"]));
        let _ = sheet.set("a", 10);
        let _ = sheet.set("b", 3);
        let _ = sheet.set("c", 4);
        // 17 / 3 = 5.666..
        assert_eq!(sheet.average_tenths(), 57);
        assert_eq!(sheet.average_display(), "5.7");
        assert_eq!(TechScoreSheet::new(&[]).average_display(), "0.0");
    }

    #[test]
    fn average_counts_every_declared_entry() {
        let mut sheet = TechScoreSheet::new(&techs(&["Rust", "Go", "Rust"]));
        let _ = sheet.set("Rust", 10);
        let _ = sheet.set("Go", 1);
        let (_, scores) = sheet.to_parallel();
        assert_eq!(scores, vec![10, 1, 10]);
        // 21 / 3 = 7.0
        assert_eq!(sheet.average_tenths(), 70);
    }

    #[test]
    fn skill_levels_cover_the_range() {
        assert_eq!(SkillLevel::from_score(1), SkillLevel::Beginner);
        assert_eq!(SkillLevel::from_score(3), SkillLevel::Beginner);
        assert_eq!(SkillLevel::from_score(4), SkillLevel::Intermediate);
        assert_eq!(SkillLevel::from_score(6), SkillLevel::Intermediate);
        assert_eq!(SkillLevel::from_score(8), SkillLevel::Advanced);
        assert_eq!(SkillLevel::from_score(9), SkillLevel::Expert);
        assert_eq!(SkillLevel::from_score(10), SkillLevel::Expert);
    }
}
