//! # Tags Module
//!
//! Tech-stack tag editor for the project creation form.
//!
//! A tag is accepted only if, after trimming, it is non-empty, at most
//! [`MAX_TECH_NAME_LEN`] characters, made of ASCII letters, digits and
//! `_ . + # -`, the list still has room, and no existing tag matches it
//! case-insensitively. Checks run in that order and the first failure is
//! reported. A rejected add leaves the list untouched.

use crate::{MAX_TECH_NAME_LEN, MAX_TECH_STACKS};
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Why a tag was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tech stack name is empty")]
    EmptyInput,

    #[error("tech stack name must be at most {} characters", MAX_TECH_NAME_LEN)]
    TooLong,

    #[error("tech stack name may only contain letters, digits, '_', '.', '+', '#' and '-'")]
    InvalidCharacters,

    #[error("at most {} tech stacks can be added", MAX_TECH_STACKS)]
    CapacityExceeded,

    #[error("tech stack is already added")]
    DuplicateCaseInsensitive,
}

// =============================================================================
// NAME VALIDATION
// =============================================================================

/// ASCII letters, digits and `_ . + # -`.
pub(crate) fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '#' | '-')
}

/// Trim and check a single tech-stack name in isolation.
///
/// Returns the trimmed name. Capacity and duplicates are list concerns and
/// are checked by [`TechStackTags::add`].
pub fn validate_tech_name(raw: &str) -> Result<&str, TagError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(TagError::EmptyInput);
    }
    if name.chars().count() > MAX_TECH_NAME_LEN {
        return Err(TagError::TooLong);
    }
    if !name.chars().all(is_allowed_char) {
        return Err(TagError::InvalidCharacters);
    }
    Ok(name)
}

// =============================================================================
// TAG LIST
// =============================================================================

/// Ordered, bounded, case-insensitively unique list of tech-stack names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechStackTags {
    tags: Vec<String>,
}

impl TechStackTags {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tags without checking them.
    ///
    /// Used when the list comes from elsewhere and will be re-checked by
    /// [`crate::ProjectDraft::validate`].
    #[must_use]
    pub fn from_vec(tags: Vec<String>) -> Self {
        Self { tags }
    }

    /// Validate `raw` and append its trimmed form.
    pub fn add(&mut self, raw: &str) -> Result<(), TagError> {
        let name = validate_tech_name(raw)?;
        if self.tags.len() >= MAX_TECH_STACKS {
            return Err(TagError::CapacityExceeded);
        }
        let lowered = name.to_lowercase();
        if self.tags.iter().any(|t| t.to_lowercase() == lowered) {
            return Err(TagError::DuplicateCaseInsensitive);
        }
        self.tags.push(name.to_string());
        Ok(())
    }

    /// Remove the tag equal to `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.tags.iter().position(|t| t == name) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    /// Exact-match membership.
    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

// =============================================================================
// EDITOR
// =============================================================================

/// A tag list paired with the pending text input.
///
/// The input is cleared only when [`TagEditor::commit`] accepts it, so a
/// rejected tag can be corrected in place.
#[derive(Debug, Clone, Default)]
pub struct TagEditor {
    input: String,
    tags: TechStackTags,
}

impl TagEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending input.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// The pending input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Add the pending input as a tag.
    pub fn commit(&mut self) -> Result<(), TagError> {
        self.tags.add(&self.input)?;
        self.input.clear();
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.tags.remove(name)
    }

    pub fn tags(&self) -> &TechStackTags {
        &self.tags
    }

    pub fn into_tags(self) -> TechStackTags {
        self.tags
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_appends_in_order() {
        let mut tags = TechStackTags::new();
        assert_eq!(tags.add("  Rust "), Ok(()));
        assert_eq!(tags.add("C++"), Ok(()));
        assert_eq!(tags.add("node.js"), Ok(()));
        assert_eq!(tags.as_slice(), ["Rust", "C++", "node.js"]);
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        let mut tags = TechStackTags::new();
        assert_eq!(tags.add(""), Err(TagError::EmptyInput));
        assert_eq!(tags.add("   \t"), Err(TagError::EmptyInput));
        assert!(tags.is_empty());
    }

    #[test]
    fn length_limit_is_thirty_after_trim() {
        let mut tags = TechStackTags::new();
        let thirty = "a".repeat(30);
        assert!(tags.add(&format!("  {}  ", thirty)).is_ok());
        assert_eq!(tags.add(&"b".repeat(31)), Err(TagError::TooLong));
    }

    #[test]
    fn exclamation_mark_is_rejected() {
        let mut tags = TechStackTags::new();
        assert_eq!(tags.add("C++!"), Err(TagError::InvalidCharacters));
        assert!(tags.add("C++").is_ok());
        assert_eq!(tags.as_slice(), ["C++"]);
    }

    #[test]
    fn inner_whitespace_and_non_ascii_are_rejected() {
        let mut tags = TechStackTags::new();
        assert_eq!(tags.add("Spring Boot"), Err(TagError::InvalidCharacters));
        assert_eq!(tags.add("리액트"), Err(TagError::InvalidCharacters));
        assert!(tags.add("C#").is_ok());
        assert!(tags.add("vue-router_4").is_ok());
    }

    #[test]
    fn duplicates_are_case_insensitive() {
        let mut tags = TechStackTags::new();
        assert_eq!(tags.add("React"), Ok(()));
        assert_eq!(tags.add("react"), Err(TagError::DuplicateCaseInsensitive));
        assert_eq!(tags.add(" REACT "), Err(TagError::DuplicateCaseInsensitive));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn capacity_is_checked_before_duplicates() {
        let mut tags = TechStackTags::new();
        for i in 0..MAX_TECH_STACKS {
            assert_eq!(tags.add(&format!("tech{}", i)), Ok(()));
        }
        assert_eq!(tags.add("tech0"), Err(TagError::CapacityExceeded));
        assert_eq!(tags.add("fresh"), Err(TagError::CapacityExceeded));
        assert_eq!(tags.len(), MAX_TECH_STACKS);
    }

    #[test]
    fn remove_is_exact_and_idempotent() {
        let mut tags = TechStackTags::new();
        assert_eq!(tags.add("Go"), Ok(()));
        assert_eq!(tags.add("Rust"), Ok(()));
        assert!(!tags.remove("go"));
        assert!(tags.remove("Go"));
        assert!(!tags.remove("Go"));
        assert_eq!(tags.as_slice(), ["Rust"]);
    }

    #[test]
    fn editor_clears_input_only_on_success() {
        let mut editor = TagEditor::new();
        editor.set_input("Kotlin!");
        assert_eq!(editor.commit(), Err(TagError::InvalidCharacters));
        assert_eq!(editor.input(), "Kotlin!");

        editor.set_input(" Kotlin ");
        assert!(editor.commit().is_ok());
        assert_eq!(editor.input(), "");
        assert!(editor.tags().contains("Kotlin"));

        assert!(editor.remove("Kotlin"));
        assert!(editor.into_tags().is_empty());
    }
}
