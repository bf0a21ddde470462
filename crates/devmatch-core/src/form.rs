//! # Form Module
//!
//! Whole-form validation for project creation.
//!
//! Every violated rule is collected; nothing short-circuits across fields.
//! Errors come out in checking order: identity, title, description, tech
//! stacks, team size, duration.

use crate::model::{ProjectCreateRequest, UserId};
use crate::tags::{TechStackTags, is_allowed_char};
use crate::{MAX_CONTENT_LEN, MAX_DESCRIPTION_LEN, MAX_TECH_NAME_LEN, MAX_TECH_STACKS, MAX_TITLE_LEN};
use std::fmt;
use thiserror::Error;

/// Suggested project durations, in weeks.
pub const DURATION_OPTIONS: [u32; 7] = [1, 2, 4, 8, 12, 24, 52];

/// Duration a fresh draft starts with.
pub const DEFAULT_DURATION_WEEKS: i64 = 4;

// =============================================================================
// ERRORS
// =============================================================================

/// A single violated form rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("login is required")]
    NotAuthenticated,

    #[error("project title is required")]
    TitleEmpty,

    #[error("project title must be at most {} characters", MAX_TITLE_LEN)]
    TitleTooLong,

    #[error("project description is required")]
    DescriptionEmpty,

    #[error("project description must be at most {} characters", MAX_DESCRIPTION_LEN)]
    DescriptionTooLong,

    #[error("at least one tech stack is required")]
    TechStacksEmpty,

    #[error("at most {} tech stacks are allowed", MAX_TECH_STACKS)]
    TooManyTechStacks,

    #[error("tech stack list contains a blank entry")]
    BlankTechStack,

    #[error("tech stack '{0}' is longer than {max} characters", max = MAX_TECH_NAME_LEN)]
    TechStackTooLong(String),

    #[error("tech stack '{0}' contains characters that are not allowed")]
    TechStackInvalidCharacters(String),

    #[error("tech stack '{0}' is listed more than once")]
    DuplicateTechStack(String),

    #[error("team size must be at least 1")]
    TeamSizeTooSmall,

    #[error("duration must be at least 1 week")]
    DurationTooShort,

    #[error("content is required")]
    ContentEmpty,

    #[error("content must be at most {} characters", MAX_CONTENT_LEN)]
    ContentTooLong,
}

/// Every rule a submission violated, in checking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid input:")?;
        for error in &self.0 {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// DRAFT
// =============================================================================

/// The project creation form before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub tech_stacks: TechStackTags,
    pub team_size: i64,
    pub duration_weeks: i64,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            tech_stacks: TechStackTags::new(),
            team_size: 1,
            duration_weeks: DEFAULT_DURATION_WEEKS,
        }
    }
}

impl ProjectDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the whole form. `creator` is the signed-in user, if any.
    pub fn validate(&self, creator: Option<UserId>) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if creator.is_none() {
            errors.push(ValidationError::NotAuthenticated);
        }

        if self.title.trim().is_empty() {
            errors.push(ValidationError::TitleEmpty);
        } else if self.title.chars().count() > MAX_TITLE_LEN {
            errors.push(ValidationError::TitleTooLong);
        }

        if self.description.trim().is_empty() {
            errors.push(ValidationError::DescriptionEmpty);
        } else if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(ValidationError::DescriptionTooLong);
        }

        let tags = self.tech_stacks.as_slice();
        if tags.is_empty() {
            errors.push(ValidationError::TechStacksEmpty);
        } else if tags.len() > MAX_TECH_STACKS {
            errors.push(ValidationError::TooManyTechStacks);
        } else if let Some(error) = tags
            .iter()
            .find_map(|t| check_listed_tag(t))
            .or_else(|| first_duplicate(tags))
        {
            errors.push(error);
        }

        if self.team_size < 1 {
            errors.push(ValidationError::TeamSizeTooSmall);
        }
        if self.duration_weeks < 1 {
            errors.push(ValidationError::DurationTooShort);
        }

        errors
    }

    /// Validate and build the request body.
    ///
    /// Title and description are submitted trimmed; tags go as an array.
    pub fn into_request(
        self,
        creator: Option<UserId>,
    ) -> Result<ProjectCreateRequest, ValidationErrors> {
        let errors = self.validate(creator);
        let Some(user_id) = creator else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ProjectCreateRequest {
            user_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            tech_stacks: self.tech_stacks.into_vec(),
            team_size: u32::try_from(self.team_size).unwrap_or(u32::MAX),
            duration_weeks: u32::try_from(self.duration_weeks).unwrap_or(u32::MAX),
        })
    }
}

/// Re-check one already-listed tag, untrimmed.
fn check_listed_tag(tag: &str) -> Option<ValidationError> {
    if tag.trim().is_empty() {
        return Some(ValidationError::BlankTechStack);
    }
    if tag.chars().count() > MAX_TECH_NAME_LEN {
        return Some(ValidationError::TechStackTooLong(tag.to_string()));
    }
    if !tag.chars().all(is_allowed_char) {
        return Some(ValidationError::TechStackInvalidCharacters(tag.to_string()));
    }
    None
}

/// First tag that repeats an earlier one, ignoring case.
fn first_duplicate(tags: &[String]) -> Option<ValidationError> {
    tags.iter().enumerate().find_map(|(i, tag)| {
        let lower = tag.to_lowercase();
        tags[..i]
            .iter()
            .any(|earlier| earlier.to_lowercase() == lower)
            .then(|| ValidationError::DuplicateTechStack(tag.clone()))
    })
}

// =============================================================================
// CONTENT
// =============================================================================

/// Validate new project content. Returns the trimmed text to submit.
pub fn validate_content(raw: &str) -> Result<String, ValidationError> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(ValidationError::ContentEmpty);
    }
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(ValidationError::ContentTooLong);
    }
    Ok(content.to_string())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ProjectDraft {
        let mut tags = TechStackTags::new();
        let _ = tags.add("Rust");
        let _ = tags.add("PostgreSQL");
        ProjectDraft {
            title: "Matching engine".into(),
            description: "Pair developers with projects".into(),
            tech_stacks: tags,
            team_size: 4,
            duration_weeks: 8,
        }
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(valid_draft().validate(Some(UserId(1))).is_empty());
    }

    #[test]
    fn collects_errors_in_checking_order() {
        let draft = ProjectDraft {
            title: String::new(),
            description: "x".repeat(2001),
            tech_stacks: TechStackTags::new(),
            ..ProjectDraft::default()
        };
        let errors = draft.validate(Some(UserId(1)));
        assert_eq!(
            errors.as_slice(),
            [
                ValidationError::TitleEmpty,
                ValidationError::DescriptionTooLong,
                ValidationError::TechStacksEmpty,
            ]
        );
    }

    #[test]
    fn missing_identity_comes_first() {
        let mut draft = valid_draft();
        draft.team_size = 0;
        draft.duration_weeks = -3;
        let errors = draft.validate(None);
        assert_eq!(
            errors.as_slice(),
            [
                ValidationError::NotAuthenticated,
                ValidationError::TeamSizeTooSmall,
                ValidationError::DurationTooShort,
            ]
        );
    }

    #[test]
    fn whitespace_title_counts_as_empty() {
        let mut draft = valid_draft();
        draft.title = "   ".into();
        assert!(draft.validate(Some(UserId(1))).contains(&ValidationError::TitleEmpty));
    }

    #[test]
    fn title_limit_is_two_hundred() {
        let mut draft = valid_draft();
        draft.title = "t".repeat(200);
        assert!(draft.validate(Some(UserId(1))).is_empty());
        draft.title = "t".repeat(201);
        assert_eq!(
            draft.validate(Some(UserId(1))).as_slice(),
            [ValidationError::TitleTooLong]
        );
    }

    #[test]
    fn only_first_bad_tag_is_reported() {
        let mut draft = valid_draft();
        draft.tech_stacks = TechStackTags::from_vec(vec![
            "Rust".into(),
            "C++!".into(),
            "x".repeat(31),
        ]);
        assert_eq!(
            draft.validate(Some(UserId(1))).as_slice(),
            [ValidationError::TechStackInvalidCharacters("C++!".into())]
        );
    }

    #[test]
    fn too_many_tags_loaded_from_elsewhere() {
        let mut draft = valid_draft();
        draft.tech_stacks =
            TechStackTags::from_vec((0..11).map(|i| format!("t{}", i)).collect());
        assert_eq!(
            draft.validate(Some(UserId(1))).as_slice(),
            [ValidationError::TooManyTechStacks]
        );
    }

    #[test]
    fn duplicate_tags_loaded_from_elsewhere() {
        let mut draft = valid_draft();
        draft.tech_stacks = TechStackTags::from_vec(vec!["Rust".into(), "rust".into()]);
        assert_eq!(
            draft.validate(Some(UserId(1))).as_slice(),
            [ValidationError::DuplicateTechStack("rust".into())]
        );
    }

    #[test]
    fn long_tag_message_names_tag_and_limit() {
        let err = ValidationError::TechStackTooLong("x".repeat(31));
        assert_eq!(
            err.to_string(),
            format!("tech stack '{}' is longer than 30 characters", "x".repeat(31))
        );
    }

    #[test]
    fn into_request_trims_text() {
        let mut draft = valid_draft();
        draft.title = "  Matching engine  ".into();
        let request = draft.into_request(Some(UserId(9)));
        assert!(request.is_ok());
        if let Ok(request) = request {
            assert_eq!(request.user_id, UserId(9));
            assert_eq!(request.title, "Matching engine");
            assert_eq!(request.tech_stacks, vec!["Rust", "PostgreSQL"]);
            assert_eq!(request.team_size, 4);
            assert_eq!(request.duration_weeks, 8);
        }
    }

    #[test]
    fn into_request_without_identity_fails() {
        let result = valid_draft().into_request(None);
        assert_eq!(
            result.map_err(|e| e.into_vec()),
            Err(vec![ValidationError::NotAuthenticated])
        );
    }

    #[test]
    fn display_lists_every_error() {
        let errors = ProjectDraft::new().validate(None);
        let text = errors.to_string();
        assert!(text.starts_with("invalid input:"));
        assert_eq!(text.lines().count(), errors.len() + 1);
    }

    #[test]
    fn content_is_trimmed_and_bounded() {
        assert_eq!(validate_content("  hello "), Ok("hello".to_string()));
        assert_eq!(validate_content(" \n "), Err(ValidationError::ContentEmpty));
        assert_eq!(
            validate_content(&"c".repeat(2001)),
            Err(ValidationError::ContentTooLong)
        );
    }
}
