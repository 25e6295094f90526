//! Feature request domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::text::{split_comma_list, trimmed_or_empty};
use shared::validation::REQUIRED_FIELDS_MESSAGE;
use validator::{Validate, ValidationError, ValidationErrors};

/// Priority level of a feature request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a priority string is not one of the known levels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// Lifecycle status. Requests never leave `Submitted` in this system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureRequestStatus {
    #[default]
    Submitted,
}

impl fmt::Display for FeatureRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureRequestStatus::Submitted => write!(f, "submitted"),
        }
    }
}

/// An accepted feature request, as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRequest {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub acceptance_criteria: String,
    pub priority: Priority,
    pub target_timeline: String,
    pub affected_components: Vec<String>,
    pub example_usage: String,
    pub technical_constraints: String,
    pub created_at: DateTime<Utc>,
    pub status: FeatureRequestStatus,
}

/// Raw submission payload shared by the JSON API and the HTML form.
///
/// Required fields default to the empty string so that an absent field and a
/// blank one are rejected the same way.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SubmitFeatureRequest {
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub acceptance_criteria: String,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_priority"))]
    pub priority: String,

    #[serde(default)]
    pub target_timeline: Option<String>,

    /// Comma-separated component list.
    #[serde(default)]
    pub affected_components: Option<String>,

    #[serde(default)]
    pub example_usage: Option<String>,

    #[serde(default)]
    pub technical_constraints: Option<String>,
}

/// A validated, normalized submission waiting for an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeatureRequest {
    pub title: String,
    pub description: String,
    pub acceptance_criteria: String,
    pub priority: Priority,
    pub target_timeline: String,
    pub affected_components: Vec<String>,
    pub example_usage: String,
    pub technical_constraints: String,
}

impl NewFeatureRequest {
    /// Stamps the server-assigned fields and produces the stored record.
    pub fn into_feature_request(self, id: u64, created_at: DateTime<Utc>) -> FeatureRequest {
        FeatureRequest {
            id,
            title: self.title,
            description: self.description,
            acceptance_criteria: self.acceptance_criteria,
            priority: self.priority,
            target_timeline: self.target_timeline,
            affected_components: self.affected_components,
            example_usage: self.example_usage,
            technical_constraints: self.technical_constraints,
            created_at,
            status: FeatureRequestStatus::Submitted,
        }
    }
}

impl TryFrom<SubmitFeatureRequest> for NewFeatureRequest {
    type Error = ValidationErrors;

    fn try_from(submission: SubmitFeatureRequest) -> Result<Self, Self::Error> {
        submission.validate()?;

        let priority = submission.priority.parse::<Priority>().map_err(|e| {
            let mut err = ValidationError::new("priority");
            err.message = Some(e.to_string().into());
            let mut errors = ValidationErrors::new();
            errors.add("priority", err);
            errors
        })?;

        Ok(Self {
            title: submission.title.trim().to_string(),
            description: submission.description.trim().to_string(),
            acceptance_criteria: submission.acceptance_criteria.trim().to_string(),
            priority,
            target_timeline: trimmed_or_empty(submission.target_timeline.as_deref()),
            affected_components: split_comma_list(submission.affected_components.as_deref()),
            example_usage: trimmed_or_empty(submission.example_usage.as_deref()),
            technical_constraints: trimmed_or_empty(submission.technical_constraints.as_deref()),
        })
    }
}

/// Collapses validation errors into the single message shown to submitters.
///
/// Any missing required field wins over other problems.
pub fn rejection_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let all: Vec<&ValidationError> = field_errors
        .values()
        .flat_map(|errs| errs.iter())
        .collect();

    if all.iter().any(|e| e.code == "required") {
        return REQUIRED_FIELDS_MESSAGE.to_string();
    }

    all.iter()
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| REQUIRED_FIELDS_MESSAGE.to_string())
}
