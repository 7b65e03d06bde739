use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// Workplace arrangement of a posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[default]
    Remote,
    Onsite,
    Hybrid,
}

/// Seniority bracket of a posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Intern,
    #[default]
    Junior,
    Mid,
    Senior,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobType::Remote => write!(f, "Remote"),
            JobType::Onsite => write!(f, "Onsite"),
            JobType::Hybrid => write!(f, "Hybrid"),
        }
    }
}

impl FromStr for JobType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Remote" => Ok(JobType::Remote),
            "Onsite" => Ok(JobType::Onsite),
            "Hybrid" => Ok(JobType::Hybrid),
            other => Err(ValidationError::UnknownJobType(other.to_string())),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceLevel::Intern => write!(f, "Intern"),
            ExperienceLevel::Junior => write!(f, "Junior"),
            ExperienceLevel::Mid => write!(f, "Mid"),
            ExperienceLevel::Senior => write!(f, "Senior"),
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Intern" => Ok(ExperienceLevel::Intern),
            "Junior" => Ok(ExperienceLevel::Junior),
            "Mid" => Ok(ExperienceLevel::Mid),
            "Senior" => Ok(ExperienceLevel::Senior),
            other => Err(ValidationError::UnknownExperienceLevel(other.to_string())),
        }
    }
}

/// A stored job posting. `id` and `created_at` are assigned by the store at
/// creation and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    /// Inline data URI, or empty when no logo was uploaded.
    #[serde(default)]
    pub company_logo: String,
    pub location: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    /// HTML fragment.
    #[serde(default)]
    pub description: String,
    pub apply_url: String,
    pub created_at: DateTime<Utc>,
}

/// The mutable field set of a posting: the create payload, and the
/// replacement fields of an update.
///
/// Every field defaults so that a sparse payload deserializes and is then
/// rejected by [`JobDraft::validate`] with a message the caller can surface,
/// instead of failing opaquely at the JSON layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub company_logo: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub apply_url: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("applyUrl is not a valid absolute URL: '{0}'")]
    InvalidApplyUrl(String),
    #[error("unknown job type '{0}'")]
    UnknownJobType(String),
    #[error("unknown experience level '{0}'")]
    UnknownExperienceLevel(String),
}

impl JobDraft {
    /// A draft is either fully present or rejected; partial records must
    /// never reach the store. Logo and description stay optional.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
            ("applyUrl", &self.apply_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(name));
            }
        }
        // Url::parse only accepts absolute URLs, which is exactly the rule.
        Url::parse(&self.apply_url)
            .map(|_| ())
            .map_err(|_| ValidationError::InvalidApplyUrl(self.apply_url.clone()))
    }
}

impl JobRecord {
    /// Replace all mutable fields from a draft, preserving identity and the
    /// creation timestamp.
    pub fn apply_draft(&mut self, draft: JobDraft) {
        self.title = draft.title;
        self.company = draft.company;
        self.company_logo = draft.company_logo;
        self.location = draft.location;
        self.job_type = draft.job_type;
        self.experience_level = draft.experience_level;
        self.description = draft.description;
        self.apply_url = draft.apply_url;
    }

    /// The mutable field set of this record, as a draft.
    pub fn to_draft(&self) -> JobDraft {
        JobDraft {
            title: self.title.clone(),
            company: self.company.clone(),
            company_logo: self.company_logo.clone(),
            location: self.location.clone(),
            job_type: self.job_type,
            experience_level: self.experience_level,
            description: self.description.clone(),
            apply_url: self.apply_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> JobDraft {
        JobDraft {
            title: "Backend Engineer".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            job_type: JobType::Remote,
            experience_level: ExperienceLevel::Senior,
            description: "<p>Build APIs</p>".into(),
            apply_url: "https://acme.io/apply".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut draft = valid_draft();
        draft.company = "   ".into();
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField("company"))
        );
    }

    #[test]
    fn relative_apply_url_is_rejected() {
        let mut draft = valid_draft();
        draft.apply_url = "careers/apply".into();
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidApplyUrl(_))
        ));
    }

    #[test]
    fn logo_and_description_are_optional() {
        let mut draft = valid_draft();
        draft.company_logo.clear();
        draft.description.clear();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn wire_format_is_camel_case() {
        let value = serde_json::to_value(valid_draft()).unwrap();
        assert_eq!(value["jobType"], "Remote");
        assert_eq!(value["experienceLevel"], "Senior");
        assert_eq!(value["applyUrl"], "https://acme.io/apply");
        assert!(value.get("apply_url").is_none());
    }

    #[test]
    fn sparse_payload_deserializes_then_fails_validation() {
        let draft: JobDraft = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(draft.job_type, JobType::Remote);
        assert_eq!(draft.experience_level, ExperienceLevel::Junior);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn enum_values_round_trip_from_select_strings() {
        assert_eq!("Hybrid".parse::<JobType>().unwrap(), JobType::Hybrid);
        assert_eq!("Mid".parse::<ExperienceLevel>().unwrap(), ExperienceLevel::Mid);
        assert!("Freelance".parse::<JobType>().is_err());
    }

    #[test]
    fn apply_draft_preserves_identity() {
        let mut record = JobRecord {
            id: Uuid::new_v4(),
            title: "Old".into(),
            company: "Acme".into(),
            company_logo: String::new(),
            location: "Berlin".into(),
            job_type: JobType::Onsite,
            experience_level: ExperienceLevel::Mid,
            description: String::new(),
            apply_url: "https://acme.io/apply".into(),
            created_at: Utc::now(),
        };
        let id = record.id;
        let created_at = record.created_at;
        record.apply_draft(valid_draft());
        assert_eq!(record.id, id);
        assert_eq!(record.created_at, created_at);
        assert_eq!(record.title, "Backend Engineer");
    }
}
