use crate::model::{JobDraft, JobRecord, ValidationError};

/// A form field addressed by the generic change handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Company,
    CompanyLogo,
    Location,
    JobType,
    ExperienceLevel,
    Description,
    ApplyUrl,
}

/// In-progress form state for the create and edit flows.
///
/// Updates are immutable record updates: `set` and the dedicated setters
/// return a new form with exactly one field replaced, which keeps the
/// controllers' state transitions trivial to assert on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobForm {
    draft: JobDraft,
}

impl JobForm {
    /// A blank form with the default selections (Remote / Junior).
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the form wholesale from an existing record.
    pub fn from_record(record: &JobRecord) -> Self {
        Self {
            draft: record.to_draft(),
        }
    }

    /// Replace one field from its text representation. Enumeration fields
    /// parse their select values; everything else is taken as-is.
    pub fn set(&self, field: FormField, value: &str) -> Result<JobForm, ValidationError> {
        let mut draft = self.draft.clone();
        match field {
            FormField::Title => draft.title = value.to_string(),
            FormField::Company => draft.company = value.to_string(),
            FormField::CompanyLogo => draft.company_logo = value.to_string(),
            FormField::Location => draft.location = value.to_string(),
            FormField::JobType => draft.job_type = value.parse()?,
            FormField::ExperienceLevel => draft.experience_level = value.parse()?,
            FormField::Description => draft.description = value.to_string(),
            FormField::ApplyUrl => draft.apply_url = value.to_string(),
        }
        Ok(JobForm { draft })
    }

    /// Dedicated rich-text setter. The editor widget hands over an HTML
    /// fragment rather than a change event, so description updates bypass
    /// the generic handler.
    pub fn with_description(&self, html: &str) -> JobForm {
        let mut draft = self.draft.clone();
        draft.description = html.to_string();
        JobForm { draft }
    }

    /// Commit an encoded logo data URI.
    pub fn with_logo(&self, data_uri: String) -> JobForm {
        let mut draft = self.draft.clone();
        draft.company_logo = data_uri;
        JobForm { draft }
    }

    pub fn draft(&self) -> &JobDraft {
        &self.draft
    }
}
