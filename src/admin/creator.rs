use std::path::Path;

use super::{FormField, JobForm, Navigation, Notice, Notifier};
use crate::client::JobsApi;
use crate::model::ValidationError;
use crate::upload::{self, UploadError};

/// Create-page state: a blank form with defaults, logo attachment, and the
/// create submission.
#[derive(Debug, Default)]
pub struct CreatorController {
    form: JobForm,
    loading: bool,
    /// Bumped on reset so that encode results from a previous form life
    /// are dropped instead of committed.
    generation: u64,
}

/// Handle for an in-flight logo encode. A result is only committed while
/// the form it was started against is still live.
#[derive(Debug, Clone, Copy)]
pub struct LogoTicket {
    generation: u64,
}

impl CreatorController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &JobForm {
        &self.form
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Generic change handler, identical policy to the editor.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), ValidationError> {
        self.form = self.form.set(field, value)?;
        Ok(())
    }

    /// Rich-text setter, decoupled from the generic handler.
    pub fn set_description(&mut self, html: &str) {
        self.form = self.form.with_description(html);
    }

    /// Start a logo attachment against the current form life.
    pub fn begin_logo(&self) -> LogoTicket {
        LogoTicket {
            generation: self.generation,
        }
    }

    /// Deliver an encode result. Returns false when the result is stale
    /// (the form was reset while the encode ran) and nothing was changed.
    pub fn commit_logo(&mut self, ticket: LogoTicket, data_uri: String) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.form = self.form.with_logo(data_uri);
        true
    }

    /// Attach a logo file: size-gate, encode, commit. An oversized file
    /// produces a warning notice and no state change; the form stays
    /// interactive throughout.
    pub async fn attach_logo(&mut self, path: &Path, notifier: &dyn Notifier) {
        let ticket = self.begin_logo();
        match upload::encode_logo(path).await {
            Ok(data_uri) => {
                self.commit_logo(ticket, data_uri);
            }
            Err(e @ UploadError::TooLarge { .. }) => {
                notifier.notify(Notice::Error(e.to_string()));
            }
            Err(e) => {
                notifier.notify(Notice::Error(format!("Could not read logo: {}", e)));
            }
        }
    }

    /// Clear the form back to defaults. Outstanding encode tickets die here.
    pub fn reset(&mut self) {
        self.form = JobForm::new();
        self.generation += 1;
    }

    /// Submit the form. Required fields are checked before any network
    /// call; a server rejection surfaces its message, a transport failure
    /// surfaces the exception. Loading always clears.
    pub async fn submit(&mut self, api: &dyn JobsApi, notifier: &dyn Notifier) -> Navigation {
        if self.loading {
            return Navigation::Stay;
        }

        if let Err(e) = self.form.draft().validate() {
            notifier.notify(Notice::Error(e.to_string()));
            return Navigation::Stay;
        }

        self.loading = true;
        let navigation = match api.create(self.form.draft()).await {
            Ok(record) => {
                tracing::info!(id = %record.id, "job posted");
                notifier.notify(Notice::Success("Job posted!".to_string()));
                Navigation::ToList
            }
            Err(e) => {
                notifier.notify(Notice::Error(e.to_string()));
                Navigation::Stay
            }
        };
        self.loading = false;
        navigation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExperienceLevel, JobType};
    use crate::testing::{FailKind, FakeApi, RecordingNotifier};
    use std::io::Write;

    fn filled_controller() -> CreatorController {
        let mut controller = CreatorController::new();
        controller.set(FormField::Title, "Backend Engineer").unwrap();
        controller.set(FormField::Company, "Acme").unwrap();
        controller.set(FormField::Location, "Remote").unwrap();
        controller
            .set(FormField::ExperienceLevel, "Senior")
            .unwrap();
        controller
            .set(FormField::ApplyUrl, "https://acme.io/apply")
            .unwrap();
        controller.set_description("<p>Build APIs</p>");
        controller
    }

    #[test]
    fn new_form_has_the_documented_defaults() {
        let controller = CreatorController::new();
        assert!(!controller.loading());
        assert_eq!(controller.form().draft().job_type, JobType::Remote);
        assert_eq!(
            controller.form().draft().experience_level,
            ExperienceLevel::Junior
        );
    }

    #[tokio::test]
    async fn submit_creates_the_record_and_navigates_to_the_list() {
        let api = FakeApi::new();
        let notifier = RecordingNotifier::new();
        let mut controller = filled_controller();

        let navigation = controller.submit(&api, &notifier).await;

        assert_eq!(navigation, Navigation::ToList);
        assert!(!controller.loading());
        let stored = api.jobs().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Backend Engineer");
        assert_eq!(stored[0].experience_level, ExperienceLevel::Senior);
        assert_eq!(
            notifier.notices(),
            vec![Notice::Success("Job posted!".to_string())]
        );
    }

    #[tokio::test]
    async fn missing_required_field_never_reaches_the_network() {
        let api = FakeApi::new();
        let notifier = RecordingNotifier::new();
        let mut controller = filled_controller();
        controller.set(FormField::Title, "").unwrap();

        let navigation = controller.submit(&api, &notifier).await;

        assert_eq!(navigation, Navigation::Stay);
        assert_eq!(api.create_calls(), 0);
        assert_eq!(
            notifier.notices(),
            vec![Notice::Error("missing required field 'title'".to_string())]
        );
    }

    #[tokio::test]
    async fn server_rejection_surfaces_the_server_message() {
        let api = FakeApi::new();
        api.fail_next(FailKind::Api(400, "applyUrl is not a valid absolute URL: 'x'".into()));
        let notifier = RecordingNotifier::new();
        let mut controller = filled_controller();

        let navigation = controller.submit(&api, &notifier).await;

        assert_eq!(navigation, Navigation::Stay);
        assert!(!controller.loading());
        let messages = notifier.notices();
        assert_eq!(messages.len(), 1);
        assert!(messages[0]
            .message()
            .contains("applyUrl is not a valid absolute URL"));
    }

    #[tokio::test]
    async fn transport_failure_surfaces_the_exception_message() {
        let api = FakeApi::new();
        api.fail_next(FailKind::Network);
        let notifier = RecordingNotifier::new();
        let mut controller = filled_controller();

        controller.submit(&api, &notifier).await;

        assert!(!controller.loading());
        let messages = notifier.notices();
        assert!(messages[0].message().starts_with("network error"));
    }

    #[tokio::test]
    async fn small_logo_is_encoded_and_committed() {
        let notifier = RecordingNotifier::new();
        let mut controller = CreatorController::new();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
            .unwrap();
        file.write_all(&[0u8; 64]).unwrap();
        file.flush().unwrap();

        controller.attach_logo(file.path(), &notifier).await;

        assert!(controller
            .form()
            .draft()
            .company_logo
            .starts_with("data:image/png;base64,"));
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn oversized_logo_is_rejected_without_touching_the_form() {
        let notifier = RecordingNotifier::new();
        let mut controller = CreatorController::new();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&vec![0u8; 2 * 1024 * 1024 + 1]).unwrap();
        file.flush().unwrap();

        controller.attach_logo(file.path(), &notifier).await;

        assert!(controller.form().draft().company_logo.is_empty());
        let messages = notifier.notices();
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], Notice::Error(_)));
    }

    #[test]
    fn stale_encode_result_is_dropped_after_reset() {
        let mut controller = CreatorController::new();
        let ticket = controller.begin_logo();

        controller.reset();

        let committed = controller.commit_logo(ticket, "data:image/png;base64,AAAA".into());
        assert!(!committed);
        assert!(controller.form().draft().company_logo.is_empty());
    }
}
