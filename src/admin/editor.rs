use uuid::Uuid;

use super::{FormField, JobForm, Navigation, Notice, Notifier};
use crate::client::JobsApi;
use crate::model::ValidationError;

/// Edit-page state: fetch one record, seed the form, submit a full-record
/// update keyed by id.
#[derive(Debug)]
pub struct EditorController {
    id: Uuid,
    form: JobForm,
    loading: bool,
}

/// While the initial fetch is in flight the form must not render; editing
/// a not-yet-populated record would submit blanks.
#[derive(Debug, PartialEq)]
pub enum EditorView<'a> {
    Loading,
    Form(&'a JobForm),
}

impl EditorController {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            form: JobForm::new(),
            loading: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn form(&self) -> &JobForm {
        &self.form
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> EditorView<'_> {
        if self.loading {
            EditorView::Loading
        } else {
            EditorView::Form(&self.form)
        }
    }

    /// Initial fetch. Single-record lookup is List plus a scan; a record
    /// that is not in the listing sends the user back to the dashboard with
    /// a notice, and no update is ever attempted for it. Loading clears on
    /// every path.
    pub async fn load(&mut self, api: &dyn JobsApi, notifier: &dyn Notifier) -> Navigation {
        let navigation = match api.find_by_id(self.id).await {
            Ok(Some(job)) => {
                self.form = JobForm::from_record(&job);
                Navigation::Stay
            }
            Ok(None) => {
                notifier.notify(Notice::Error("Job not found".to_string()));
                Navigation::ToList
            }
            Err(e) => {
                // Without a seeded form there is nothing to edit; bail back
                // to the dashboard instead of offering a blank record.
                notifier.notify(Notice::Error(e.to_string()));
                Navigation::ToList
            }
        };
        self.loading = false;
        navigation
    }

    /// Replace one field. The previous form value is dropped wholesale; all
    /// other fields ride along untouched.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), ValidationError> {
        self.form = self.form.set(field, value)?;
        Ok(())
    }

    /// Rich-text setter; description stays HTML on the edit path too.
    pub fn set_description(&mut self, html: &str) {
        self.form = self.form.with_description(html);
    }

    /// Submit `{ id, ...form }`. Success navigates back to the dashboard;
    /// failure keeps the form editable with a generic notice. Loading is
    /// cleared in a final step on both branches.
    pub async fn submit(&mut self, api: &dyn JobsApi, notifier: &dyn Notifier) -> Navigation {
        if self.loading {
            // The submit control is disabled while a request is in flight.
            return Navigation::Stay;
        }

        self.loading = true;
        let navigation = match api.update(self.id, self.form.draft()).await {
            Ok(()) => {
                notifier.notify(Notice::Success("Job updated!".to_string()));
                Navigation::ToList
            }
            Err(e) => {
                tracing::debug!("update failed: {}", e);
                notifier.notify(Notice::Error("Failed to update job.".to_string()));
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
    use crate::testing::{records, FailKind, FakeApi, RecordingNotifier};

    #[tokio::test]
    async fn load_seeds_the_form_wholesale() {
        let jobs = records(&["Backend Engineer"]);
        let target = jobs[0].clone();
        let api = FakeApi::with_jobs(jobs);
        let notifier = RecordingNotifier::new();
        let mut controller = EditorController::new(target.id);
        assert_eq!(controller.view(), EditorView::Loading);

        let navigation = controller.load(&api, &notifier).await;

        assert_eq!(navigation, Navigation::Stay);
        assert!(!controller.loading());
        assert_eq!(controller.form().draft().title, "Backend Engineer");
        assert!(matches!(controller.view(), EditorView::Form(_)));
    }

    #[tokio::test]
    async fn missing_record_notifies_and_navigates_back() {
        let api = FakeApi::with_jobs(records(&["other"]));
        let notifier = RecordingNotifier::new();
        let mut controller = EditorController::new(Uuid::new_v4());

        let navigation = controller.load(&api, &notifier).await;

        assert_eq!(navigation, Navigation::ToList);
        assert!(!controller.loading());
        assert_eq!(
            notifier.notices(),
            vec![Notice::Error("Job not found".to_string())]
        );
        // No update was attempted on the way out.
        assert_eq!(api.update_calls(), 0);
    }

    #[tokio::test]
    async fn edit_then_submit_sends_the_full_record() {
        let jobs = records(&["Backend Engineer"]);
        let target = jobs[0].clone();
        let api = FakeApi::with_jobs(jobs);
        let notifier = RecordingNotifier::new();
        let mut controller = EditorController::new(target.id);
        controller.load(&api, &notifier).await;

        controller.set(FormField::Location, "Berlin").unwrap();
        let navigation = controller.submit(&api, &notifier).await;

        assert_eq!(navigation, Navigation::ToList);
        assert!(!controller.loading());
        let stored = api.jobs().await;
        assert_eq!(stored[0].location, "Berlin");
        // Everything else rode along unchanged.
        assert_eq!(stored[0].title, "Backend Engineer");
        assert_eq!(stored[0].id, target.id);
        assert_eq!(
            notifier.notices(),
            vec![Notice::Success("Job updated!".to_string())]
        );
    }

    #[tokio::test]
    async fn no_op_edit_is_idempotent() {
        let jobs = records(&["Backend Engineer"]);
        let target = jobs[0].clone();
        let api = FakeApi::with_jobs(jobs);
        let notifier = RecordingNotifier::new();
        let mut controller = EditorController::new(target.id);
        controller.load(&api, &notifier).await;

        controller.submit(&api, &notifier).await;

        let stored = api.jobs().await;
        assert_eq!(stored[0].to_draft(), target.to_draft());
    }

    #[tokio::test]
    async fn failed_submit_keeps_the_form_editable() {
        let jobs = records(&["Backend Engineer"]);
        let target = jobs[0].clone();
        let api = FakeApi::with_jobs(jobs);
        let notifier = RecordingNotifier::new();
        let mut controller = EditorController::new(target.id);
        controller.load(&api, &notifier).await;

        api.fail_next(FailKind::Api(500, "boom".to_string()));
        let navigation = controller.submit(&api, &notifier).await;

        assert_eq!(navigation, Navigation::Stay);
        // Loading was cleared even on the failure branch; the form is not
        // stuck disabled.
        assert!(!controller.loading());
        assert_eq!(
            notifier.notices(),
            vec![Notice::Error("Failed to update job.".to_string())]
        );
    }

    #[tokio::test]
    async fn submit_is_blocked_while_loading() {
        let jobs = records(&["Backend Engineer"]);
        let target = jobs[0].clone();
        let api = FakeApi::with_jobs(jobs);
        let notifier = RecordingNotifier::new();
        let mut controller = EditorController::new(target.id);

        // Not loaded yet; the submit control is still disabled.
        let navigation = controller.submit(&api, &notifier).await;

        assert_eq!(navigation, Navigation::Stay);
        assert_eq!(api.update_calls(), 0);
    }
}
