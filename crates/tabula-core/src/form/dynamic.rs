//! Form generated from a schema fetched at mount time

use super::control::{Control, write_value};
use crate::api::FormApi;
use crate::error::{TabulaError, TabulaResult};
use crate::http::{ApiResponse, SharedTransport};
use crate::record::FormValues;
use crate::schema::FieldDescriptor;
use crate::session::Session;
use std::fmt;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Whether the form creates or updates; affects titles only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormType {
    #[default]
    Create,
    Update,
}

impl FormType {
    pub fn verb(&self) -> &'static str {
        match self {
            FormType::Create => "Create",
            FormType::Update => "Update",
        }
    }
}

/// Lifecycle of a dynamic form
///
/// `Unmounted → SchemaLoading → Ready ⇄ Submitting`, with `Failed` when the
/// schema cannot be fetched or has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Unmounted,
    SchemaLoading,
    Ready,
    Submitting,
    Failed(String),
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormState::Unmounted => f.write_str("unmounted"),
            FormState::SchemaLoading => f.write_str("schema-loading"),
            FormState::Ready => f.write_str("ready"),
            FormState::Submitting => f.write_str("submitting"),
            FormState::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Dialog whose fields come from a server-supplied schema.
///
/// Values are seeded from the optional initial record and every control is
/// rendered from those values, so there is one copy of each field's value.
pub struct DynamicForm {
    api: FormApi,
    topic: String,
    form_type: FormType,
    schema_endpoint: String,
    submit_endpoint: String,
    state: FormState,
    fields: Vec<FieldDescriptor>,
    initial: FormValues,
    values: FormValues,
    open: bool,
    session: Session,
    submission: Option<JoinHandle<TabulaResult<ApiResponse>>>,
}

impl DynamicForm {
    pub fn new(
        transport: SharedTransport,
        topic: impl Into<String>,
        form_type: FormType,
        schema_endpoint: impl Into<String>,
        submit_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            api: FormApi::new(transport),
            topic: topic.into(),
            form_type,
            schema_endpoint: schema_endpoint.into(),
            submit_endpoint: submit_endpoint.into(),
            state: FormState::Unmounted,
            fields: Vec::new(),
            initial: FormValues::new(),
            values: FormValues::new(),
            open: true,
            session: Session::new(),
            submission: None,
        }
    }

    /// Seed values from an existing record
    pub fn with_initial(mut self, initial: FormValues) -> Self {
        self.values = initial.clone();
        self.initial = initial;
        self
    }

    /// Start closed instead of open
    pub fn closed(mut self) -> Self {
        self.open = false;
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    /// Dialog title, also used as the confirm button label
    pub fn title(&self) -> String {
        format!("{} {}", self.form_type.verb(), self.topic)
    }

    /// Fetch the schema and become interactive.
    ///
    /// A fetch or shape error moves the form to `Failed`; mounting again
    /// retries.
    #[instrument(skip(self), fields(endpoint = %self.schema_endpoint))]
    pub async fn mount(&mut self) -> TabulaResult<()> {
        match self.state {
            FormState::Unmounted | FormState::Failed(_) => {}
            ref other => {
                return Err(TabulaError::invalid_state(format!(
                    "cannot mount a form that is {}",
                    other
                )));
            }
        }
        if self.session.is_cancelled() {
            self.session = Session::new();
        }

        self.state = FormState::SchemaLoading;
        let fetched = self
            .session
            .run(self.api.fetch_schema(&self.schema_endpoint))
            .await;

        match fetched {
            Ok(fields) => {
                debug!(fields = fields.len(), "schema loaded");
                self.fields = fields;
                self.state = FormState::Ready;
                Ok(())
            }
            Err(TabulaError::Cancelled) => {
                self.state = FormState::Unmounted;
                Err(TabulaError::Cancelled)
            }
            Err(e) => {
                warn!(error = %e, "schema fetch failed");
                self.state = FormState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// One control per schema field, in schema order; empty until ready
    pub fn controls(&self) -> Vec<Control> {
        match self.state {
            FormState::Ready | FormState::Submitting => self
                .fields
                .iter()
                .map(|f| Control::render(f, &self.values))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> TabulaResult<()> {
        if self.state != FormState::Ready {
            return Err(TabulaError::invalid_state(format!(
                "form is {}, not ready for input",
                self.state
            )));
        }
        write_value(&self.fields, &mut self.values, key, value)
    }

    /// Reopen the dialog
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close without submitting; typed values are discarded
    pub fn cancel(&mut self) {
        self.open = false;
        self.values = self.initial.clone();
    }

    /// Post the current values and close the dialog at once.
    ///
    /// The request runs in the background and is always sent to completion,
    /// even if the form is unmounted or dropped meanwhile; only its result is
    /// discarded then. `settle` collects the outcome. The method is a POST
    /// for both form types.
    pub fn submit(&mut self) -> TabulaResult<()> {
        if self.state != FormState::Ready {
            return Err(TabulaError::invalid_state(format!(
                "cannot submit a form that is {}",
                self.state
            )));
        }

        let api = self.api.clone();
        let endpoint = self.submit_endpoint.clone();
        let values = std::mem::replace(&mut self.values, self.initial.clone());
        let token = self.session.token();

        info!(endpoint = %endpoint, fields = values.len(), "submitting form");
        self.submission = Some(tokio::spawn(async move {
            let result = api.submit(&endpoint, &values).await;
            if token.is_cancelled() {
                debug!(endpoint = %endpoint, "submission finished after unmount, result dropped");
                return Err(TabulaError::Cancelled);
            }
            result
        }));
        self.state = FormState::Submitting;
        self.open = false;
        Ok(())
    }

    /// Wait for the in-flight submission, if any, and return to `Ready`
    pub async fn settle(&mut self) -> TabulaResult<Option<ApiResponse>> {
        let Some(handle) = self.submission.take() else {
            return Ok(None);
        };

        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => Err(TabulaError::other(format!("submission task failed: {}", e))),
        };
        if self.state == FormState::Submitting {
            self.state = FormState::Ready;
        }

        match outcome {
            Ok(response) => {
                info!(status = response.status, "form submitted");
                Ok(Some(response))
            }
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, "form submission failed");
                }
                Err(e)
            }
        }
    }

    /// Tear the form down; a pending schema fetch is abandoned and the result
    /// of an in-flight submission is dropped
    pub fn unmount(&mut self) {
        self.session.cancel();
        self.submission = None;
        self.state = FormState::Unmounted;
        self.open = false;
        self.fields.clear();
        self.values = self.initial.clone();
        debug!(topic = %self.topic, "form unmounted");
    }
}

impl Drop for DynamicForm {
    fn drop(&mut self) {
        self.session.cancel();
    }
}
