//! Table controller: local collection, inline editing and CRUD round trips

use super::collection::RecordCollection;
use super::confirm::Confirmer;
use super::mutation::MutationLog;
use super::notice::{Notice, Operation};
use super::validation::{ValidationErrors, cell_id};
use crate::api::MachineApi;
use crate::config::ClientConfig;
use crate::error::{TabulaError, TabulaResult};
use crate::form::CreateForm;
use crate::http::{ReqwestTransport, RetryingTransport, SharedTransport};
use crate::record::{FormValues, Machine, NewMachine};
use crate::schema::{FieldDescriptor, machine_columns};
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

/// Capacity of the notice channel
const NOTICE_CAPACITY: usize = 64;

/// The row currently open in the inline editor
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub id: String,
    /// Values typed so far; the collection is untouched until the save commits
    pub draft: Machine,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Server confirmed; the row was overwritten and the editor closed
    Saved(Machine),
    /// Validation errors are pending; nothing was sent
    Blocked { errors: usize },
    /// Server answered without success; the editor stays open
    Rejected { status: u16 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(Machine),
    /// The user did not confirm; nothing was sent
    Declined,
    Rejected { status: u16 },
}

/// Owns the authoritative local copy of the machine collection.
///
/// Requests run under the controller's session; after [`shutdown`](Self::shutdown)
/// late responses are discarded. Failures are logged, recorded in the
/// mutation log and published as [`Notice`]s.
pub struct TableController {
    api: MachineApi,
    columns: Vec<FieldDescriptor>,
    records: RecordCollection,
    errors: ValidationErrors,
    editing: Option<EditSession>,
    mutations: MutationLog,
    notices: broadcast::Sender<Notice>,
    session: Session,
}

impl TableController {
    pub fn new(transport: SharedTransport, config: &ClientConfig) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            api: MachineApi::new(transport, config),
            columns: machine_columns(),
            records: RecordCollection::new(),
            errors: ValidationErrors::new(),
            editing: None,
            mutations: MutationLog::new(),
            notices,
            session: Session::new(),
        }
    }

    /// Controller over HTTP with retries for idempotent requests
    pub fn from_config(config: &ClientConfig) -> TabulaResult<Self> {
        let transport = RetryingTransport::new(ReqwestTransport::new(config)?, config.retry.clone());
        Ok(Self::new(Arc::new(transport), config))
    }

    pub fn columns(&self) -> &[FieldDescriptor] {
        &self.columns
    }

    pub fn records(&self) -> &[Machine] {
        self.records.rows()
    }

    pub fn record(&self, id: &str) -> Option<&Machine> {
        self.records.get(id)
    }

    /// Identity of the row shown at `index`
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.records.id_at(index)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn mutations(&self) -> &MutationLog {
        &self.mutations
    }

    /// Receive notices for failed operations
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Cancel in-flight requests; their results will not touch local state
    pub fn shutdown(&self) {
        debug!("table controller shutting down");
        self.session.cancel();
    }

    /// Fetch the collection and replace the local copy.
    ///
    /// On failure the previous collection is kept.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> TabulaResult<usize> {
        let outcome = match self.session.run(self.api.list()).await {
            Ok(machines) => self.records.replace(machines),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                info!(count = self.records.len(), "collection loaded");
                Ok(self.records.len())
            }
            Err(e) => {
                self.report(Operation::Load, None, &e);
                Err(e)
            }
        }
    }

    /// Create a record and append the server's canonical copy
    #[instrument(skip(self, values))]
    pub async fn create(&mut self, values: &FormValues) -> TabulaResult<Machine> {
        let mutation = self.mutations.begin(Operation::Create, None);
        let outcome = match NewMachine::from_values(values) {
            Ok(payload) => match self.session.run(self.api.create(&payload)).await {
                Ok(machine) => self.records.push(machine.clone()).map(|()| machine),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        match outcome {
            Ok(machine) => {
                info!(id = %machine.id, "record created");
                self.mutations.commit(mutation, Some(machine.id.clone()));
                Ok(machine)
            }
            Err(e) => {
                self.mutations.fail(mutation, e.to_string());
                self.report(Operation::Create, None, &e);
                Err(e)
            }
        }
    }

    /// Creation form over this table's columns
    pub fn create_form(&self) -> CreateForm {
        CreateForm::new(&self.columns)
    }

    /// Confirm a creation form and create its record; `None` if the form was closed
    pub async fn submit_create_form(
        &mut self,
        form: &mut CreateForm,
    ) -> TabulaResult<Option<Machine>> {
        match form.confirm() {
            Some(values) => self.create(&values).await.map(Some),
            None => Ok(None),
        }
    }

    /// Open a record in the inline editor.
    ///
    /// Opening another row replaces the current draft; pending validation
    /// errors are kept and still block saving.
    pub fn begin_edit(&mut self, id: &str) -> TabulaResult<&EditSession> {
        let draft = self
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| TabulaError::not_found_resource(format!("record '{}'", id), "machine"))?;
        debug!(id, "editing row");
        let edit = self.editing.insert(EditSession {
            id: id.to_string(),
            draft,
        });
        Ok(&*edit)
    }

    /// Open the record shown at `index` in the inline editor
    pub fn begin_edit_at(&mut self, index: usize) -> TabulaResult<&EditSession> {
        let id = self
            .records
            .id_at(index)
            .map(str::to_string)
            .ok_or_else(|| TabulaError::not_found(format!("no row at index {}", index)))?;
        self.begin_edit(&id)
    }

    /// Type into an editable cell of the open row.
    ///
    /// A cell that currently has an error is re-validated on every change so
    /// the error clears as soon as the value becomes valid.
    pub fn set_edit_value(&mut self, field: &str, value: &str) -> TabulaResult<()> {
        let column = self.editable_column(field)?;
        let edit = self
            .editing
            .as_mut()
            .ok_or_else(|| TabulaError::invalid_state("no row is being edited"))?;
        edit.draft.set(field, value)?;

        let cell = cell_id(&edit.id, field);
        if self.errors.contains(&cell) {
            self.errors.validate_cell(&cell, &column.label, value);
        }
        Ok(())
    }

    /// Focus left a cell of the open row: run the required check on it
    pub fn blur(&mut self, field: &str) -> TabulaResult<Option<String>> {
        let column = self.editable_column(field)?;
        let edit = self
            .editing
            .as_ref()
            .ok_or_else(|| TabulaError::invalid_state("no row is being edited"))?;
        let value = edit.draft.get(field).unwrap_or_default();
        let cell = cell_id(&edit.id, field);
        Ok(self
            .validate_cell(&cell, &column.label, &value)
            .map(str::to_string))
    }

    /// Required-field check for one cell; records `"<label> is required"` on failure
    pub fn validate_cell(&mut self, cell_id: &str, label: &str, value: &str) -> Option<&str> {
        self.errors.validate_cell(cell_id, label, value)
    }

    /// Send the open row to the server.
    ///
    /// Blocked while any validation error is pending. The row is overwritten
    /// and the editor closed only on a success status.
    #[instrument(skip(self))]
    pub async fn save_edit(&mut self) -> TabulaResult<SaveOutcome> {
        let draft = self
            .editing
            .as_ref()
            .map(|edit| edit.draft.clone())
            .ok_or_else(|| TabulaError::invalid_state("no row is being edited"))?;

        if !self.errors.is_empty() {
            warn!(errors = self.errors.len(), id = %draft.id, "save blocked by validation errors");
            return Ok(SaveOutcome::Blocked {
                errors: self.errors.len(),
            });
        }

        let url = self.api.record_url(&draft.id)?;
        let mutation = self.mutations.begin(Operation::Update, Some(draft.id.clone()));
        let outcome = self.session.run(self.api.update(&draft)).await;

        match outcome {
            Ok(response) if response.is_success() => {
                if let Err(e) = self.records.update(draft.clone()) {
                    self.mutations.fail(mutation, e.to_string());
                    self.report(Operation::Update, Some(&draft.id), &e);
                    return Err(e);
                }
                self.editing = None;
                self.mutations.commit(mutation, None);
                info!(id = %draft.id, "record updated");
                Ok(SaveOutcome::Saved(draft))
            }
            Ok(response) => {
                let error = TabulaError::http_status(response.status, url);
                self.mutations.fail(mutation, error.to_string());
                self.report(Operation::Update, Some(&draft.id), &error);
                Ok(SaveOutcome::Rejected {
                    status: response.status,
                })
            }
            Err(e) => {
                self.mutations.fail(mutation, e.to_string());
                self.report(Operation::Update, Some(&draft.id), &e);
                Err(e)
            }
        }
    }

    /// Leave the editor, clearing validation errors.
    ///
    /// The collection was never touched by the draft, which is returned as typed.
    pub fn cancel_edit(&mut self) -> Option<Machine> {
        self.errors.clear();
        self.editing.take().map(|edit| edit.draft)
    }

    /// Delete a record after the user confirms by name
    #[instrument(skip(self, confirmer))]
    pub async fn delete(&mut self, id: &str, confirmer: &dyn Confirmer) -> TabulaResult<DeleteOutcome> {
        let record = self
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| TabulaError::not_found_resource(format!("record '{}'", id), "machine"))?;

        let prompt = format!("Are you sure you want to delete {}", record.name);
        if !confirmer.confirm(&prompt) {
            debug!(id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let url = self.api.record_url(id)?;
        let mutation = self.mutations.begin(Operation::Delete, Some(id.to_string()));
        let outcome = self.session.run(self.api.delete(id)).await;

        match outcome {
            Ok(response) if response.is_success() => {
                self.records.remove(id);
                if self.editing.as_ref().is_some_and(|edit| edit.id == id) {
                    self.editing = None;
                    self.errors.clear();
                } else {
                    self.errors
                        .remove_record(id, self.columns.iter().map(|c| c.key.as_str()));
                }
                self.mutations.commit(mutation, None);
                info!(id, "record deleted");
                Ok(DeleteOutcome::Deleted(record))
            }
            Ok(response) => {
                let error = TabulaError::http_status(response.status, url);
                self.mutations.fail(mutation, error.to_string());
                self.report(Operation::Delete, Some(id), &error);
                Ok(DeleteOutcome::Rejected {
                    status: response.status,
                })
            }
            Err(e) => {
                self.mutations.fail(mutation, e.to_string());
                self.report(Operation::Delete, Some(id), &e);
                Err(e)
            }
        }
    }

    fn editable_column(&self, field: &str) -> TabulaResult<FieldDescriptor> {
        self.columns
            .iter()
            .find(|c| c.key == field && c.editable)
            .cloned()
            .ok_or_else(|| {
                TabulaError::invalid_input_field(
                    format!("'{}' is not an editable column", field),
                    field,
                )
            })
    }

    fn report(&self, operation: Operation, target: Option<&str>, error: &TabulaError) {
        if error.is_cancelled() {
            debug!(%operation, "result discarded after cancellation");
            return;
        }
        warn!(
            %operation,
            target = ?target,
            category = error.category(),
            error = %error,
            "operation failed"
        );
        // No subscribers is fine
        let _ = self.notices.send(Notice::new(
            operation,
            target.map(str::to_string),
            error.clone(),
        ));
    }
}

impl Drop for TableController {
    fn drop(&mut self) {
        self.session.cancel();
    }
}
