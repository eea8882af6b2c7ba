//! Employee screen controller: owns search/pagination state, the list
//! lifecycle, the add/delete modals, and the toast. All backend work goes out
//! as `BackendCommand`s and comes back through `apply_event`.

use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use crossbeam_channel::Sender;
use shared::{
    domain::{Employee, EmployeeId},
    form::{AddEmployeeForm, FormField},
    protocol::{EmployeeListQuery, DEFAULT_PAGE_SIZE},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{RequestToken, UiError, UiErrorContext, UiEvent},
    orchestration::dispatch_backend_command,
    view_state::{EmptyKind, ListPhase, ListScreen, ModalState, Submission, Toast, ToastSeverity},
};

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(4000);

pub struct EmployeeViewController {
    cmd_tx: Sender<BackendCommand>,
    page_size: u32,
    toast_ttl: Duration,
    search: String,
    page: u32,
    employees: Vec<Employee>,
    total: u64,
    list: ListPhase,
    loaded_once: bool,
    next_token: u64,
    latest_token: Option<RequestToken>,
    modal: ModalState,
    // In-flight mutations outlive the modal that started them.
    pending_create: bool,
    pending_deletes: HashSet<EmployeeId>,
    toast: Option<Toast>,
    status: String,
}

impl EmployeeViewController {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self::with_options(cmd_tx, DEFAULT_PAGE_SIZE, DEFAULT_TOAST_TTL)
    }

    pub fn with_options(cmd_tx: Sender<BackendCommand>, page_size: u32, toast_ttl: Duration) -> Self {
        Self {
            cmd_tx,
            page_size: page_size.max(1),
            toast_ttl,
            search: String::new(),
            page: 1,
            employees: Vec::new(),
            total: 0,
            list: ListPhase::Loading { initial: true },
            loaded_once: false,
            next_token: 0,
            latest_token: None,
            modal: ModalState::Closed,
            pending_create: false,
            pending_deletes: HashSet::new(),
            toast: None,
            status: String::new(),
        }
    }

    // Queries

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn list_phase(&self) -> &ListPhase {
        &self.list
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.list, ListPhase::Loading { .. })
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn page_count(&self) -> u32 {
        page_count(self.total, self.page_size)
    }

    /// 1-based inclusive range of rows on the current page, `None` when empty.
    pub fn showing_range(&self) -> Option<(u64, u64)> {
        if self.employees.is_empty() {
            return None;
        }
        let start = u64::from(self.page - 1) * u64::from(self.page_size) + 1;
        Some((start, start + self.employees.len() as u64 - 1))
    }

    pub fn screen(&self) -> ListScreen<'_> {
        match &self.list {
            ListPhase::Loading { initial: true } => ListScreen::FullPageLoading,
            ListPhase::Failed { message } => ListScreen::Error {
                message: message.as_str(),
            },
            _ if self.employees.is_empty() => {
                if self.search_active() {
                    ListScreen::Empty(EmptyKind::NoResults)
                } else {
                    ListScreen::Empty(EmptyKind::NoEmployeesYet)
                }
            }
            _ => ListScreen::Table(&self.employees),
        }
    }

    fn search_active(&self) -> bool {
        !self.search.trim().is_empty()
    }

    // List lifecycle

    /// Fetches the current page; any response to an earlier fetch is ignored
    /// from now on.
    pub fn refresh(&mut self) {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.latest_token = Some(token);
        self.list = ListPhase::Loading {
            initial: !self.loaded_once || self.employees.is_empty(),
        };

        let query = EmployeeListQuery::new(self.page, self.page_size, &self.search);
        tracing::debug!(token = token.0, page = self.page, search = ?query.search, "fetching employees");
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchEmployees { token, query },
            &mut self.status,
        ) {
            self.latest_token = None;
            self.list = ListPhase::Failed {
                message: self.status.clone(),
            };
        }
    }

    pub fn retry(&mut self) {
        self.refresh();
    }

    /// A changed term always returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.search {
            return;
        }
        self.search = term;
        self.page = 1;
        self.refresh();
    }

    /// Moves to `page` when it lies within `1..=page_count`. Returns whether a
    /// fetch was issued.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        let last = self.page_count().max(1);
        if page == 0 || page > last || page == self.page {
            return false;
        }
        self.page = page;
        self.refresh();
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_sub(1))
    }

    // Add flow

    pub fn is_create_pending(&self) -> bool {
        self.pending_create
    }

    pub fn is_delete_pending(&self, id: EmployeeId) -> bool {
        self.pending_deletes.contains(&id)
    }

    /// Reopening while a create is still in flight shows the form locked.
    pub fn open_add_form(&mut self) {
        if self.modal.is_submitting() {
            return;
        }
        self.modal = ModalState::AddEmployee {
            form: AddEmployeeForm::default(),
            submission: submission_for(self.pending_create),
        };
    }

    pub fn set_form_field(&mut self, field: FormField, value: impl Into<String>) {
        if let ModalState::AddEmployee {
            form,
            submission: Submission::Idle,
        } = &mut self.modal
        {
            form.set(field, value);
        }
    }

    /// Validates and, when valid, queues the create. Returns whether a create
    /// was queued.
    pub fn submit_add_form(&mut self) -> bool {
        let ModalState::AddEmployee { form, submission } = &mut self.modal else {
            return false;
        };
        if *submission != Submission::Idle || self.pending_create {
            return false;
        }
        let Some(employee) = form.validate() else {
            return false;
        };

        *submission = Submission::Submitting;
        if dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::CreateEmployee { employee },
            &mut self.status,
        ) {
            self.pending_create = true;
            return true;
        }

        *submission = Submission::Idle;
        let message = self.status.clone();
        self.show_toast(message, ToastSeverity::Error);
        false
    }

    // Delete flow

    pub fn request_delete(&mut self, employee: &Employee) {
        if self.modal.is_submitting() {
            return;
        }
        self.modal = ModalState::ConfirmDelete {
            target: employee.clone(),
            submission: submission_for(self.pending_deletes.contains(&employee.id)),
        };
    }

    pub fn request_delete_by_id(&mut self, id: EmployeeId) -> bool {
        let Some(employee) = self.employees.iter().find(|e| e.id == id).cloned() else {
            return false;
        };
        self.request_delete(&employee);
        true
    }

    pub fn confirm_delete(&mut self) -> bool {
        let ModalState::ConfirmDelete { target, submission } = &mut self.modal else {
            return false;
        };
        if *submission != Submission::Idle || self.pending_deletes.contains(&target.id) {
            return false;
        }

        *submission = Submission::Submitting;
        if dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::DeleteEmployee { id: target.id },
            &mut self.status,
        ) {
            self.pending_deletes.insert(target.id);
            return true;
        }

        *submission = Submission::Idle;
        let message = self.status.clone();
        self.show_toast(message, ToastSeverity::Error);
        false
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    // Toast

    fn show_toast(&mut self, message: impl Into<String>, severity: ToastSeverity) {
        self.toast = Some(Toast::new(message, severity, self.toast_ttl));
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// Drops the toast once its delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.is_expired(now)) {
            self.toast = None;
        }
    }

    // Backend events

    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => {
                self.note_failure(&err);
                if self.is_loading() {
                    self.latest_token = None;
                    self.list = ListPhase::Failed {
                        message: err.message().to_string(),
                    };
                }
            }
            UiEvent::EmployeesLoaded { token, page } => {
                if !self.is_current(token) {
                    return;
                }
                self.employees = page.data;
                self.total = page.total;
                self.list = ListPhase::Ready;
                self.loaded_once = true;
            }
            UiEvent::EmployeesFailed { token, error } => {
                if !self.is_current(token) {
                    return;
                }
                self.note_failure(&UiError::from_api(UiErrorContext::LoadEmployees, &error));
                self.list = ListPhase::Failed {
                    message: error.message,
                };
            }
            UiEvent::EmployeeCreated(employee) => {
                tracing::info!(id = %employee.id, "employee created");
                self.pending_create = false;
                // A form reopened after submitting is locked, so nothing typed is lost.
                if matches!(
                    self.modal,
                    ModalState::AddEmployee {
                        submission: Submission::Submitting,
                        ..
                    }
                ) {
                    self.modal = ModalState::Closed;
                }
                self.show_toast("Employee added successfully!", ToastSeverity::Success);
                self.refresh();
            }
            UiEvent::CreateFailed(error) => {
                self.pending_create = false;
                self.note_failure(&UiError::from_api(UiErrorContext::CreateEmployee, &error));
                if let ModalState::AddEmployee { submission, .. } = &mut self.modal {
                    *submission = Submission::Idle;
                }
                self.show_toast(error.message_or("Failed to add employee"), ToastSeverity::Error);
            }
            UiEvent::EmployeeDeleted(id) => {
                tracing::info!(%id, "employee deleted");
                self.pending_deletes.remove(&id);
                if matches!(&self.modal, ModalState::ConfirmDelete { target, .. } if target.id == id) {
                    self.modal = ModalState::Closed;
                }
                self.show_toast("Employee deleted permanently!", ToastSeverity::Success);
                self.refresh();
            }
            UiEvent::DeleteFailed { id, error } => {
                self.pending_deletes.remove(&id);
                self.note_failure(&UiError::from_api(UiErrorContext::DeleteEmployee, &error));
                if let ModalState::ConfirmDelete { target, submission } = &mut self.modal {
                    if target.id == id {
                        *submission = Submission::Idle;
                    }
                }
                self.show_toast(
                    error.message_or("Failed to delete employee"),
                    ToastSeverity::Error,
                );
            }
        }
    }

    fn note_failure(&mut self, err: &UiError) {
        tracing::warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
        self.status = format!("{}: {}", err.headline(), err.message());
    }

    fn is_current(&self, token: RequestToken) -> bool {
        if self.latest_token == Some(token) {
            return true;
        }
        tracing::debug!(token = token.0, latest = ?self.latest_token, "discarding stale employee list response");
        false
    }
}

fn submission_for(pending: bool) -> Submission {
    if pending {
        Submission::Submitting
    } else {
        Submission::Idle
    }
}

pub fn page_count(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(u64::from(page_size.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "tests/employees_tests.rs"]
mod tests;
