//! Finite view states for the employee screen: list lifecycle, modal, and toast.

use std::time::{Duration, Instant};

use shared::{domain::Employee, form::AddEmployeeForm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    /// `initial` is set until the first response arrives; the list is then
    /// replaced by a full-page indicator instead of staying visible.
    Loading { initial: bool },
    Ready,
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    AddEmployee {
        form: AddEmployeeForm,
        submission: Submission,
    },
    ConfirmDelete {
        target: Employee,
        submission: Submission,
    },
}

impl ModalState {
    pub fn submission(&self) -> Option<Submission> {
        match self {
            ModalState::Closed => None,
            ModalState::AddEmployee { submission, .. }
            | ModalState::ConfirmDelete { submission, .. } => Some(*submission),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submission() == Some(Submission::Submitting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastSeverity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: ToastSeverity,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: ToastSeverity, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            severity,
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    NoEmployeesYet,
    NoResults,
}

impl EmptyKind {
    pub fn title(self) -> &'static str {
        match self {
            EmptyKind::NoEmployeesYet => "No employees yet",
            EmptyKind::NoResults => "No employees found",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EmptyKind::NoEmployeesYet => "Get started by adding your first employee",
            EmptyKind::NoResults => "Try adjusting your search terms",
        }
    }

    pub fn action_label(self) -> Option<&'static str> {
        match self {
            EmptyKind::NoEmployeesYet => Some("Add Employee"),
            EmptyKind::NoResults => None,
        }
    }
}

/// What the list area shows right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScreen<'a> {
    FullPageLoading,
    Error { message: &'a str },
    Empty(EmptyKind),
    Table(&'a [Employee]),
}
