//! Backend->UI events and error modeling for the employee admin controller.

use shared::{
    domain::{Employee, EmployeeId},
    error::{ApiError, ErrorKind},
    protocol::EmployeePage,
};

/// Tags a list fetch so that only the most recent response is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    EmployeesLoaded {
        token: RequestToken,
        page: EmployeePage,
    },
    EmployeesFailed {
        token: RequestToken,
        error: ApiError,
    },
    EmployeeCreated(Employee),
    CreateFailed(ApiError),
    EmployeeDeleted(EmployeeId),
    DeleteFailed {
        id: EmployeeId,
        error: ApiError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Rejected,
    Server,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadEmployees,
    CreateEmployee,
    DeleteEmployee,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context,
            message: message.into(),
        }
    }

    pub fn from_api(context: UiErrorContext, error: &ApiError) -> Self {
        let category = match (error.kind, error.status) {
            (ErrorKind::Transport, _) => UiErrorCategory::Transport,
            (ErrorKind::Decode, _) => UiErrorCategory::Server,
            (ErrorKind::Http, Some(status)) if (400..500).contains(&status) => {
                UiErrorCategory::Rejected
            }
            (ErrorKind::Http, Some(_)) => UiErrorCategory::Server,
            (ErrorKind::Http, None) => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: error.message.clone(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn headline(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Transport => "Server unreachable",
            UiErrorCategory::Rejected => "Request rejected",
            UiErrorCategory::Server => "Server error",
            UiErrorCategory::Unknown => "Something went wrong",
        }
    }
}
