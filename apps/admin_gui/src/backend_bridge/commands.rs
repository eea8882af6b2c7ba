//! Backend commands queued from UI to backend worker.

use shared::{
    domain::EmployeeId,
    protocol::{EmployeeListQuery, NewEmployee},
};

use crate::controller::events::RequestToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchEmployees {
        token: RequestToken,
        query: EmployeeListQuery,
    },
    CreateEmployee {
        employee: NewEmployee,
    },
    DeleteEmployee {
        id: EmployeeId,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchEmployees { .. } => "fetch_employees",
            BackendCommand::CreateEmployee { .. } => "create_employee",
            BackendCommand::DeleteEmployee { .. } => "delete_employee",
        }
    }
}
