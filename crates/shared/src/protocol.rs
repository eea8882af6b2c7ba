use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{AttendanceRecord, AttendanceStatus, Employee, EmployeeId};

/// Rows per page in the employee list.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Backend responses are usually `{ success, data }`; a few endpoints answer bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaybeEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> MaybeEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            MaybeEnvelope::Wrapped { data } => data,
            MaybeEnvelope::Bare(data) => data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl EmployeeListQuery {
    /// Blank search terms are dropped rather than sent as `search=`.
    pub fn new(page: u32, limit: u32, search: &str) -> Self {
        let search = search.trim();
        Self {
            page: page.max(1),
            limit,
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePage {
    #[serde(default)]
    pub data: Vec<Employee>,
    #[serde(default)]
    pub total: u64,
}

/// Creation payload in backend vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
    #[serde(rename = "employeeId")]
    pub employee_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    pub total_employees: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: u64,
    pub present_today: u64,
    pub absent_today: u64,
    pub not_marked: u64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentAttendance {
    pub id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub employee: PersonRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEmployee {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    #[serde(default)]
    pub departments: Vec<DepartmentCount>,
    #[serde(default)]
    pub recent_attendance: Vec<RecentAttendance>,
    #[serde(default)]
    pub recent_employees: Vec<RecentEmployee>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct AttendanceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePage {
    #[serde(default)]
    pub data: Vec<AttendanceRecord>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendance {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
