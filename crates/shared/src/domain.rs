use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(EmployeeId);
id_newtype!(AttendanceId);

/// An employee record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(alias = "full_name", alias = "fullName")]
    pub name: String,
    pub email: String,
    pub department: String,
    /// Externally-assigned identifier, distinct from the database `id`.
    #[serde(alias = "employeeId")]
    pub employee_id: String,
    #[serde(
        default,
        alias = "created_at",
        skip_serializing_if = "Option::is_none"
    )]
    pub joining_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Employee {
    /// Calendar date the employee joined, when the backend reported a parseable timestamp.
    pub fn joined_on(&self) -> Option<NaiveDate> {
        self.joining_date.as_deref().and_then(parse_backend_date)
    }

    /// Single uppercase letter used as the row avatar.
    pub fn initial(&self) -> char {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('E')
    }
}

/// Accepts RFC 3339 timestamps, naive ISO timestamps, and bare dates.
pub fn parse_backend_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(ts.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            other => Err(format!("unknown attendance status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEmployee {
    pub name: String,
    #[serde(
        rename = "employeeId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub employee_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<AttendanceEmployee>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(name: &str, joining_date: Option<&str>) -> Employee {
        Employee {
            id: EmployeeId(1),
            name: name.to_string(),
            email: "a@b.io".to_string(),
            department: "Ops".to_string(),
            employee_id: "EMP-1".to_string(),
            joining_date: joining_date.map(str::to_string),
            status: None,
        }
    }

    #[test]
    fn joined_on_accepts_offset_and_naive_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(
            employee("x", Some("2024-03-09T10:11:12.123456+00:00")).joined_on(),
            expected
        );
        assert_eq!(
            employee("x", Some("2024-03-09T10:11:12")).joined_on(),
            expected
        );
        assert_eq!(employee("x", Some("2024-03-09")).joined_on(), expected);
        assert_eq!(employee("x", Some("not a date")).joined_on(), None);
        assert_eq!(employee("x", None).joined_on(), None);
    }

    #[test]
    fn initial_falls_back_for_blank_names() {
        assert_eq!(employee("  jane", None).initial(), 'J');
        assert_eq!(employee("   ", None).initial(), 'E');
    }

    #[test]
    fn deserializes_backend_list_row() {
        let raw = serde_json::json!({
            "id": 4,
            "employee_id": "EMP-4",
            "name": "Dana",
            "email": "dana@corp.io",
            "department": "Finance",
            "joining_date": null,
            "status": "Active"
        });
        let parsed: Employee = serde_json::from_value(raw).expect("employee");
        assert_eq!(parsed.id, EmployeeId(4));
        assert_eq!(parsed.employee_id, "EMP-4");
        assert_eq!(parsed.joining_date, None);
    }
}
