use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    domain::{AttendanceRecord, Employee, EmployeeId},
    error::ApiError,
    protocol::{
        AttendancePage, AttendanceQuery, DashboardSummary, EmployeeListQuery, EmployeePage,
        EmployeeStats, MarkAttendance, MaybeEnvelope, NewEmployee,
    },
};
use tracing::{debug, warn};

pub mod config;

pub use config::{load_settings, Settings};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Employee operations the admin console drives. `ApiClient` is the real
/// implementation; tests substitute in-memory backends.
#[async_trait]
pub trait EmployeeBackend: Send + Sync {
    async fn list_employees(&self, query: &EmployeeListQuery) -> ApiResult<EmployeePage>;
    async fn get_employee(&self, id: EmployeeId) -> ApiResult<Employee>;
    async fn create_employee(&self, employee: &NewEmployee) -> ApiResult<Employee>;
    async fn delete_employee(&self, id: EmployeeId) -> ApiResult<()>;
}

/// Thin JSON client over the HR REST backend. Each method is one HTTP call;
/// nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: config::normalize_api_url(&base_url.into()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            base_url: config::normalize_api_url(&settings.api_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(method = method.as_str(), path, "api request");
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    async fn execute(&self, request: RequestBuilder, path: &str) -> ApiResult<(u16, String)> {
        let response = request.send().await.map_err(|err| {
            warn!(path, "api transport failure: {err}");
            ApiError::transport(err)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::transport)?;

        if !(200..300).contains(&status) {
            let err = ApiError::from_response(status, &body);
            warn!(path, status, message = %err.message, "api request failed");
            return Err(err);
        }
        Ok((status, body))
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> ApiResult<T> {
        let (status, body) = self.execute(request, path).await?;
        serde_json::from_str(&body).map_err(|err| {
            warn!(path, status, "api response did not decode: {err}");
            ApiError::decode(status, err)
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.fetch_json(self.request(Method::GET, path), path).await
    }

    async fn get_json_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ApiResult<T> {
        self.fetch_json(self.request(Method::GET, path).query(query), path)
            .await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.fetch_json(self.request(Method::POST, path).json(body), path)
            .await
    }

    // Employees

    pub async fn list_employees(&self, query: &EmployeeListQuery) -> ApiResult<EmployeePage> {
        self.get_json_with_query("/employees", query).await
    }

    pub async fn get_employee(&self, id: EmployeeId) -> ApiResult<Employee> {
        let body: MaybeEnvelope<Employee> = self.get_json(&format!("/employees/{id}")).await?;
        Ok(body.into_inner())
    }

    pub async fn create_employee(&self, employee: &NewEmployee) -> ApiResult<Employee> {
        let body: MaybeEnvelope<Employee> = self.post_json("/employees", employee).await?;
        Ok(body.into_inner())
    }

    /// Permanent; the backend keeps no soft-deleted copy.
    pub async fn delete_employee(&self, id: EmployeeId) -> ApiResult<()> {
        let path = format!("/employees/{id}");
        self.execute(self.request(Method::DELETE, &path), &path)
            .await
            .map(|_| ())
    }

    pub async fn list_departments(&self) -> ApiResult<Vec<String>> {
        let body: MaybeEnvelope<Vec<String>> = self.get_json("/employees/departments").await?;
        Ok(body.into_inner())
    }

    pub async fn employee_stats(&self) -> ApiResult<EmployeeStats> {
        let body: MaybeEnvelope<EmployeeStats> = self.get_json("/employees/stats").await?;
        Ok(body.into_inner())
    }

    // Dashboard

    pub async fn dashboard(&self) -> ApiResult<DashboardSummary> {
        let body: MaybeEnvelope<DashboardSummary> = self.get_json("/dashboard").await?;
        Ok(body.into_inner())
    }

    // Attendance

    pub async fn list_attendance(&self, query: &AttendanceQuery) -> ApiResult<AttendancePage> {
        self.get_json_with_query("/attendance", query).await
    }

    pub async fn today_attendance(&self) -> ApiResult<Value> {
        self.get_json("/attendance/today").await
    }

    pub async fn attendance_summary(&self) -> ApiResult<Value> {
        self.get_json("/attendance/summary").await
    }

    pub async fn employee_attendance(
        &self,
        id: EmployeeId,
        query: &AttendanceQuery,
    ) -> ApiResult<AttendancePage> {
        self.get_json_with_query(&format!("/attendance/employee/{id}"), query)
            .await
    }

    pub async fn mark_attendance(&self, mark: &MarkAttendance) -> ApiResult<AttendanceRecord> {
        let body: MaybeEnvelope<AttendanceRecord> = self.post_json("/attendance", mark).await?;
        Ok(body.into_inner())
    }
}

#[async_trait]
impl EmployeeBackend for ApiClient {
    async fn list_employees(&self, query: &EmployeeListQuery) -> ApiResult<EmployeePage> {
        ApiClient::list_employees(self, query).await
    }

    async fn get_employee(&self, id: EmployeeId) -> ApiResult<Employee> {
        ApiClient::get_employee(self, id).await
    }

    async fn create_employee(&self, employee: &NewEmployee) -> ApiResult<Employee> {
        ApiClient::create_employee(self, employee).await
    }

    async fn delete_employee(&self, id: EmployeeId) -> ApiResult<()> {
        ApiClient::delete_employee(self, id).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
