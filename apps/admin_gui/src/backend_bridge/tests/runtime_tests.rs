use super::*;

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use client_core::ApiResult;
use crossbeam_channel::bounded;
use shared::{
    domain::{Employee, EmployeeId},
    error::ApiError,
    protocol::{EmployeeListQuery, EmployeePage, NewEmployee},
};

use crate::controller::{events::RequestToken, EmployeeViewController};

#[derive(Default)]
struct InMemoryBackend {
    rows: Mutex<Vec<Employee>>,
}

impl InMemoryBackend {
    fn seeded(names: &[&str]) -> Self {
        let rows = names
            .iter()
            .enumerate()
            .map(|(idx, name)| employee(idx as i64 + 1, name))
            .collect();
        Self {
            rows: Mutex::new(rows),
        }
    }
}

fn employee(id: i64, name: &str) -> Employee {
    Employee {
        id: EmployeeId(id),
        name: name.to_string(),
        email: format!("{}@corp.io", name.to_lowercase()),
        department: "Engineering".to_string(),
        employee_id: format!("EMP-{id}"),
        joining_date: None,
        status: None,
    }
}

#[async_trait]
impl EmployeeBackend for InMemoryBackend {
    async fn list_employees(&self, query: &EmployeeListQuery) -> ApiResult<EmployeePage> {
        let rows = self.rows.lock().unwrap();
        let needle = query.search.as_deref().map(str::to_lowercase);
        let matching: Vec<Employee> = rows
            .iter()
            .filter(|e| {
                needle.as_deref().map_or(true, |n| {
                    e.name.to_lowercase().contains(n) || e.email.to_lowercase().contains(n)
                })
            })
            .cloned()
            .collect();
        let skip = (query.page.saturating_sub(1) * query.limit) as usize;
        Ok(EmployeePage {
            total: matching.len() as u64,
            data: matching
                .into_iter()
                .skip(skip)
                .take(query.limit as usize)
                .collect(),
        })
    }

    async fn get_employee(&self, id: EmployeeId) -> ApiResult<Employee> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ApiError::from_response(404, r#"{"detail":"Employee not found"}"#))
    }

    async fn create_employee(&self, new: &NewEmployee) -> ApiResult<Employee> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|e| e.email == new.email || e.employee_id == new.employee_id) {
            return Err(ApiError::from_response(
                400,
                r#"{"detail":"Employee ID or Email already exists"}"#,
            ));
        }
        let next = rows.iter().map(|e| e.id.0).max().unwrap_or(0) + 1;
        let created = Employee {
            id: EmployeeId(next),
            name: new.name.clone(),
            email: new.email.clone(),
            department: new.department.clone(),
            employee_id: new.employee_id.clone(),
            joining_date: None,
            status: None,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn delete_employee(&self, id: EmployeeId) -> ApiResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| e.id != id);
        if rows.len() == before {
            return Err(ApiError::from_response(404, r#"{"detail":"Employee not found"}"#));
        }
        Ok(())
    }
}

#[tokio::test]
async fn fetch_echoes_the_request_token() {
    let backend = InMemoryBackend::seeded(&["Ada", "Grace", "Alan"]);
    let event = execute_command(
        &backend,
        BackendCommand::FetchEmployees {
            token: RequestToken(9),
            query: EmployeeListQuery::new(1, 2, "a"),
        },
    )
    .await;

    let UiEvent::EmployeesLoaded { token, page } = event else {
        panic!("expected loaded event, got {event:?}");
    };
    assert_eq!(token, RequestToken(9));
    assert_eq!(page.total, 3);
    assert_eq!(page.data.len(), 2);
}

#[tokio::test]
async fn duplicate_create_becomes_create_failed() {
    let backend = InMemoryBackend::seeded(&["Ada"]);
    let event = execute_command(
        &backend,
        BackendCommand::CreateEmployee {
            employee: NewEmployee {
                name: "Ada Again".to_string(),
                email: "ada@corp.io".to_string(),
                department: "Ops".to_string(),
                employee_id: "EMP-77".to_string(),
            },
        },
    )
    .await;

    let UiEvent::CreateFailed(error) = event else {
        panic!("expected create failure, got {event:?}");
    };
    assert_eq!(error.message, "Employee ID or Email already exists");
    assert_eq!(error.status, Some(400));
}

#[tokio::test]
async fn deleting_unknown_employee_reports_not_found() {
    let backend = InMemoryBackend::default();
    let event = execute_command(&backend, BackendCommand::DeleteEmployee { id: EmployeeId(4) }).await;

    let UiEvent::DeleteFailed { id, error } = event else {
        panic!("expected delete failure, got {event:?}");
    };
    assert_eq!(id, EmployeeId(4));
    assert!(error.is_not_found());
}

fn next_event(ui_rx: &crossbeam_channel::Receiver<UiEvent>) -> UiEvent {
    loop {
        let event = ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("backend worker should answer");
        if !matches!(event, UiEvent::Info(_)) {
            return event;
        }
    }
}

#[test]
fn deleted_employee_is_gone_after_the_follow_up_fetch() {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(16);
    let backend = Arc::new(InMemoryBackend::seeded(&["Ada", "Grace"]));
    let worker = launch(cmd_rx, ui_tx, backend);

    let mut controller = EmployeeViewController::new(cmd_tx);
    controller.refresh();
    controller.apply_event(next_event(&ui_rx));
    assert_eq!(controller.employees().len(), 2);

    assert!(controller.request_delete_by_id(EmployeeId(2)));
    assert!(controller.confirm_delete());
    controller.apply_event(next_event(&ui_rx));
    assert!(controller.is_loading());

    controller.apply_event(next_event(&ui_rx));
    assert_eq!(controller.total(), 1);
    assert!(controller.employees().iter().all(|e| e.id != EmployeeId(2)));

    drop(controller);
    worker.join().expect("worker thread exits once the queue closes");
}

struct SlowDeletes {
    inner: InMemoryBackend,
    delay: Duration,
}

#[async_trait]
impl EmployeeBackend for SlowDeletes {
    async fn list_employees(&self, query: &EmployeeListQuery) -> ApiResult<EmployeePage> {
        self.inner.list_employees(query).await
    }

    async fn get_employee(&self, id: EmployeeId) -> ApiResult<Employee> {
        self.inner.get_employee(id).await
    }

    async fn create_employee(&self, new: &NewEmployee) -> ApiResult<Employee> {
        self.inner.create_employee(new).await
    }

    async fn delete_employee(&self, id: EmployeeId) -> ApiResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.delete_employee(id).await
    }
}

#[test]
fn closing_the_queue_finishes_in_flight_mutations() {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(16);
    let backend = Arc::new(SlowDeletes {
        inner: InMemoryBackend::seeded(&["Ada", "Grace"]),
        delay: Duration::from_millis(200),
    });
    let worker = launch(cmd_rx, ui_tx, backend.clone());

    cmd_tx
        .send(BackendCommand::DeleteEmployee { id: EmployeeId(1) })
        .expect("queue open");
    drop(cmd_tx);
    worker.join().expect("worker thread exits once the queue closes");

    let events: Vec<UiEvent> = ui_rx.try_iter().collect();
    assert!(events
        .iter()
        .any(|event| matches!(event, UiEvent::EmployeeDeleted(EmployeeId(1)))));
    let remaining = backend.inner.rows.lock().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, EmployeeId(2));
}
