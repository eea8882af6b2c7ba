//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::EmployeeBackend;
use crossbeam_channel::{Receiver, Sender};
use tokio::task::{JoinError, JoinSet};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker on its own thread. Commands are executed
/// concurrently; each produces exactly one `UiEvent`.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    backend: Arc<dyn EmployeeBackend>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            let mut in_flight = JoinSet::new();
            while let Ok(cmd) = cmd_rx.recv() {
                while let Some(done) = in_flight.try_join_next() {
                    log_task_outcome(done);
                }

                let backend = Arc::clone(&backend);
                let ui_tx = ui_tx.clone();
                in_flight.spawn(async move {
                    let name = cmd.name();
                    let event = execute_command(backend.as_ref(), cmd).await;
                    if ui_tx.send(event).is_err() {
                        tracing::debug!(command = name, "ui went away before result delivery");
                    }
                });
            }

            tracing::info!(
                pending = in_flight.len(),
                "command queue closed; finishing in-flight commands"
            );
            while let Some(done) = in_flight.join_next().await {
                log_task_outcome(done);
            }
            tracing::info!("backend worker stopped");
        });
    })
}

fn log_task_outcome(done: Result<(), JoinError>) {
    if let Err(err) = done {
        tracing::error!("backend command task failed: {err}");
    }
}

pub async fn execute_command(backend: &dyn EmployeeBackend, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::FetchEmployees { token, query } => {
            match backend.list_employees(&query).await {
                Ok(page) => UiEvent::EmployeesLoaded { token, page },
                Err(error) => {
                    tracing::warn!(token = token.0, "employee list failed: {error}");
                    UiEvent::EmployeesFailed { token, error }
                }
            }
        }
        BackendCommand::CreateEmployee { employee } => {
            match backend.create_employee(&employee).await {
                Ok(created) => UiEvent::EmployeeCreated(created),
                Err(error) => {
                    tracing::warn!("create employee failed: {error}");
                    UiEvent::CreateFailed(error)
                }
            }
        }
        BackendCommand::DeleteEmployee { id } => match backend.delete_employee(id).await {
            Ok(()) => UiEvent::EmployeeDeleted(id),
            Err(error) => {
                tracing::warn!(%id, "delete employee failed: {error}");
                UiEvent::DeleteFailed { id, error }
            }
        },
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
