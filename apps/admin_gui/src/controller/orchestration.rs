//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker. On failure the reason is written to
/// `status` and `false` is returned; nothing is retried.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend worker disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::EmployeeId;

    #[test]
    fn reports_full_and_disconnected_queues() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();

        assert!(dispatch_backend_command(
            &tx,
            BackendCommand::DeleteEmployee { id: EmployeeId(1) },
            &mut status
        ));
        assert!(!dispatch_backend_command(
            &tx,
            BackendCommand::DeleteEmployee { id: EmployeeId(2) },
            &mut status
        ));
        assert!(status.contains("queue is full"));

        drop(rx);
        assert!(!dispatch_backend_command(
            &tx,
            BackendCommand::DeleteEmployee { id: EmployeeId(3) },
            &mut status
        ));
        assert!(status.contains("disconnected"));
    }
}
