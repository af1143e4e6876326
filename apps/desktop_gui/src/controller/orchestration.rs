//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the worker. Returns `false` and updates `status` when the
/// command could not be queued.
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
            *status = "Backend worker disconnected; restart the application".to_string();
            tracing::error!(command = cmd_name, "backend worker is gone");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn queues_command_when_worker_is_listening() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();

        assert!(dispatch_backend_command(
            &tx,
            BackendCommand::CheckHealth,
            &mut status
        ));
        assert!(matches!(rx.try_recv(), Ok(BackendCommand::CheckHealth)));
        assert!(status.is_empty());
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        assert!(dispatch_backend_command(
            &tx,
            BackendCommand::CheckHealth,
            &mut status
        ));

        assert!(!dispatch_backend_command(
            &tx,
            BackendCommand::CheckHealth,
            &mut status
        ));
        assert!(status.contains("queue is full"));
    }

    #[test]
    fn reports_disconnected_worker() {
        let (tx, rx) = bounded::<BackendCommand>(1);
        drop(rx);
        let mut status = String::new();

        assert!(!dispatch_backend_command(
            &tx,
            BackendCommand::CheckHealth,
            &mut status
        ));
        assert!(status.contains("disconnected"));
    }
}
