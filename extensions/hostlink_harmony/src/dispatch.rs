//! Host task dispatch
//!
//! Host window and permission APIs complete asynchronously. Each outbound
//! request runs as a detached task on a tokio runtime; callers get the
//! `JoinHandle` back but are free to drop it.

use std::sync::Arc;

use hostlink_platform::Result;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Spawns host API calls without blocking the caller
#[derive(Clone)]
pub struct HostDispatcher {
    handle: Handle,
    /// Permission prompts are shown one at a time
    permission_gate: Arc<Mutex<()>>,
}

impl HostDispatcher {
    /// Dispatch onto the given runtime
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            permission_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Dispatch onto the runtime of the calling context, if any
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Run a host call; a failure is logged and dropped
    pub fn spawn<F>(&self, op: &'static str, call: F) -> JoinHandle<()>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        self.handle.spawn_blocking(move || match call() {
            Ok(()) => tracing::debug!(op, "host call completed"),
            Err(e) => tracing::warn!(op, error = %e, "host call failed"),
        })
    }

    /// Run a permission prompt after any earlier prompt has finished, then
    /// hand the outcome to `deliver`
    pub fn spawn_permission<F, D>(&self, permission: String, prompt: F, deliver: D) -> JoinHandle<()>
    where
        F: FnOnce(&str) -> Result<bool> + Send + 'static,
        D: FnOnce(bool) + Send + 'static,
    {
        let gate = Arc::clone(&self.permission_gate);
        self.handle.spawn(async move {
            let _pending = gate.lock().await;
            let name = permission.clone();
            let outcome = tokio::task::spawn_blocking(move || prompt(&name)).await;

            let granted = match outcome {
                Ok(Ok(granted)) => granted,
                Ok(Err(e)) => {
                    tracing::warn!(permission = %permission, error = %e, "permission request failed");
                    false
                }
                Err(e) => {
                    tracing::error!(permission = %permission, error = %e, "permission task aborted");
                    false
                }
            };
            tracing::info!(permission = %permission, granted, "permission result");
            deliver(granted);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostlink_platform::HostError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_call_is_swallowed() {
        let dispatcher = HostDispatcher::current().unwrap();
        let handle = dispatcher.spawn("set_title", || {
            Err(HostError::WindowLookup("no window".into()))
        });
        assert!(handle.await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_permission_errors_become_denied() {
        let dispatcher = HostDispatcher::current().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel();
        dispatcher
            .spawn_permission(
                "ohos.permission.MICROPHONE".into(),
                |name| Err(HostError::PermissionDenied(name.to_string())),
                move |granted| {
                    let _ = tx.send(granted);
                },
            )
            .await
            .unwrap();
        assert!(!rx.await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_permission_prompts_do_not_overlap() {
        let dispatcher = HostDispatcher::current().unwrap();
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let active = Arc::clone(&active);
                let peak = Arc::clone(&peak);
                dispatcher.spawn_permission(
                    format!("ohos.permission.TEST_{}", i),
                    move |_| {
                        let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        std::thread::sleep(std::time::Duration::from_millis(5));
                        active.fetch_sub(1, Ordering::SeqCst);
                        Ok(true)
                    },
                    |_| {},
                )
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }
}
