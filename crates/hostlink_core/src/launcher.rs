//! Native entry launcher
//!
//! The entry point blocks for the rest of the session, so it runs on its
//! own named thread. The launcher keeps the join handle only so teardown
//! code can check on it; the bridge never waits for it.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use hostlink_platform::NativeEngine;

use crate::error::{BridgeError, Result};

pub struct EntryLauncher {
    thread_name: String,
    handle: Option<JoinHandle<()>>,
    launched: bool,
}

impl EntryLauncher {
    pub fn new(thread_name: impl Into<String>) -> Self {
        Self {
            thread_name: thread_name.into(),
            handle: None,
            launched: false,
        }
    }

    /// Run `engine.entry(module_id, symbol)` on a new thread
    ///
    /// Fails with [`BridgeError::AlreadyLaunched`] on any second call, even
    /// after the first entry has returned.
    pub fn launch(
        &mut self,
        engine: Arc<dyn NativeEngine>,
        module_id: String,
        symbol: String,
    ) -> Result<()> {
        if self.launched {
            return Err(BridgeError::AlreadyLaunched);
        }

        tracing::info!(module = %module_id, symbol = %symbol, "launching native entry");
        let handle = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || {
                engine.entry(&module_id, &symbol);
                tracing::info!(module = %module_id, "native entry returned");
            })
            .map_err(BridgeError::EntryLaunch)?;

        self.handle = Some(handle);
        self.launched = true;
        Ok(())
    }

    pub fn is_launched(&self) -> bool {
        self.launched
    }

    /// Whether the entry thread has exited
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_some_and(JoinHandle::is_finished)
    }

    /// Wait for the entry thread. Returns `false` if it panicked or was
    /// never launched.
    pub fn join(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => match handle.join() {
                Ok(()) => true,
                Err(_) => {
                    tracing::error!("native entry thread panicked");
                    false
                }
            },
            None => false,
        }
    }

    /// Drop the join handle, leaving the entry thread detached
    pub fn detach(&mut self) {
        self.handle = None;
    }
}
