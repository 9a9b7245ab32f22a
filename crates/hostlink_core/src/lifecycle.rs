//! Lifecycle Bridge
//!
//! A three-state machine (`Uninitialized`, `Resumed`, `Paused`) driven by
//! host show/hide events. It decides when the native engine may start and
//! when it is paused or resumed:
//!
//! - The engine's entry point runs at most once, on the first transition
//!   into `Resumed`, and only after the resource manager and screen
//!   resolution have been bound.
//! - A resume requested before those resources arrive is held as the
//!   requested state and replayed by the bind that completes them.
//! - A pause requested before entry never reaches the engine; the
//!   [`PausePolicy`] decides whether it is dropped or replayed after entry.
//!
//! The bridge is mutated through `&mut self` only. Host lifecycle callbacks
//! are delivered serialized, so no locking is needed here; the entry point
//! itself runs on its own thread (see [`EntryLauncher`]).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hostlink_platform::{HostCallbacks, NativeEngine, ResourceManagerHandle, ScreenResolution};
use serde::{Deserialize, Serialize};

use crate::config::{BridgeConfig, EntryConfig};
use crate::error::Result;
use crate::launcher::EntryLauncher;
use crate::signals::{HostSignal, SignalRoute};

/// Number of state changes kept in [`LifecycleBridge::history`]
pub const HISTORY_LIMIT: usize = 64;

/// Lifecycle state of the hosted native session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Resumed,
    Paused,
}

/// What to do with a pause requested before the engine has been entered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PausePolicy {
    /// Drop the pause; the engine never hears about it
    #[default]
    Suppress,
    /// Remember the pause and replay it (pause, then resume) right after entry
    Defer,
}

/// Effect of a single [`LifecycleBridge::request_state`] call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Requested state equals the current one
    Unchanged,
    /// Moved back to `Uninitialized` without touching the engine
    Reset,
    /// Engine was told to pause
    Paused,
    /// Pause before entry, dropped under [`PausePolicy::Suppress`]
    PauseSuppressed,
    /// Pause before entry, held under [`PausePolicy::Defer`]
    PauseDeferred,
    /// Entry point was launched
    Started,
    /// Engine was told to resume
    Resumed,
    /// Resume is pending until resources are bound
    AwaitingResources,
}

#[derive(Clone, Debug, Default)]
struct ResourceBinding {
    cache_dir: Option<PathBuf>,
    resource_manager: Option<ResourceManagerHandle>,
    resolution: Option<ScreenResolution>,
}

impl ResourceBinding {
    fn is_complete(&self) -> bool {
        self.resource_manager.is_some() && self.resolution.is_some()
    }
}

/// The lifecycle bridge for one hosted native session
pub struct LifecycleBridge {
    engine: Arc<dyn NativeEngine>,
    callbacks: Arc<dyn HostCallbacks>,
    launcher: EntryLauncher,
    entry: EntryConfig,
    pause_policy: PausePolicy,
    current: LifecycleState,
    next: LifecycleState,
    resources: ResourceBinding,
    initialized: bool,
    entered: bool,
    pause_pending: bool,
    quit_sent: bool,
    /// Most recent state changes, oldest first (for debugging)
    history: Vec<(LifecycleState, LifecycleState)>,
}

impl LifecycleBridge {
    /// Create a bridge in the `Uninitialized` state
    pub fn new(
        engine: Arc<dyn NativeEngine>,
        callbacks: Arc<dyn HostCallbacks>,
        config: &BridgeConfig,
    ) -> Self {
        Self {
            engine,
            callbacks,
            launcher: EntryLauncher::new(config.entry.thread_name.clone()),
            entry: config.entry.clone(),
            pause_policy: config.lifecycle.pause_policy,
            current: LifecycleState::Uninitialized,
            next: LifecycleState::Uninitialized,
            resources: ResourceBinding::default(),
            initialized: false,
            entered: false,
            pause_pending: false,
            quit_sent: false,
            history: Vec::new(),
        }
    }

    /// Override the pause policy from the config
    pub fn with_pause_policy(mut self, policy: PausePolicy) -> Self {
        self.pause_policy = policy;
        self
    }

    /// Get the current state
    pub fn current_state(&self) -> LifecycleState {
        self.current
    }

    /// Get the most recently requested state
    pub fn requested_state(&self) -> LifecycleState {
        self.next
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: LifecycleState) -> bool {
        self.current == state
    }

    /// Whether the native entry point has been launched
    pub fn has_entered(&self) -> bool {
        self.entered
    }

    /// Whether both the resource manager and screen resolution are bound
    pub fn resources_bound(&self) -> bool {
        self.resources.is_complete()
    }

    /// Cache directory handed to the engine, once bound
    pub fn cache_dir(&self) -> Option<&Path> {
        self.resources.cache_dir.as_deref()
    }

    pub fn pause_policy(&self) -> PausePolicy {
        self.pause_policy
    }

    /// Get transition history, at most [`HISTORY_LIMIT`] entries
    pub fn history(&self) -> &[(LifecycleState, LifecycleState)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// The launcher holding the entry thread
    pub fn launcher(&self) -> &EntryLauncher {
        &self.launcher
    }

    pub fn launcher_mut(&mut self) -> &mut EntryLauncher {
        &mut self.launcher
    }

    /// Request a transition to `next`
    pub fn request_state(&mut self, next: LifecycleState) -> Result<TransitionOutcome> {
        self.next = next;

        if next == self.current {
            return Ok(TransitionOutcome::Unchanged);
        }

        match next {
            LifecycleState::Uninitialized => {
                self.set_current(next);
                Ok(TransitionOutcome::Reset)
            }
            LifecycleState::Paused => Ok(self.enter_paused()),
            LifecycleState::Resumed => self.enter_resumed(),
        }
    }

    /// Route a host signal to a transition or a one-way engine call
    ///
    /// Returns the transition outcome for `Show`/`Hide`, `None` for signals
    /// that are forwarded without touching the state machine.
    pub fn dispatch(&mut self, signal: HostSignal) -> Result<Option<TransitionOutcome>> {
        match signal.route() {
            SignalRoute::Transition(state) => self.request_state(state).map(Some),
            SignalRoute::Forward => {
                self.forward(signal);
                Ok(None)
            }
        }
    }

    /// Bind the resource manager. Replays a pending resume once the screen
    /// resolution is also bound.
    pub fn bind_resource_manager(
        &mut self,
        cache_dir: impl Into<PathBuf>,
        handle: ResourceManagerHandle,
    ) -> Result<Option<TransitionOutcome>> {
        let cache_dir = cache_dir.into();
        self.ensure_initialized();
        tracing::debug!(cache_dir = %cache_dir.display(), "binding resource manager");
        self.engine.set_resource_manager(&cache_dir, handle);
        self.resources.cache_dir = Some(cache_dir);
        self.resources.resource_manager = Some(handle);
        self.replay_pending_resume()
    }

    /// Bind the screen resolution. Replays a pending resume once the
    /// resource manager is also bound.
    pub fn bind_screen_resolution(
        &mut self,
        resolution: ScreenResolution,
    ) -> Result<Option<TransitionOutcome>> {
        self.ensure_initialized();
        tracing::debug!(?resolution, "binding screen resolution");
        self.engine.set_screen_resolution(resolution);
        self.resources.resolution = Some(resolution);
        self.replay_pending_resume()
    }

    /// Bind both resources the entry point depends on
    pub fn bind_resources(
        &mut self,
        cache_dir: impl Into<PathBuf>,
        handle: ResourceManagerHandle,
        resolution: ScreenResolution,
    ) -> Result<Option<TransitionOutcome>> {
        self.bind_resource_manager(cache_dir, handle)?;
        self.bind_screen_resolution(resolution)
    }

    fn enter_paused(&mut self) -> TransitionOutcome {
        let outcome = if self.entered {
            self.engine.pause();
            TransitionOutcome::Paused
        } else {
            match self.pause_policy {
                PausePolicy::Suppress => {
                    tracing::debug!("pause before native entry suppressed");
                    TransitionOutcome::PauseSuppressed
                }
                PausePolicy::Defer => {
                    tracing::debug!("pause before native entry deferred");
                    self.pause_pending = true;
                    TransitionOutcome::PauseDeferred
                }
            }
        };
        self.set_current(LifecycleState::Paused);
        outcome
    }

    fn enter_resumed(&mut self) -> Result<TransitionOutcome> {
        if self.entered {
            self.engine.resume();
            self.set_current(LifecycleState::Resumed);
            return Ok(TransitionOutcome::Resumed);
        }

        if !self.resources.is_complete() {
            tracing::info!(
                resource_manager = self.resources.resource_manager.is_some(),
                screen_resolution = self.resources.resolution.is_some(),
                "resume requested before resources were bound, holding native entry"
            );
            return Ok(TransitionOutcome::AwaitingResources);
        }

        self.ensure_initialized();
        self.launcher.launch(
            Arc::clone(&self.engine),
            self.entry.module.clone(),
            self.entry.symbol.clone(),
        )?;
        self.entered = true;

        if std::mem::take(&mut self.pause_pending) {
            tracing::debug!("replaying deferred pause");
            self.engine.pause();
            self.engine.resume();
        }

        self.set_current(LifecycleState::Resumed);
        Ok(TransitionOutcome::Started)
    }

    fn replay_pending_resume(&mut self) -> Result<Option<TransitionOutcome>> {
        if self.next == LifecycleState::Resumed
            && self.current != LifecycleState::Resumed
            && self.resources.is_complete()
        {
            return self.enter_resumed().map(Some);
        }
        Ok(None)
    }

    fn forward(&mut self, signal: HostSignal) {
        self.ensure_initialized();
        match signal {
            HostSignal::FocusChanged(focused) => self.engine.focus_changed(focused),
            HostSignal::KeyDown(code) => self.engine.key_down(code),
            HostSignal::KeyUp(code) => self.engine.key_up(code),
            HostSignal::KeyboardFocusLost => self.engine.keyboard_focus_lost(),
            HostSignal::SurfaceResized => self.engine.surface_resized(),
            HostSignal::TextInput { count, text } => self.engine.text_input(count, &text),
            HostSignal::OrientationChanged(orientation) => {
                self.engine.orientation_changed(orientation)
            }
            HostSignal::PermissionResult(granted) => self.engine.permission_result(granted),
            HostSignal::Quit => {
                if self.quit_sent {
                    tracing::debug!("quit already sent");
                    return;
                }
                tracing::info!("sending quit to native engine");
                self.quit_sent = true;
                self.engine.send_quit();
            }
            HostSignal::Show | HostSignal::Hide => {}
        }
    }

    fn ensure_initialized(&mut self) {
        if !self.initialized {
            self.initialized = true;
            self.engine.init(Arc::clone(&self.callbacks));
        }
    }

    fn set_current(&mut self, state: LifecycleState) {
        tracing::info!(from = ?self.current, to = ?state, "lifecycle transition");
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((self.current, state));
        self.current = state;
    }
}
