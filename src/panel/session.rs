//! One display operation on the panel, from power-up to sleep.
//!
//! ```text
//! Uninitialized -> Initialized -> Cleared -> Displaying -> Sleeping
//!        \              \             \           \
//!         +--------------+-------------+-----------+--> ForceShutdown
//! ```

use std::fmt;
use std::time::Duration;

use eink_render::QuantizedImage;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use super::{DeviceFault, PanelDriver};

/// Wait after pushing a frame before the panel may be put to sleep.
pub const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Exit status after an interrupt, as for a process killed by SIGINT.
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Uninitialized,
    Initialized,
    Cleared,
    /// Frame pushed, settle delay running
    Displaying,
    /// Normal end: panel in low-power hold
    Sleeping,
    /// Forced module exit after interruption or fault
    ForceShutdown,
}

/// Driver calls that move the session forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Init,
    Clear,
    Display,
    Sleep,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Init => "init",
            Operation::Clear => "clear",
            Operation::Display => "display",
            Operation::Sleep => "sleep",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PanelState {
    /// Sleeping and ForceShutdown end the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PanelState::Sleeping | PanelState::ForceShutdown)
    }

    /// Whether the controller has been powered up.
    pub fn is_initialized(&self) -> bool {
        !matches!(self, PanelState::Uninitialized)
    }

    /// State after `op` succeeds, or `None` if `op` is not allowed here.
    pub fn transition(self, op: Operation) -> Option<Self> {
        use Operation::*;
        use PanelState::*;

        match (self, op) {
            (Uninitialized, Init) => Some(Initialized),
            (Initialized, Clear) => Some(Cleared),
            (Cleared, Display) => Some(Displaying),
            (Displaying, Sleep) => Some(Sleeping),
            _ => None,
        }
    }
}

/// How a session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Frame shown, panel asleep.
    Completed,
    /// Cancelled; the panel was force-exited.
    Interrupted,
    /// The driver failed; the fault was logged and the panel force-exited.
    DeviceFault(DeviceFault),
}

impl SessionOutcome {
    /// Process exit status for this outcome.
    ///
    /// Device faults still exit 0 so a scheduled refresh keeps running.
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionOutcome::Completed | SessionOutcome::DeviceFault(_) => 0,
            SessionOutcome::Interrupted => INTERRUPTED_EXIT_CODE,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot {operation} while panel is {from:?}")]
    InvalidTransition {
        from: PanelState,
        operation: Operation,
    },

    #[error("Panel {operation} failed: {source}")]
    Device {
        operation: Operation,
        #[source]
        source: DeviceFault,
    },
}

/// Exclusive use of one panel for one frame.
///
/// The session owns its driver, so two sessions can never drive the same
/// panel. Dropping a session that was initialized but did not reach a
/// terminal state force-exits the driver.
///
/// Driver calls block. Run sessions from `spawn_blocking` or a plain
/// thread, never on an async worker.
pub struct PanelSession<D: PanelDriver> {
    driver: D,
    state: PanelState,
    cancel: CancellationToken,
    settle_delay: Duration,
}

impl<D: PanelDriver> PanelSession<D> {
    pub fn new(driver: D, cancel: CancellationToken) -> Self {
        Self {
            driver,
            state: PanelState::Uninitialized,
            cancel,
            settle_delay: SETTLE_DELAY,
        }
    }

    /// Override the settle delay (simulated panels and tests).
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn step(
        &mut self,
        op: Operation,
        call: impl FnOnce(&mut D) -> Result<(), DeviceFault>,
    ) -> Result<(), SessionError> {
        let next = self
            .state
            .transition(op)
            .ok_or(SessionError::InvalidTransition {
                from: self.state,
                operation: op,
            })?;

        call(&mut self.driver).map_err(|source| SessionError::Device {
            operation: op,
            source,
        })?;

        tracing::debug!(from = ?self.state, to = ?next, "Panel transition");
        self.state = next;
        Ok(())
    }

    pub fn init(&mut self) -> Result<(), SessionError> {
        self.step(Operation::Init, |d| d.init())
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.step(Operation::Clear, |d| d.clear())
    }

    /// Encode and push a frame. Does not wait for the settle delay.
    pub fn display(&mut self, image: &QuantizedImage) -> Result<(), SessionError> {
        self.step(Operation::Display, |d| {
            let frame = d.get_buffer(image)?;
            d.display(&frame)
        })
    }

    pub fn sleep(&mut self) -> Result<(), SessionError> {
        self.step(Operation::Sleep, |d| d.sleep())
    }

    /// Force-exit the driver with cleanup. No-op once terminal.
    pub fn force_shutdown(&mut self) {
        if self.state.is_terminal() {
            return;
        }

        tracing::warn!(state = ?self.state, "Forcing panel shutdown");
        if let Err(e) = self.driver.force_exit(true) {
            tracing::error!(%e, "Panel force exit failed");
        }
        self.state = PanelState::ForceShutdown;
    }

    /// Wait out the settle delay. Returns `true` if cancelled first.
    ///
    /// Uses the ambient runtime when there is one, else a throwaway
    /// current-thread runtime.
    fn settle(&self) -> Result<bool, SessionError> {
        let cancel = self.cancel.clone();
        let delay = self.settle_delay;
        let wait = async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => true,
                _ = tokio::time::sleep(delay) => false,
            }
        };

        match Handle::try_current() {
            Ok(handle) => Ok(handle.block_on(wait)),
            Err(_) => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
                    .map_err(|e| SessionError::Device {
                        operation: Operation::Display,
                        source: DeviceFault::Io(e),
                    })?;
                Ok(runtime.block_on(wait))
            }
        }
    }

    fn interrupted(&mut self) -> SessionOutcome {
        tracing::warn!(state = ?self.state, "Interrupted");
        self.force_shutdown();
        SessionOutcome::Interrupted
    }

    /// Run init, clear, display, settle and sleep for one frame.
    ///
    /// A token already cancelled on entry ends the session before `init`,
    /// so the driver is never touched.
    ///
    /// Device faults end the session with [`SessionOutcome::DeviceFault`]
    /// instead of an error. Only a session that is not fresh fails with
    /// [`SessionError::InvalidTransition`].
    pub fn run(mut self, image: &QuantizedImage) -> Result<SessionOutcome, SessionError> {
        match self.run_steps(image) {
            Ok(outcome) => Ok(outcome),
            Err(SessionError::Device { operation, source }) => {
                tracing::error!(%operation, error = %source, "Panel device fault");
                self.force_shutdown();
                Ok(SessionOutcome::DeviceFault(source))
            }
            Err(e) => Err(e),
        }
    }

    fn run_steps(&mut self, image: &QuantizedImage) -> Result<SessionOutcome, SessionError> {
        if self.state == PanelState::Uninitialized && self.cancel.is_cancelled() {
            tracing::warn!("Interrupted before panel init, leaving it powered down");
            return Ok(SessionOutcome::Interrupted);
        }

        self.init()?;
        if self.cancel.is_cancelled() {
            return Ok(self.interrupted());
        }

        self.clear()?;
        if self.cancel.is_cancelled() {
            return Ok(self.interrupted());
        }

        self.display(image)?;
        if self.settle()? {
            return Ok(self.interrupted());
        }

        self.sleep()?;
        tracing::info!("Frame displayed, panel asleep");
        Ok(SessionOutcome::Completed)
    }
}

impl<D: PanelDriver> Drop for PanelSession<D> {
    fn drop(&mut self) {
        if self.state.is_initialized() && !self.state.is_terminal() {
            self.force_shutdown();
        }
    }
}
