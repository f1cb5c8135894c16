//! A recording panel driver with fault and interrupt injection.

use std::sync::{Arc, Mutex};

use inkframe::panel::{DeviceFault, Framebuffer, Operation, PanelDriver};
use tokio_util::sync::CancellationToken;

/// One driver call as seen by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init,
    Clear,
    Display { bytes: usize },
    Sleep,
    ForceExit { cleanup: bool },
}

/// Shared view of the calls a [`FakePanel`] received.
///
/// The session owns the driver, so tests keep this handle instead.
#[derive(Debug, Clone, Default)]
pub struct PanelLog {
    calls: Arc<Mutex<Vec<Call>>>,
    frames: Arc<Mutex<Vec<Framebuffer>>>,
}

impl PanelLog {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_frame(&self) -> Option<Framebuffer> {
        self.frames.lock().unwrap().last().cloned()
    }

    pub fn saw(&self, call: &Call) -> bool {
        self.calls().contains(call)
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[derive(Debug, Default)]
pub struct FakePanel {
    log: PanelLog,
    fail_on: Option<Operation>,
    cancel_after: Option<(Operation, CancellationToken)>,
}

impl FakePanel {
    pub fn new() -> (Self, PanelLog) {
        let panel = Self::default();
        let log = panel.log.clone();
        (panel, log)
    }

    /// Fail `op` with an I/O fault.
    pub fn failing_on(mut self, op: Operation) -> Self {
        self.fail_on = Some(op);
        self
    }

    /// Cancel `token` right after `op` succeeds, like a Ctrl-C arriving then.
    pub fn cancelling_after(mut self, op: Operation, token: CancellationToken) -> Self {
        self.cancel_after = Some((op, token));
        self
    }

    fn call(&mut self, op: Operation, call: Call) -> Result<(), DeviceFault> {
        self.log.push(call);
        if self.fail_on == Some(op) {
            return Err(DeviceFault::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                format!("injected {op} fault"),
            )));
        }
        if let Some((after, token)) = &self.cancel_after {
            if *after == op {
                token.cancel();
            }
        }
        Ok(())
    }
}

impl PanelDriver for FakePanel {
    fn init(&mut self) -> Result<(), DeviceFault> {
        self.call(Operation::Init, Call::Init)
    }

    fn clear(&mut self) -> Result<(), DeviceFault> {
        self.call(Operation::Clear, Call::Clear)
    }

    fn display(&mut self, frame: &Framebuffer) -> Result<(), DeviceFault> {
        self.log.frames.lock().unwrap().push(frame.clone());
        self.call(Operation::Display, Call::Display { bytes: frame.len() })
    }

    fn sleep(&mut self) -> Result<(), DeviceFault> {
        self.call(Operation::Sleep, Call::Sleep)
    }

    fn force_exit(&mut self, cleanup: bool) -> Result<(), DeviceFault> {
        self.log.push(Call::ForceExit { cleanup });
        Ok(())
    }
}
