use parking_lot::Once;
use std::{
    ops::ControlFlow,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tracing::warn;

use crate::traits::{AbortSignal, Status, Terminator};
static INIT: Once = Once::new();
static CTRL_C_PRESSED: AtomicBool = AtomicBool::new(false);

const ABORT_MESSAGE: &str = "Abort signal received";

/// A signal that is triggered when the user presses `Ctrl-C`.
/// <div class="warning">This signal takes over the `Ctrl-C` handler for the whole process and can interfere with
/// other libraries that use `Ctrl-C` (e.g. `tokio`).</div>
#[derive(Default)]
pub struct CtrlCAbortSignal;
impl CtrlCAbortSignal {
    /// Create a new `CtrlCAbortSignal` and register a ctrl-c handler.
    pub fn new() -> Self {
        let signal = Self {};
        signal.init_handler();
        signal
    }

    fn init_handler(&self) {
        INIT.call_once(|| {
            #[allow(clippy::expect_used)]
            ctrlc::set_handler(move || {
                warn!("Ctrl-C pressed, stopping after the current iteration");
                CTRL_C_PRESSED.store(true, Ordering::SeqCst);
            })
            .expect("Error setting Ctrl-C handler");
        });
    }
}

impl AbortSignal for CtrlCAbortSignal {
    fn is_aborted(&self) -> bool {
        CTRL_C_PRESSED.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        CTRL_C_PRESSED.store(true, Ordering::SeqCst)
    }

    fn reset(&self) {
        CTRL_C_PRESSED.store(false, Ordering::SeqCst);
    }
}

/// A signal that is triggered by setting an atomic boolean.
///
/// Clones share the same flag, so a clone can be handed to [`Callbacks`](crate::core::Callbacks)
/// while another one is kept to abort the run from elsewhere.
#[derive(Default, Clone, Debug)]
pub struct AtomicAbortSignal {
    abort: Arc<AtomicBool>,
}

impl AtomicAbortSignal {
    /// Create a new `AtomicAbortSignal`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AbortSignal for AtomicAbortSignal {
    fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }

    fn reset(&self) {
        self.abort.store(false, Ordering::SeqCst);
    }
}

fn check_signal<S: Status>(signal: &impl AbortSignal, status: &mut S) -> ControlFlow<()> {
    if signal.is_aborted() {
        status.update_message(ABORT_MESSAGE);
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

impl<A, S: Status> Terminator<A, S> for CtrlCAbortSignal {
    fn check_for_termination(
        &mut self,
        _current_step: usize,
        _algorithm: &mut A,
        status: &mut S,
    ) -> ControlFlow<()> {
        check_signal(&*self, status)
    }
}

impl<A, S: Status> Terminator<A, S> for AtomicAbortSignal {
    fn check_for_termination(
        &mut self,
        _current_step: usize,
        _algorithm: &mut A,
        status: &mut S,
    ) -> ControlFlow<()> {
        check_signal(&*self, status)
    }
}
