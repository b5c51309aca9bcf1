use std::sync::{Arc, Mutex};
use wasm_bindgen::JsCast;

/// Trailing debounce over `window.setTimeout`.
///
/// Every `schedule` replaces the pending callback and restarts the window. Clones share
/// the same timer, so a clone captured in an event handler can be canceled from
/// component cleanup.
#[derive(Clone, Debug)]
pub(crate) struct Debouncer {
    delay_ms: i32,
    timer_id: Arc<Mutex<Option<i32>>>,
}

impl Debouncer {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            timer_id: Arc::new(Mutex::new(None)),
        }
    }

    pub fn delay_ms(&self) -> i32 {
        self.delay_ms
    }

    pub fn is_pending(&self) -> bool {
        self.timer_id.lock().map(|t| t.is_some()).unwrap_or(false)
    }

    pub fn schedule(&self, f: impl FnOnce() + 'static) {
        self.cancel();

        let Some(win) = web_sys::window() else {
            return;
        };

        let timer_id = self.timer_id.clone();
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            if let Ok(mut t) = timer_id.lock() {
                *t = None;
            }
            f();
        });

        let tid = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                self.delay_ms,
            )
            .ok();

        if let Ok(mut t) = self.timer_id.lock() {
            *t = tid;
        }
    }

    pub fn cancel(&self) {
        let pending = self.timer_id.lock().ok().and_then(|mut t| t.take());
        let Some(tid) = pending else {
            return;
        };
        if let Some(win) = web_sys::window() {
            win.clear_timeout_with_handle(tid);
        }
    }
}
