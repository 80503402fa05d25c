//! Debounced text box state.
//!
//! Keystrokes echo locally at once and (re)start a quiet-period timer; only
//! when the timer runs out without further input does the value go out
//! through the change callback. Timers run on the ambient tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

pub type TextCallback = Arc<dyn Fn(String) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    Idle,
    Typing,
    Committed,
}

#[derive(Debug)]
struct InputState {
    value: String,
    // last value the owner is known to hold
    external: String,
    phase: InputPhase,
    keyboard_visible: bool,
}

pub struct SearchInput {
    state: Arc<Mutex<InputState>>,
    debounce: Duration,
    on_change: TextCallback,
    on_submit: Option<TextCallback>,
    pending: Option<JoinHandle<()>>,
}

impl SearchInput {
    pub fn new(initial: &str, debounce: Duration, on_change: TextCallback) -> Self {
        Self {
            state: Arc::new(Mutex::new(InputState {
                value: initial.to_string(),
                external: initial.to_string(),
                phase: InputPhase::Idle,
                keyboard_visible: false,
            })),
            debounce,
            on_change,
            on_submit: None,
            pending: None,
        }
    }

    pub fn with_submit(mut self, on_submit: TextCallback) -> Self {
        self.on_submit = Some(on_submit);
        self
    }

    pub fn value(&self) -> String {
        lock(&self.state).value.clone()
    }

    pub fn phase(&self) -> InputPhase {
        lock(&self.state).phase
    }

    pub fn keyboard_visible(&self) -> bool {
        lock(&self.state).keyboard_visible
    }

    pub fn focus(&mut self) {
        lock(&self.state).keyboard_visible = true;
    }

    /// A keystroke: echo now, commit after the quiet period.
    pub fn type_text(&mut self, text: &str) {
        {
            let mut state = lock(&self.state);
            state.value = text.to_string();
            state.phase = InputPhase::Typing;
        }
        self.cancel_pending();

        if self.debounce.is_zero() {
            self.commit_now();
            return;
        }

        let state = Arc::clone(&self.state);
        let on_change = Arc::clone(&self.on_change);
        let debounce = self.debounce;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let committed = {
                let mut state = lock(&state);
                state.phase = InputPhase::Committed;
                if state.value == state.external {
                    None
                } else {
                    state.external = state.value.clone();
                    Some(state.value.clone())
                }
            };
            if let Some(value) = committed {
                tracing::debug!(query = %value, "search text committed");
                on_change(value);
            }
        }));
    }

    /// The owner changed the value (e.g. a programmatic clear). Adopt it
    /// without echoing it back.
    pub fn set_external_value(&mut self, value: &str) {
        self.cancel_pending();
        let mut state = lock(&self.state);
        state.value = value.to_string();
        state.external = value.to_string();
        state.phase = InputPhase::Idle;
    }

    /// Return key: commit whatever is typed right away and drop the keyboard.
    pub fn submit(&mut self) -> String {
        lock(&self.state).keyboard_visible = false;
        let value = self.commit_now();
        if let Some(on_submit) = &self.on_submit {
            on_submit(value.clone());
        }
        value
    }

    pub fn clear(&mut self) {
        self.cancel_pending();
        {
            let mut state = lock(&self.state);
            state.value.clear();
            state.external.clear();
            state.phase = InputPhase::Committed;
        }
        (self.on_change)(String::new());
    }

    /// Picking a recent search behaves like typing it and committing at once.
    pub fn select_recent(&mut self, term: &str) {
        {
            let mut state = lock(&self.state);
            state.value = term.to_string();
        }
        self.commit_now();
    }

    fn commit_now(&mut self) -> String {
        self.cancel_pending();
        let value = {
            let mut state = lock(&self.state);
            state.external = state.value.clone();
            state.phase = InputPhase::Committed;
            state.value.clone()
        };
        (self.on_change)(value.clone());
        value
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchInput {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn lock(state: &Mutex<InputState>) -> MutexGuard<'_, InputState> {
    // the guarded data is plain strings and flags, still usable after a panic
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
