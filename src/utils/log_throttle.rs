use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

#[derive(Debug)]
struct WindowState {
    window_started_at: Instant,
    suppressed: u64,
}

/// Windowed log suppression, keyed by caller-chosen strings. Owned by the
/// component doing the logging rather than living in global state, so two
/// contexts never share suppression windows.
#[derive(Default)]
pub struct LogThrottle {
    windows: Mutex<HashMap<String, WindowState>>,
}

impl LogThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some(suppressed_count)` when a log for `key` should be
    /// emitted, otherwise `None` and the event is counted as suppressed
    /// for the active window.
    pub fn should_emit(&self, key: &str, interval: Duration) -> Option<u64> {
        let mut map = self.windows.lock();
        let now = Instant::now();

        match map.get_mut(key) {
            Some(state) => {
                if now.duration_since(state.window_started_at) >= interval {
                    let suppressed = state.suppressed;
                    state.window_started_at = now;
                    state.suppressed = 0;
                    Some(suppressed)
                } else {
                    state.suppressed += 1;
                    None
                }
            }
            None => {
                map.insert(
                    key.to_string(),
                    WindowState {
                        window_started_at: now,
                        suppressed: 0,
                    },
                );
                Some(0)
            }
        }
    }
}
