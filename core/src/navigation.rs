//! Redirect hook invoked when the session ends.
//!
//! A browser front end jumps to its login page; other front ends decide for
//! themselves what "go to the login view" means.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

/// Receives redirect requests from the gateway and the session manager
pub trait Navigator: Send + Sync + Debug {
    /// Send the user to `target` (the configured login view)
    fn redirect(&self, target: &str);
}

/// Type alias for Arc-wrapped Navigator trait objects
pub type NavigatorRef = Arc<dyn Navigator>;

/// Navigator that ignores redirects
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect(&self, _target: &str) {}
}

/// Navigator that remembers every redirect target, in order
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    targets: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redirect targets seen so far
    pub fn targets(&self) -> Vec<String> {
        self.targets
            .lock()
            .map(|targets| targets.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, target: &str) {
        if let Ok(mut targets) = self.targets.lock() {
            targets.push(target.to_string());
        }
    }
}
