use colored::*;
use finwall_core::Navigator;

/// Terminal stand-in for the login page: tells the user how to start a session
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn redirect(&self, _target: &str) {
        eprintln!(
            "{} {}",
            "No active session.".yellow(),
            "Run `finwall login --email <EMAIL>` to log in."
        );
    }
}
