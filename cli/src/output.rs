use colored::*;
use finwall_core::AuthSession;
use serde_json::Value;

/// Pretty-print a JSON value to stdout
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

/// Confirmation after login or registration
pub fn print_session_started(session: &AuthSession) {
    println!(
        "{} {}",
        "Logged in as".green().bold(),
        user_label(&session.user)
    );
    if let Some(name) = session.current_organization.get("name").and_then(Value::as_str) {
        println!("  {} {}", "Organization:".cyan(), name);
    }
}

/// Stored session summary for `finwall status`
pub fn print_status(logged_in: bool, user: Option<&Value>, organization: Option<&Value>) {
    if !logged_in {
        println!("{}", "Not logged in".yellow());
        return;
    }

    println!("{}", "Logged in".green().bold());
    if let Some(user) = user {
        println!("  {} {}", "User:".cyan(), user_label(user));
    }
    if let Some(organization) = organization {
        let name = organization
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("(unnamed)");
        match organization.get("role").and_then(Value::as_str) {
            Some(role) => println!("  {} {} ({})", "Organization:".cyan(), name, role),
            None => println!("  {} {}", "Organization:".cyan(), name),
        }
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}

/// "Full Name <email>" when available, falling back to whatever identifies the user
pub fn user_label(user: &Value) -> String {
    let email = user.get("email").and_then(Value::as_str);
    let name = user.get("full_name").and_then(Value::as_str);
    match (name, email) {
        (Some(name), Some(email)) => format!("{} <{}>", name, email),
        (None, Some(email)) => email.to_string(),
        (Some(name), None) => name.to_string(),
        (None, None) => user
            .get("id")
            .map(|id| id.to_string())
            .unwrap_or_else(|| "(unknown user)".to_string()),
    }
}
