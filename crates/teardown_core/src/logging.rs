//! Structured JSON-line logging on stderr.

use serde_json::{json, Value};

pub fn log_info(component: &str, event: &str, details: Value) {
    emit("info", component, event, details);
}

pub fn log_warn(component: &str, event: &str, details: Value) {
    emit("warn", component, event, details);
}

pub fn log_error(component: &str, event: &str, details: Value) {
    emit("error", component, event, details);
}

fn emit(level: &str, component: &str, event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": component,
            "level": level,
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
