use tracing::{error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user_id: u64, chat_id: i64) {
    info!("CMD_START: {} by {} in chat {}", command, user_id, chat_id);
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, user_id: u64, chat_id: i64, error: &str) {
    error!(
        "CMD_ERROR: {} by {} in chat {} - {}",
        command, user_id, chat_id, error
    );
}

/// Logs callback-button presses with consistent format
pub fn log_callback(data: &str, user_id: u64, chat_id: i64) {
    info!("CALLBACK: '{}' from {} in chat {}", data, user_id, chat_id);
}

/// Logs a notification delivery attempt outcome
pub fn log_notify_result(chat_id: &str, booking_id: &str, error: Option<&str>) {
    match error {
        None => info!("NOTIFY: sent booking {} to {}", booking_id, chat_id),
        Some(e) => warn!("NOTIFY: failed for {} on booking {} - {}", chat_id, booking_id, e),
    }
}
