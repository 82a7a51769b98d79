pub mod command_controller;
pub mod history_controller;
pub mod home_controller;
pub mod speech_controller;

/// Single-user deployment: there is no login yet, so every chat log
/// and order is attributed to this id (matches the original service).
pub const DEFAULT_USER_ID: i64 = 1;
