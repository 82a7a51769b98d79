pub mod kis;
pub mod speech;
pub mod classifier;
pub mod db_init;

pub mod chat_service;
pub mod command_service;
pub mod pending;
