pub mod handlers;
pub mod tasks;
