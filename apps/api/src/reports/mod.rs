pub mod handlers;
pub mod overall;
