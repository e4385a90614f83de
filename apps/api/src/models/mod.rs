pub mod collector;
pub mod reports;
pub mod trash;
pub mod user;
