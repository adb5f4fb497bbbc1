pub mod candidate;
pub mod config;
pub mod ranking;
pub mod report;
pub mod schema;
