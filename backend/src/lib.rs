pub mod config;
pub mod error;
pub mod processor;
pub mod queries;
pub mod session;
pub mod shell;
pub mod store;
pub use shared::{models::*, error::{Error, ErrorCode, Result}, tally::{Standing, Tally}};
pub use config::Config;
pub use shell::ElectionApp;
pub use store::Store;

#[cfg(test)]
mod tests;
