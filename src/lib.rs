pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod server;
mod utils;

pub use error::{ClientError, ExportError, RosterError};
