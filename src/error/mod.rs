mod client;
mod export;
mod roster;

pub use client::ClientError;
pub use export::ExportError;
pub use roster::RosterError;
