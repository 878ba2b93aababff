//! Wire types shared by the roster server and its clients.

pub mod error;
pub mod nurse;

pub use error::{DeleteResponse, RawErrorBody};
pub use nurse::{NurseFields, NurseRecord};
