//! Client side of the roster: HTTP API client, the grid/dialog view model, and file export.

pub mod api;
pub mod export;
pub mod view;

pub use api::{DEFAULT_BASE_URL, NurseApi};
pub use export::{ExportFormat, write_export};
pub use view::{Notice, NurseForm, RosterView};
