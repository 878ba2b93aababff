//! Headless model of the nurse grid page: loaded rows, selection, the add and edit
//! dialogs, and the notices a front end shows after each action.
//!
//! Every mutation is followed by a full reload of the rows. Failure causes are logged;
//! the front end only gets a generic [`Notice`].

use crate::client::api::NurseApi;
use crate::client::export::ExportFormat;
use crate::error::ExportError;
use roster_schema::{NurseFields, NurseRecord};
use std::fmt;
use tracing::error;

/// Outcome message for a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NurseAdded,
    NurseUpdated,
    NurseDeleted,
    AddFailed,
    UpdateFailed,
    DeleteFailed,
    NoSelection,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::NurseAdded => "Nurse added successfully!",
            Notice::NurseUpdated => "Nurse updated successfully!",
            Notice::NurseDeleted => "Nurse deleted successfully!",
            Notice::AddFailed => "Error adding nurse. Please try again.",
            Notice::UpdateFailed => "Error updating nurse. Please try again.",
            Notice::DeleteFailed => "Error deleting nurse. Please try again.",
            Notice::NoSelection => "Please select a nurse to delete.",
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Notice::AddFailed | Notice::UpdateFailed | Notice::DeleteFailed | Notice::NoSelection
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Text inputs shared by the add and edit dialogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NurseForm {
    pub name: String,
    pub license_number: String,
    pub dob: String,
    pub age: String,
}

impl NurseForm {
    pub fn from_record(record: &NurseRecord) -> Self {
        Self {
            name: record.name.clone().unwrap_or_default(),
            license_number: record.license_number.clone().unwrap_or_default(),
            dob: record.dob.clone().unwrap_or_default(),
            age: record.age.clone().unwrap_or_default(),
        }
    }

    /// Form inputs are always sent, empty strings included.
    pub fn to_fields(&self) -> NurseFields {
        NurseFields::new(
            self.name.clone(),
            self.license_number.clone(),
            self.dob.clone(),
            self.age.clone(),
        )
    }
}

pub struct RosterView {
    api: NurseApi,
    rows: Vec<NurseRecord>,
    selection: Vec<String>,
    add_open: bool,
    edit_open: bool,
    edit_target: Option<String>,
    form: NurseForm,
}

impl RosterView {
    pub fn new(api: NurseApi) -> Self {
        Self {
            api,
            rows: Vec::new(),
            selection: Vec::new(),
            add_open: false,
            edit_open: false,
            edit_target: None,
            form: NurseForm::default(),
        }
    }

    pub fn rows(&self) -> &[NurseRecord] {
        &self.rows
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn is_add_open(&self) -> bool {
        self.add_open
    }

    pub fn is_edit_open(&self) -> bool {
        self.edit_open
    }

    pub fn edit_target(&self) -> Option<&str> {
        self.edit_target.as_deref()
    }

    pub fn form(&self) -> &NurseForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NurseForm {
        &mut self.form
    }

    /// Reload every row from the server. On failure the current rows are kept.
    pub async fn refresh(&mut self) -> bool {
        match self.api.list().await {
            Ok(rows) => {
                self.rows = rows;
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching nurses");
                false
            }
        }
    }

    /// Grid selection changed; the first selected id becomes the edit target.
    pub fn select(&mut self, ids: Vec<String>) {
        self.edit_target = ids.first().cloned();
        self.selection = ids;
    }

    pub fn open_add_dialog(&mut self) {
        self.add_open = true;
    }

    pub fn close_add_dialog(&mut self) {
        self.add_open = false;
        self.form = NurseForm::default();
    }

    /// Open the edit dialog for `id`, seeding the form from the loaded row.
    pub fn open_edit_dialog(&mut self, id: &str) {
        self.edit_target = Some(id.to_string());
        self.edit_open = true;
        self.form = self
            .rows
            .iter()
            .find(|row| row.id == id)
            .map(NurseForm::from_record)
            .unwrap_or_default();
    }

    pub fn close_edit_dialog(&mut self) {
        self.edit_open = false;
        self.edit_target = None;
        self.form = NurseForm::default();
    }

    /// Create a record from the form. The dialog stays open when the call fails.
    pub async fn submit_add(&mut self) -> Notice {
        match self.api.create(&self.form.to_fields()).await {
            Ok(_) => {
                self.refresh().await;
                self.close_add_dialog();
                Notice::NurseAdded
            }
            Err(e) => {
                error!(error = %e, "Error adding nurse");
                Notice::AddFailed
            }
        }
    }

    /// Send the form to the current edit target. The dialog stays open when the call fails.
    pub async fn submit_edit(&mut self) -> Notice {
        let Some(id) = self.edit_target.clone() else {
            error!("Error updating nurse: no edit target");
            return Notice::UpdateFailed;
        };
        match self.api.update(&id, &self.form.to_fields()).await {
            Ok(_) => {
                self.refresh().await;
                self.close_edit_dialog();
                Notice::NurseUpdated
            }
            Err(e) => {
                error!(error = %e, id = %id, "Error updating nurse");
                Notice::UpdateFailed
            }
        }
    }

    pub async fn delete(&mut self, id: Option<&str>) -> Notice {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return Notice::NoSelection;
        };
        match self.api.delete(id).await {
            Ok(_) => {
                self.refresh().await;
                Notice::NurseDeleted
            }
            Err(e) => {
                error!(error = %e, id = %id, "Error deleting nurse");
                Notice::DeleteFailed
            }
        }
    }

    /// Export the currently loaded rows; no server round trip.
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        format.render(&self.rows)
    }
}
