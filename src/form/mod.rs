//! Interactive entry form: state, panel UI, and field plot

pub mod panel;
pub mod plot;
pub mod state;

pub use panel::{EntryPanel, FormRow, StatusText, form_input, spawn_entry_panel, update_form_panel};
pub use plot::{FieldImage, FieldSprite, PreviewHandle, field_click, field_texture, update_preview};
pub use state::{FormField, FormState};
