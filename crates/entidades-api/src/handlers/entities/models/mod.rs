mod entity_path;
mod list_error;

pub use entity_path::EntityPath;
pub use list_error::{status_for_driver_number, ListError, EMPTY_TABLE_NAME_MESSAGE};
