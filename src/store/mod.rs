pub mod file;
pub mod memory;
pub mod xml;

use std::fs;
use std::path::Path;

use crate::errors::AppError;
use xml::ContactsDocument;

pub use file::XmlFileStore;
pub use memory::MemStore;

pub const DEFAULT_FILE_PATH: &str = "Contacts.xml";

/// Durable side of the contact book. Every save receives the complete document.
pub trait DocumentStore {
    fn load(&self) -> Result<ContactsDocument, AppError>;

    fn save(&self, document: &ContactsDocument) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
