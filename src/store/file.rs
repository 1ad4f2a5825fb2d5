use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use super::*;

pub struct XmlFileStore {
    pub medium: String,
    pub path: PathBuf,
}

impl XmlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            medium: "xml".to_string(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty document when the file does not exist yet.
    /// Returns whether a file was created.
    pub fn init(&self) -> Result<bool, AppError> {
        if fs::exists(&self.path)? {
            return Ok(false);
        }
        self.save(&ContactsDocument::new())?;
        Ok(true)
    }
}

impl DocumentStore for XmlFileStore {
    fn load(&self) -> Result<ContactsDocument, AppError> {
        let data = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                AppError::StorageRead(format!("{} does not exist", self.path.display()))
            } else {
                AppError::StorageRead(format!("{}: {}", self.path.display(), e))
            }
        })?;

        let document = ContactsDocument::parse(&data)?;
        debug!(
            "loaded {} contacts from {}",
            document.records().len(),
            self.path.display()
        );
        Ok(document)
    }

    fn save(&self, document: &ContactsDocument) -> Result<(), AppError> {
        let xml = document.to_xml()?;
        let write_err = |e: std::io::Error| {
            AppError::StorageWrite(format!("{}: {}", self.path.display(), e))
        };

        create_file_parent(&self.path).map_err(|e| AppError::StorageWrite(e.to_string()))?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(write_err)?;

        file.write_all(xml.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        debug!(
            "saved {} contacts to {}",
            document.records().len(),
            self.path.display()
        );
        Ok(())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }
}
