use std::cell::RefCell;

use super::*;

/// Keeps the document in memory. Useful for tests and for a scratch session without a file.
#[derive(Default)]
pub struct MemStore {
    data: RefCell<ContactsDocument>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: ContactsDocument) -> Self {
        Self {
            data: RefCell::new(document),
        }
    }
}

impl DocumentStore for MemStore {
    fn load(&self) -> Result<ContactsDocument, AppError> {
        Ok(self.data.borrow().clone())
    }

    fn save(&self, document: &ContactsDocument) -> Result<(), AppError> {
        *self.data.borrow_mut() = document.clone();
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}
