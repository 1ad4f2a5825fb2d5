pub use crate::cli::{command, run_app};
pub use crate::domain::{
    contact::{self, Contact, ContactFields},
    manager::{ChangeCallback, CollectionChange, ContactStore},
};
pub use crate::errors::AppError;
pub use crate::store::{self, DocumentStore, MemStore, XmlFileStore, xml::ContactsDocument};
pub use crate::validation::{check_complete, check_phone_format, check_unique, validate};
