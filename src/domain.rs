pub mod contact;
pub mod manager;

pub use contact::{Contact, ContactFields};
pub use manager::{CollectionChange, ContactStore};
