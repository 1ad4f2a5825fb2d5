use std::collections::HashSet;

use log::{debug, info, warn};

use super::contact::{Contact, ContactFields};
use crate::errors::AppError;
use crate::store::DocumentStore;
use crate::store::xml::ContactsDocument;
use crate::validation;

/// What changed in the collection after a committed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChange {
    Loaded { count: usize },
    Inserted(Contact),
    Updated(Contact),
    Deleted { id: String },
}

pub type ChangeCallback = Box<dyn FnMut(&CollectionChange)>;

/// Owns the durable document and the in-memory collection and keeps them in lock-step.
///
/// Each mutation edits a copy of the document, persists the full copy and only then
/// commits it together with the in-memory change. A failed write leaves both untouched.
/// Mutators take `&mut self`, so a store shared between threads has to sit behind one
/// lock spanning validation and the mutation.
pub struct ContactStore {
    storage: Box<dyn DocumentStore>,
    document: ContactsDocument,
    mem: Vec<Contact>,
    observers: Vec<ChangeCallback>,
}

impl ContactStore {
    pub fn new(storage: Box<dyn DocumentStore>) -> Self {
        Self {
            storage,
            document: ContactsDocument::new(),
            mem: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// `new` followed by `load`.
    pub fn open(storage: Box<dyn DocumentStore>) -> Result<Self, AppError> {
        let mut store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    pub fn load(&mut self) -> Result<Vec<Contact>, AppError> {
        debug!("loading contacts from {} storage", self.storage.get_medium());
        let document = self.storage.load()?;
        warn_on_duplicates(document.records());

        self.mem = document.records().to_vec();
        self.document = document;

        self.notify(&CollectionChange::Loaded {
            count: self.mem.len(),
        });
        Ok(self.mem.clone())
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.mem
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Contact> {
        self.mem.iter().find(|c| c.id == id)
    }

    pub fn storage(&self) -> &dyn DocumentStore {
        self.storage.as_ref()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&CollectionChange) + 'static) {
        self.observers.push(Box::new(callback));
    }

    /// Stores an already validated contact.
    pub fn insert(&mut self, candidate: Contact) -> Result<(), AppError> {
        let mut next = self.document.clone();
        next.append(candidate.clone());

        self.commit(next)?;
        info!("inserted contact {}", candidate.id);

        self.mem.push(candidate.clone());
        self.notify(&CollectionChange::Inserted(candidate));
        Ok(())
    }

    /// Replaces name, company and phone of the contact `id`. The fields must already be
    /// validated with `id` excluded from the uniqueness check.
    pub fn update(&mut self, id: &str, fields: ContactFields) -> Result<(), AppError> {
        let mut next = self.document.clone();
        next.set_fields(id, fields.clone())?;

        self.commit(next)?;
        info!("updated contact {}", id);

        let updated = self.mem.iter_mut().find(|c| c.id == id).map(|contact| {
            contact.apply(fields);
            contact.clone()
        });

        if let Some(updated) = updated {
            self.notify(&CollectionChange::Updated(updated));
        }
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), AppError> {
        let mut next = self.document.clone();
        next.remove(id)?;

        self.commit(next)?;
        info!("deleted contact {}", id);

        // First match only, like the document, so duplicates in a hand edited file stay in step
        if let Some(index) = self.mem.iter().position(|c| c.id == id) {
            self.mem.remove(index);
        }
        self.notify(&CollectionChange::Deleted { id: id.to_string() });
        Ok(())
    }

    /// Validates `candidate` against the current collection, then inserts it.
    pub fn add(&mut self, candidate: Contact) -> Result<(), AppError> {
        validation::validate(&candidate, &self.mem, None)?;
        self.insert(candidate)
    }

    /// Validates the new fields for contact `id` (excluding itself), then updates it.
    pub fn edit(&mut self, id: &str, fields: ContactFields) -> Result<(), AppError> {
        let candidate = self
            .find_by_id(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?
            .with_fields(&fields);

        validation::validate(&candidate, &self.mem, Some(id))?;
        self.update(id, fields)
    }

    fn commit(&mut self, next: ContactsDocument) -> Result<(), AppError> {
        self.storage.save(&next)?;
        self.document = next;
        Ok(())
    }

    fn notify(&mut self, change: &CollectionChange) {
        for observer in self.observers.iter_mut() {
            observer(change);
        }
    }
}

fn warn_on_duplicates(contacts: &[Contact]) {
    let mut ids = HashSet::new();
    let mut phones = HashSet::new();

    for contact in contacts {
        if !ids.insert(contact.id.as_str()) {
            warn!("document holds more than one contact with id {}", contact.id);
        }
        if !phones.insert(contact.phone.as_str()) {
            warn!("document holds more than one contact with phone {}", contact.phone);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::store::MemStore;

    fn alice() -> Contact {
        Contact::new("1", "Alice", "Acme", "123-4567890")
    }

    fn seeded() -> Result<ContactStore, AppError> {
        let document = ContactsDocument::from(vec![
            alice(),
            Contact::new("2", "Bob", "X", "321-7654321"),
        ]);
        ContactStore::open(Box::new(MemStore::with_document(document)))
    }

    fn persisted(store: &ContactStore) -> Result<Vec<Contact>, AppError> {
        Ok(store.storage().load()?.records().to_vec())
    }

    #[test]
    fn load_keeps_document_order() -> Result<(), AppError> {
        let mut store = seeded()?;
        let loaded = store.load()?;

        assert_eq!(loaded[0].id, "1");
        assert_eq!(loaded[1].id, "2");
        assert_eq!(store.contacts(), loaded.as_slice());
        Ok(())
    }

    #[test]
    fn insert_reaches_memory_and_document() -> Result<(), AppError> {
        let mut store = ContactStore::open(Box::new(MemStore::new()))?;

        store.add(alice())?;

        assert_eq!(store.contacts(), &[alice()]);
        assert_eq!(persisted(&store)?, vec![alice()]);
        Ok(())
    }

    #[test]
    fn rejected_insert_changes_nothing() -> Result<(), AppError> {
        let mut store = seeded()?;
        let before = store.contacts().to_vec();

        let result = store.add(Contact::new("1", "Carol", "Y", "555-0000000"));
        assert!(matches!(result, Err(AppError::DuplicateId(_))));

        let result = store.add(Contact::new("3", "Carol", "Y", "321-7654321"));
        assert!(matches!(result, Err(AppError::DuplicatePhone(_))));

        assert_eq!(store.contacts(), before.as_slice());
        assert_eq!(persisted(&store)?, before);
        Ok(())
    }

    #[test]
    fn edit_may_keep_own_phone_but_not_take_another() -> Result<(), AppError> {
        let mut store = seeded()?;

        store.edit("1", ContactFields::new("Alicia", "Acme", "123-4567890"))?;
        assert_eq!(store.find_by_id("1").map(|c| c.name.as_str()), Some("Alicia"));

        let result = store.edit("1", ContactFields::new("Alicia", "Acme", "321-7654321"));
        assert!(matches!(result, Err(AppError::DuplicatePhone(_))));
        assert_eq!(persisted(&store)?, store.contacts().to_vec());
        Ok(())
    }

    #[test]
    fn update_and_delete_unknown_id() -> Result<(), AppError> {
        let mut store = seeded()?;

        assert!(matches!(
            store.update("9", ContactFields::new("a", "b", "123-4567890")),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.edit("9", ContactFields::new("a", "b", "123-4567890")),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.delete("9"), Err(AppError::NotFound(_))));
        assert_eq!(store.contacts().len(), 2);
        Ok(())
    }

    #[test]
    fn delete_removes_from_both() -> Result<(), AppError> {
        let mut store = seeded()?;

        store.delete("1")?;

        assert!(store.find_by_id("1").is_none());
        assert_eq!(persisted(&store)?, store.contacts().to_vec());
        assert_eq!(store.contacts().len(), 1);
        Ok(())
    }

    #[test]
    fn delete_with_duplicate_ids_keeps_memory_and_document_equal() -> Result<(), AppError> {
        let document = ContactsDocument::from(vec![
            Contact::new("1", "A", "Acme", "123-4567890"),
            Contact::new("1", "B", "Acme", "321-7654321"),
        ]);
        let mut store = ContactStore::open(Box::new(MemStore::with_document(document)))?;

        store.delete("1")?;

        assert_eq!(store.contacts(), &[Contact::new("1", "B", "Acme", "321-7654321")]);
        assert_eq!(persisted(&store)?, store.contacts().to_vec());
        Ok(())
    }

    #[test]
    fn observers_see_committed_changes() -> Result<(), AppError> {
        let mut store = ContactStore::new(Box::new(MemStore::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        store.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        store.load()?;
        store.add(alice())?;
        let _ = store.add(alice());
        store.edit("1", ContactFields::new("Alice", "Initech", "123-4567890"))?;
        store.delete("1")?;

        assert_eq!(
            *seen.borrow(),
            vec![
                CollectionChange::Loaded { count: 0 },
                CollectionChange::Inserted(alice()),
                CollectionChange::Updated(Contact::new("1", "Alice", "Initech", "123-4567890")),
                CollectionChange::Deleted { id: "1".to_string() },
            ]
        );
        Ok(())
    }
}
