use std::fmt;

/// A single entry of the contact book. `id` is chosen by the user and never changes
/// once the contact has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub company: String,
    pub phone: String,
}

/// The editable part of a contact, as supplied by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub company: String,
    pub phone: String,
}

pub struct ValidationReq;

impl ValidationReq {
    pub fn fields_req() -> &'static str {
        "All fields must be filled."
    }

    pub fn phone_req() -> &'static str {
        "Phone format is invalid. Use xxx-xxxxxxx or (xxx) xxxxxxx."
    }
}

impl Contact {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        company: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Contact {
            id: id.into(),
            name: name.into(),
            company: company.into(),
            phone: phone.into(),
        }
    }

    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            company: self.company.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Same id, new editable fields. Used to build the candidate for an update.
    pub fn with_fields(&self, fields: &ContactFields) -> Contact {
        Contact {
            id: self.id.clone(),
            name: fields.name.clone(),
            company: fields.company.clone(),
            phone: fields.phone.clone(),
        }
    }

    pub fn apply(&mut self, fields: ContactFields) {
        self.name = fields.name;
        self.company = fields.company;
        self.phone = fields.phone;
    }
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        ContactFields {
            name: name.into(),
            company: company.into(),
            phone: phone.into(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Id: {}\n\
            Name: {}\n\
            Company: {}\n\
            Phone: {}",
            self.id, self.name, self.company, self.phone
        )
    }
}
