use core::fmt;

use crate::domain::contact::ValidationReq;

#[derive(Debug)]
pub enum AppError {
    StorageRead(String),
    StorageWrite(String),
    NotFound(String),
    IncompleteFields,
    InvalidPhoneFormat(String),
    DuplicateId(String),
    DuplicatePhone(String),
    Io(std::io::Error),
    Regex(regex::Error),
}

impl AppError {
    /// Validation failures block a single insert/update and are recoverable by the caller.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::IncompleteFields
                | AppError::InvalidPhoneFormat(_)
                | AppError::DuplicateId(_)
                | AppError::DuplicatePhone(_)
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Regex(err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::StorageRead(msg) => {
                write!(f, "Could not read contacts document: {}", msg)
            }
            AppError::StorageWrite(msg) => {
                write!(f, "Could not save contacts document: {}", msg)
            }
            AppError::NotFound(id) => {
                write!(f, "Contact '{}' Not found", id)
            }
            AppError::IncompleteFields => {
                write!(f, "{}", ValidationReq::fields_req())
            }
            AppError::InvalidPhoneFormat(phone) => {
                write!(f, "'{}': {}", phone, ValidationReq::phone_req())
            }
            AppError::DuplicateId(id) => {
                write!(f, "A contact with id '{}' already exist", id)
            }
            AppError::DuplicatePhone(phone) => {
                write!(f, "A contact with phone '{}' already exist", phone)
            }
            AppError::Io(e) => {
                write!(f, "I/O error while accessing a file or resource: {}", e)
            }
            AppError::Regex(e) => {
                write!(f, "Invalid pattern: {}", e)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Regex(e) => Some(e),
            _ => None,
        }
    }
}
