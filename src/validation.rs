use regex::Regex;

use crate::domain::contact::Contact;
use crate::errors::AppError;

pub const PHONE_PATTERN: &str = r"^\(?\d{3}\)?[- ]?\d{7}$";

pub fn check_complete(candidate: &Contact) -> Result<(), AppError> {
    // Every field must hold something other than whitespace
    let fields = [
        &candidate.id,
        &candidate.name,
        &candidate.company,
        &candidate.phone,
    ];

    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(AppError::IncompleteFields);
    }
    Ok(())
}

pub fn check_phone_format(phone: &str) -> Result<(), AppError> {
    // Optional "(", 3 digits, optional ")", optional "-" or " ", 7 digits
    let re = Regex::new(PHONE_PATTERN)?;

    if !re.is_match(phone) {
        return Err(AppError::InvalidPhoneFormat(phone.to_string()));
    }
    Ok(())
}

/// Fails on the first contact (in collection order) sharing the candidate's id or phone.
/// The contact whose id equals `exclude_id` is skipped, so an update can keep its own values.
pub fn check_unique(
    candidate: &Contact,
    contactlist: &[Contact],
    exclude_id: Option<&str>,
) -> Result<(), AppError> {
    for contact in contactlist {
        if exclude_id.is_some_and(|id| id == contact.id) {
            continue;
        }

        if contact.id == candidate.id {
            return Err(AppError::DuplicateId(candidate.id.clone()));
        }

        if contact.phone == candidate.phone {
            return Err(AppError::DuplicatePhone(candidate.phone.clone()));
        }
    }
    Ok(())
}

pub fn validate(
    candidate: &Contact,
    contactlist: &[Contact],
    exclude_id: Option<&str>,
) -> Result<(), AppError> {
    check_complete(candidate)?;
    check_phone_format(&candidate.phone)?;
    check_unique(candidate, contactlist, exclude_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Contact {
        Contact::new("1", "Alice", "Acme", "123-4567890")
    }

    #[test]
    fn empty_or_blank_fields_are_incomplete() {
        let candidates = [
            Contact::new("", "Alice", "Acme", "123-4567890"),
            Contact::new("1", "   ", "Acme", "123-4567890"),
            Contact::new("1", "Alice", "\t", "123-4567890"),
            Contact::new("1", "Alice", "Acme", ""),
        ];

        for candidate in &candidates {
            assert!(matches!(
                validate(candidate, &[], None),
                Err(AppError::IncompleteFields)
            ));
        }
    }

    #[test]
    fn accepted_phone_formats() -> Result<(), AppError> {
        let valid = [
            "123-4567890",
            "(123) 4567890",
            "1234567890",
            "(123)4567890",
            "123 4567890",
            "(123-4567890",
            "123)4567890",
        ];

        for phone in valid {
            check_phone_format(phone)?;
        }
        Ok(())
    }

    #[test]
    fn rejected_phone_formats() {
        let invalid = [
            "",
            "123-456-7890",
            "123--4567890",
            "12-34567890",
            "123-456789",
            "123-45678901",
            "((123) 4567890",
            "+1 123-4567890",
            "abc-defghij",
            " 123-4567890",
            "123-4567890 ",
            "123.4567890",
            "123-4567890\n",
        ];

        for phone in invalid {
            assert!(
                matches!(
                    check_phone_format(phone),
                    Err(AppError::InvalidPhoneFormat(_))
                ),
                "{phone} should be rejected"
            );
        }
    }

    #[test]
    fn phone_is_checked_after_completeness() {
        let candidate = Contact::new("1", "", "Acme", "bad");

        assert!(matches!(
            validate(&candidate, &[], None),
            Err(AppError::IncompleteFields)
        ));
    }

    #[test]
    fn duplicate_id_rejected() {
        let candidate = Contact::new("1", "Bob", "X", "321-7654321");

        assert!(matches!(
            validate(&candidate, &[alice()], None),
            Err(AppError::DuplicateId(id)) if id == "1"
        ));
    }

    #[test]
    fn duplicate_phone_rejected() {
        let candidate = Contact::new("2", "Bob", "X", "123-4567890");

        assert!(matches!(
            validate(&candidate, &[alice()], None),
            Err(AppError::DuplicatePhone(phone)) if phone == "123-4567890"
        ));
    }

    #[test]
    fn id_checked_before_phone_in_collection_order() {
        let contactlist = [
            Contact::new("2", "Carol", "Y", "555-0000000"),
            Contact::new("3", "Dan", "Z", "555-1111111"),
        ];
        // Collides with the first contact by phone and the second by id
        let candidate = Contact::new("3", "Eve", "W", "555-0000000");

        assert!(matches!(
            check_unique(&candidate, &contactlist, None),
            Err(AppError::DuplicatePhone(_))
        ));

        // Same contact collides on both: id wins
        let candidate = Contact::new("2", "Eve", "W", "555-0000000");
        assert!(matches!(
            check_unique(&candidate, &contactlist, None),
            Err(AppError::DuplicateId(_))
        ));
    }

    #[test]
    fn excluded_contact_may_keep_its_values() -> Result<(), AppError> {
        let contactlist = [alice(), Contact::new("2", "Bob", "X", "321-7654321")];

        validate(&alice(), &contactlist, Some("1"))?;

        let collides = Contact::new("1", "Alice", "Acme", "321-7654321");
        assert!(matches!(
            validate(&collides, &contactlist, Some("1")),
            Err(AppError::DuplicatePhone(_))
        ));
        Ok(())
    }
}
