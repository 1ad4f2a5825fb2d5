use std::io;

use clap::Parser;

use crate::{
    cli::{
        command::{Cli, Commands},
        confirm_action, display_contact, get_input_to_lower, listing_row,
    },
    domain::{Contact, ContactFields, ContactStore},
    errors::AppError,
    store::XmlFileStore,
};

pub fn run_app() -> Result<(), AppError> {
    let cli = Cli::parse();
    run(cli, &mut io::stdin().lock())
}

/// Executes one command against the document named by `cli.file`.
/// `input` answers the delete confirmation.
pub fn run(cli: Cli, input: &mut impl io::BufRead) -> Result<(), AppError> {
    let path = cli.file;

    match cli.command {
        Commands::Init => {
            if XmlFileStore::new(&path).init()? {
                println!("Created empty contacts document at {}", path);
            } else {
                println!("{} already exists", path);
            }
            Ok(())
        }

        // Listing contacts
        Commands::List => {
            let storage = open_store(&path)?;
            if storage.contacts().is_empty() {
                println!("No contact yet");
                return Ok(());
            }

            for (i, c) in storage.contacts().iter().enumerate() {
                println!("{}", listing_row(i + 1, c));
            }
            Ok(())
        }

        Commands::Show { id } => {
            let storage = open_store(&path)?;
            let contact = storage
                .find_by_id(&id)
                .ok_or_else(|| AppError::NotFound(id.clone()))?;

            println!("{}", display_contact(contact));
            Ok(())
        }

        Commands::Add {
            id,
            name,
            company,
            phone,
        } => {
            let mut storage = open_store(&path)?;
            let new_contact = Contact::new(id, name, company, phone);

            storage.add(new_contact)?;

            println!("Contact added successfully");
            Ok(())
        }

        // Edit Contact
        Commands::Update {
            id,
            name,
            company,
            phone,
        } => {
            let mut storage = open_store(&path)?;
            let current = storage
                .find_by_id(&id)
                .ok_or_else(|| AppError::NotFound(id.clone()))?;

            let fields = ContactFields {
                name: name.unwrap_or_else(|| current.name.clone()),
                company: company.unwrap_or_else(|| current.company.clone()),
                phone: phone.unwrap_or_else(|| current.phone.clone()),
            };

            storage.edit(&id, fields)?;

            println!("Contact updated successfully");
            Ok(())
        }

        // Delete Contact
        Commands::Delete { id, yes } => {
            let mut storage = open_store(&path)?;
            let contact = storage
                .find_by_id(&id)
                .ok_or_else(|| AppError::NotFound(id.clone()))?;

            if !yes {
                let message = format!("delete this contact\n{}\n", display_contact(contact));
                confirm_action(&message)?;

                let consent = get_input_to_lower(input)?;
                if consent != "y" {
                    println!("Delete cancelled");
                    return Ok(());
                }
            }

            storage.delete(&id)?;

            println!("Contact deleted successfully");
            Ok(())
        }
    }
}

fn open_store(path: &str) -> Result<ContactStore, AppError> {
    ContactStore::open(Box::new(XmlFileStore::new(path)))
}
