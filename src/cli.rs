pub mod command;
pub mod run;

pub use run::run_app;

use std::io::{self, BufRead, Write};

use crate::domain::Contact;
use crate::errors::AppError;

// OUTPUT FUNCTIONS
pub fn confirm_action(action: &str) -> Result<(), AppError> {
    println!("\nAre you sure you want to {}? (y/n)", action);
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

pub fn display_contact(contact: &Contact) -> String {
    format!("{}", contact)
}

pub fn listing_row(i: usize, contact: &Contact) -> String {
    format!(
        "{i:>3}. {:<10} {:<20} {:<20} {:15}",
        contact.id, contact.name, contact.company, contact.phone
    )
}

// INPUT FUNCTIONS
pub fn get_input_to_lower(input: &mut impl BufRead) -> Result<String, AppError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_lowercase())
}
