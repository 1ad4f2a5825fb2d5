use clap::{Parser, Subcommand};

use crate::store::DEFAULT_FILE_PATH;

#[derive(Parser, Debug)]
#[command(name = "xml-rolodex", version, about = "Contact book kept in an XML file")]
pub struct Cli {
    /// Path of the contacts document
    #[arg(short, long, global = true, env = "CONTACTS_FILE", default_value_t = String::from(DEFAULT_FILE_PATH))]
    pub file: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty contacts document if none exists
    Init,

    /// List contacts in document order
    List,

    /// Show a single contact
    Show {
        /// Contact id
        #[arg(long)]
        id: String,
    },

    /// Add a new contact
    Add {
        /// Unique contact id
        #[arg(long)]
        id: String,

        /// Contact name
        #[arg(long)]
        name: String,

        /// Company name
        #[arg(long)]
        company: String,

        /// Phone number, xxx-xxxxxxx or (xxx) xxxxxxx
        #[arg(long)]
        phone: String,
    },

    /// Edit an existing contact
    /// The id cannot change; give as many of the other fields as you wish to update
    Update {
        /// Id of the contact to update
        #[arg(long)]
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New company
        #[arg(long)]
        company: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Delete a contact by id
    Delete {
        /// Id of the contact to delete
        #[arg(long)]
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
