//! # Seed Data Generator
//!
//! Creates a development database with a small nested dictionary.
//!
//! ## Usage
//! ```bash
//! # ./dictionary_dev.db (default)
//! cargo run -p dictionary-db --bin seed
//!
//! # Specify database path
//! cargo run -p dictionary-db --bin seed -- --db ./data/staging.db
//! ```
//!
//! ## Generated Data
//! - Two languages: en-GB (default) and fr-FR
//! - Root sections: General, Forms, Errors
//! - Nested keys under each section, with English and French text

use std::env;

use dictionary_db::migrations::migration_status;
use dictionary_db::{Database, DbConfig};
use uuid::Uuid;

/// (key, english, french) for each item in a section.
type SeedItem = (&'static str, &'static str, &'static str);

/// Root sections and their children.
const SECTIONS: &[(&str, &[SeedItem])] = &[
    (
        "General",
        &[
            ("Save", "Save", "Enregistrer"),
            ("Cancel", "Cancel", "Annuler"),
            ("Delete", "Delete", "Supprimer"),
            ("Read more", "Read more", "En savoir plus"),
        ],
    ),
    (
        "Forms",
        &[
            ("Email address", "Email address", "Adresse e-mail"),
            ("First name", "First name", "Prénom"),
            ("Last name", "Last name", "Nom"),
            ("Submit", "Submit", "Envoyer"),
        ],
    ),
    (
        "Errors",
        &[
            ("404 title", "Page not found", "Page introuvable"),
            ("Required field", "{0} is required", "{0} est obligatoire"),
        ],
    ),
];

/// Keys nested one level below `Forms.Submit`.
const SUBMIT_MESSAGES: &[SeedItem] = &[
    ("Success", "Thank you", "Merci"),
    ("Failure", "Something went wrong", "Une erreur est survenue"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./dictionary_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Dictionary Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./dictionary_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Dictionary Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path)
        .create_if_missing(true)
        .run_migrations(true);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");

    let (total, applied) = migration_status(db.pool()).await?;
    println!("✓ Migrations applied ({}/{})", applied, total);

    let existing = db.dictionary().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} dictionary items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let english = db
        .languages()
        .insert("en-GB", "English (United Kingdom)", true)
        .await?;
    let french = db
        .languages()
        .insert("fr-FR", "French (France)", false)
        .await?;

    println!("✓ Created 2 languages");

    let mut generated = 0;
    for (section, items) in SECTIONS {
        let section_id = Uuid::new_v4();
        db.dictionary().insert(section_id, None, section).await?;
        generated += 1;

        for (key, en, fr) in items.iter() {
            let item_id = Uuid::new_v4();
            db.dictionary().insert(item_id, Some(section_id), key).await?;
            db.language_texts().insert(english, item_id, en).await?;
            db.language_texts().insert(french, item_id, fr).await?;
            generated += 1;

            if *key == "Submit" {
                for (child, en, fr) in SUBMIT_MESSAGES {
                    let child_id = Uuid::new_v4();
                    db.dictionary().insert(child_id, Some(item_id), child).await?;
                    db.language_texts().insert(english, child_id, en).await?;
                    db.language_texts().insert(french, child_id, fr).await?;
                    generated += 1;
                }
            }
        }
    }

    println!("✓ Created {} dictionary items", generated);
    println!(
        "  Translations: {}",
        db.language_texts().count().await?
    );

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
