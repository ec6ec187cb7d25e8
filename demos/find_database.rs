//! Look up a database by title and print its column schema.
//!
//! Run:
//! `NOTION_TOKEN=<token> cargo run --example find_database -- "Grocery List"`
//!
//! Optional env vars:
//! - `NOTION_BASE_URL` (defaults to `https://api.notion.com/`)

use notion_rest::{ClientConfig, NotionClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = match std::env::var("NOTION_TOKEN") {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Set NOTION_TOKEN before running this example.");
            std::process::exit(2);
        }
    };
    let Some(name) = std::env::args().nth(1) else {
        eprintln!("Usage: find_database <title>");
        std::process::exit(2);
    };

    let mut config = ClientConfig::new(&token)?;
    if let Ok(url) = std::env::var("NOTION_BASE_URL") {
        config = config.with_base_url(&url)?;
    }
    let client = NotionClient::new(config)?;

    match client.find_database(&name) {
        Ok(database) => {
            println!("{} ({})", name, database.id);
            for (column, schema) in &database.properties {
                println!("  {column}: {}", serde_json::to_string(&schema.kind)?);
            }
        }
        Err(error) if error.is_not_found() => {
            eprintln!("No database titled {name:?} is shared with this integration.");
            std::process::exit(1);
        }
        Err(error) => return Err(error.into()),
    }
    Ok(())
}
