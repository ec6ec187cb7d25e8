//! Print the plain text of every child block of a page.
//!
//! Run:
//! `NOTION_TOKEN=<token> cargo run --example list_blocks -- <page-id>`

use notion_rest::model::{BlockKind, RichText};
use notion_rest::{ClientConfig, NotionClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = match std::env::var("NOTION_TOKEN") {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Set NOTION_TOKEN before running this example.");
            std::process::exit(2);
        }
    };
    let Some(page_id) = std::env::args().nth(1) else {
        eprintln!("Usage: list_blocks <page-id>");
        std::process::exit(2);
    };

    let client = NotionClient::new(ClientConfig::new(&token)?)?;
    for block in client.list_blocks(&page_id)? {
        let line = match &block.kind {
            BlockKind::Paragraph(text) | BlockKind::BulletedListItem(text) => {
                plain(&text.rich_text)
            }
            BlockKind::Heading1(heading)
            | BlockKind::Heading2(heading)
            | BlockKind::Heading3(heading) => format!("# {}", plain(&heading.rich_text)),
            BlockKind::ToDo(todo) => {
                let mark = if todo.checked { 'x' } else { ' ' };
                format!("[{mark}] {}", plain(&todo.rich_text))
            }
            other => format!("<{}>", kind_name(other)),
        };
        println!("{line}");
    }
    Ok(())
}

fn plain(runs: &[RichText]) -> String {
    runs.iter().map(|run| run.plain_text.as_str()).collect()
}

fn kind_name(kind: &BlockKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|value| value.as_object()?.keys().next().cloned())
        .unwrap_or_else(|| "block".to_owned())
}
