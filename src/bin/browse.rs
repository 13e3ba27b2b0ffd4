//! Walkthrough binary: render a few Foodpoint pages as text.
//!
//! ```ignore
//! cargo run --bin browse -- http://localhost:5000/api/
//! ```
//!
//! The API root may also come from the `FOODPOINT_API` environment
//! variable; it defaults to the local development server.

use anyhow::Result;
use foodpoint_client::{ApiClient, ClientConfig, Notification, Page, Session};

fn print_page(page: &Page, notification: &Notification) {
    println!("== {} ==", page.title);
    for link in &page.navigation {
        println!("  [{}] -> {}", link.label, link.href);
    }
    for paragraph in &page.content {
        println!("  {}", paragraph);
    }
    if let Some(listing) = &page.listing {
        println!("  | {} |", listing.columns.join(" | "));
        match &listing.empty_message {
            Some(message) => println!("  ({})", message),
            None => {
                for row in &listing.rows {
                    println!("  | {} |", row.cells.join(" | "));
                }
            }
        }
    }
    if let Some(form) = &page.form {
        println!("  form -> {} {}", form.method, form.action);
        for field in form.fields() {
            let mark = if field.required { "*" } else { " " };
            println!("    {}{}: {}", mark, field.label, field.value);
        }
    }
    if let Some(text) = notification.text() {
        println!("  !! {}", text);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let api_root = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FOODPOINT_API").ok())
        .unwrap_or_else(|| "http://localhost:5000/api/".to_string());

    let client = ApiClient::new(ClientConfig::new(api_root))?;
    let mut session = Session::new(client);

    session.home().await;
    print_page(&session.view().page, &session.view().notification);

    session.follow("fpoint:all-users").await;
    print_page(&session.view().page, &session.view().notification);

    session.follow("fpoint:all-categories").await;
    print_page(&session.view().page, &session.view().notification);

    Ok(())
}
