mod api;
mod avatar;
mod cache;
mod config;
mod thread;
mod types;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;

use crate::config::Config;
use crate::ui::App;

const LOGO: &str = r#"
  会話
  kaiwa
"#;

#[derive(Parser)]
#[command(name = "kaiwa")]
#[command(about = "A fast TUI for reading and replying to your site's comments")]
#[command(version)]
struct Args {
    /// Page id from config.toml to open directly.
    /// If not provided, shows the configured page list
    page_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Show logo
    eprintln!("{}", LOGO);

    let config = Config::load();

    // Fail fast on an unusable service configuration
    config.validate()?;

    match args.page_id {
        Some(page_id) => {
            // Direct page mode
            let page = config.page_context(&page_id).ok_or_else(|| {
                anyhow!(
                    "Unknown page id '{}'. Configured pages: {}",
                    page_id,
                    config
                        .pages
                        .iter()
                        .map(|p| p.id.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?;

            eprintln!("Fetching comments for {} ...", page.page_title);

            let client = api::client()?;
            let comments = api::fetch_all_comments(&client, &page).await?;

            eprintln!(
                "Found {} comment(s). Starting viewer...",
                thread::total_count(&comments)
            );

            let mut app = App::new_with_thread(config, page, comments);
            app.run()?;
        }
        None => {
            // Page list mode
            if config.pages.is_empty() {
                eprintln!("No pages configured. Add [[pages]] entries to config.toml.");
                return Ok(());
            }

            let mut app = App::new_with_pages(config);
            app.run()?;
        }
    }

    Ok(())
}
