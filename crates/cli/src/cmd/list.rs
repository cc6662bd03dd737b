//! List command implementation.

use color_eyre::eyre::{Result, WrapErr};
use gwiki_core::config::ResolvedConfig;
use gwiki_core::page::PageStore;
use tabled::{Table, Tabled, settings::Style};
use tracing::warn;

#[derive(Tabled)]
struct PageRow {
    #[tabled(rename = "PAGE")]
    page: String,
    #[tabled(rename = "FORMAT")]
    format: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "DRAFT")]
    draft: String,
}

pub fn run(rc: &ResolvedConfig) -> Result<()> {
    let store = PageStore::from_config(rc);
    let names = store.list().wrap_err("could not list pages")?;

    let mut rows = Vec::with_capacity(names.len());
    for name in names {
        let page = match store.load(&name) {
            Ok(page) => page,
            Err(e) => {
                warn!("skipping {name}: {e}");
                rows.push(PageRow {
                    page: name,
                    format: "-".to_string(),
                    title: "(unreadable)".to_string(),
                    draft: "-".to_string(),
                });
                continue;
            }
        };
        let meta = page.meta();
        rows.push(PageRow {
            format: page.document.mark().to_string(),
            title: meta.title().value,
            draft: if meta.draft().value { "yes" } else { "no" }.to_string(),
            page: name,
        });
    }

    if rows.is_empty() {
        println!("(no pages found in {})", store.content_dir().display());
        return Ok(());
    }

    let count = rows.len();
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("-- {count} pages --");
    Ok(())
}
