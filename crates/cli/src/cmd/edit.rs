use std::fs;

use color_eyre::eyre::{Result, WrapErr};
use gwiki_core::config::ResolvedConfig;
use gwiki_core::page::PageStore;
use tracing::{info, warn};

use crate::EditArgs;

pub fn run(rc: &ResolvedConfig, args: &EditArgs) -> Result<()> {
    let store = PageStore::from_config(rc);
    let mut page = store.load_or_new(&args.page).wrap_err("could not open page for editing")?;

    {
        let mut meta = page.meta_mut();
        if let Some(title) = &args.title {
            meta.set_title(title);
        }
        if let Some(description) = &args.description {
            meta.set_description(description);
        }
        if let Some(tags) = &args.tags {
            meta.set_tags(tags);
        }
        if let Some(language) = &args.language {
            meta.set_language(language);
        }
        if let Some(draft) = &args.draft {
            meta.set_draft(draft);
        }
        if let Some(date) = &args.date
            && let Err(issue) = meta.set_date(date, &rc.date_format)
        {
            warn!(page = %args.page, format = %rc.date_format, "{issue}, keeping previous date");
        }
    }

    if let Some(body) = &args.body {
        page.set_body(body.as_str());
    } else if let Some(path) = &args.body_file {
        let body = fs::read_to_string(path)
            .wrap_err_with(|| format!("could not read {}", path.display()))?;
        page.set_body(body);
    }

    let path = store.save(&page).wrap_err("could not save page")?;
    info!(page = %page.name, format = %page.document.mark(), "saved page");
    println!("{}", path.display());
    Ok(())
}
