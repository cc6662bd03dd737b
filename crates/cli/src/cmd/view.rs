use color_eyre::eyre::{Result, WrapErr};
use gwiki_core::config::ResolvedConfig;
use gwiki_core::page::PageStore;

use super::output::PageOutput;
use crate::ViewArgs;

pub fn run(rc: &ResolvedConfig, args: &ViewArgs) -> Result<()> {
    let store = PageStore::from_config(rc);
    let page = store.load(&args.page).wrap_err("could not view page")?;
    let out = PageOutput::from_page(&page, &rc.date_format);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("page:        {}", out.page);
    println!("format:      {}", out.format);
    println!("title:       {}", out.title);
    println!("description: {}", out.description);
    println!("tags:        {}", out.tags.join(" "));
    println!("date:        {}", out.date);
    println!("language:    {}", out.language);
    println!("draft:       {}", out.draft);
    println!();
    print!("{}", page.body());
    Ok(())
}
