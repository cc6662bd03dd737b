use color_eyre::eyre::{Result, WrapErr};
use gwiki_core::config::ResolvedConfig;
use gwiki_core::page::PageStore;
use tracing::info;

use crate::ConvertArgs;

pub fn run(rc: &ResolvedConfig, args: &ConvertArgs) -> Result<()> {
    let store = PageStore::from_config(rc);
    let mut page = store.load(&args.page).wrap_err("could not convert page")?;

    let from = page.document.mark();
    if from == args.to {
        println!("{} already uses {} front matter", page.name, from);
        return Ok(());
    }

    page.document.convert(args.to);
    let path = store
        .save(&page)
        .wrap_err_with(|| format!("could not write {} front matter", args.to))?;
    info!(page = %page.name, %from, to = %args.to, "converted front matter");
    println!("{}: {} -> {}", path.display(), from, args.to);
    Ok(())
}
