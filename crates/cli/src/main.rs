mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use gwiki_core::frontmatter::FormatMark;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gwiki", version, about = "Wiki pages with YAML, TOML or JSON front matter")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// Show the metadata and content of a page
    View(ViewArgs),

    /// Create or update a page
    Edit(EditArgs),

    /// List all pages under the content directory
    List,

    /// Rewrite a page's front matter in another format
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Page name, e.g. "index" or "blog/first-post"
    pub page: String,

    /// Print the typed fields as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Page name, e.g. "index" or "blog/first-post"
    pub page: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Whitespace separated list of tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Date in the profile's date format
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub language: Option<String>,

    /// "true" marks the page as draft, anything else publishes it
    #[arg(long)]
    pub draft: Option<String>,

    /// New page content
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read new page content from a file
    #[arg(long)]
    pub body_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Page name, e.g. "index" or "blog/first-post"
    pub page: String,

    /// Target format: yaml, toml or json
    #[arg(long)]
    pub to: FormatMark,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    let result = match cli.command {
        Commands::Doctor => {
            cmd::doctor::run(config, profile);
            Ok(())
        }
        Commands::View(args) => cmd::view::run(&cmd::setup(config, profile), &args),
        Commands::Edit(args) => cmd::edit::run(&cmd::setup(config, profile), &args),
        Commands::List => cmd::list::run(&cmd::setup(config, profile)),
        Commands::Convert(args) => cmd::convert::run(&cmd::setup(config, profile), &args),
    };
    logging::shutdown();
    result
}
