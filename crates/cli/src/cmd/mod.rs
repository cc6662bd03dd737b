pub mod convert;
pub mod doctor;
pub mod edit;
pub mod list;
pub mod output;
pub mod view;

use std::path::Path;

use gwiki_core::config::{ConfigLoader, ResolvedConfig};

use crate::logging;

/// Load the configuration and start logging, exiting on a bad config.
pub fn setup(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&rc);
    rc
}
