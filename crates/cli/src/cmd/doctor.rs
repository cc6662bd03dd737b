use gwiki_core::config::{ConfigLoader, default_config_path};
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let path = config.map_or_else(default_config_path, Path::to_path_buf);

    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            println!("OK   gwiki doctor");
            println!("path: {}", path.display());
            println!("profile: {}", rc.active_profile);
            println!("content_dir: {}", rc.content_dir.display());
            println!("suffix: {}", rc.suffix);
            println!("default_format: {}", rc.default_format);
            println!("date_format: {}", rc.date_format);
            println!("logging.level: {}", rc.logging.level);
            if let Some(file) = &rc.logging.file {
                println!("logging.file: {}", file.display());
            }
        }
        Err(e) => {
            println!("FAIL gwiki doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", path.display());
            }
            std::process::exit(1);
        }
    }
}
