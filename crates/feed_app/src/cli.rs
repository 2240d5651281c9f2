use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::logging::LogDestination;
use crate::settings::Settings;

/// Mirror every work published by your favorite mappers into the local library.
#[derive(Debug, Parser)]
#[command(name = "mapper_feed", version, about)]
pub struct Cli {
    /// RON settings file. Defaults to `mapper_feed.ron` in the base directory.
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Directory relative paths are resolved against. Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Override the catalog base URL.
    #[arg(long, value_name = "URL")]
    pub catalog_url: Option<String>,

    /// Override the library directory.
    #[arg(long, value_name = "DIR")]
    pub library: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::Both)]
    pub log: LogDestination,

    /// Log debug output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Command-line values win over the settings file.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(url) = &self.catalog_url {
            settings.catalog_url = url.clone();
        }
        if let Some(library) = &self.library {
            settings.library_dir = library.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_file_values() {
        let cli = Cli::parse_from([
            "mapper_feed",
            "--catalog-url",
            "http://localhost:8080",
            "--library",
            "/songs",
            "-v",
        ]);
        let mut settings = Settings::default();
        cli.apply_overrides(&mut settings);

        assert_eq!(settings.catalog_url, "http://localhost:8080");
        assert_eq!(settings.library_dir, PathBuf::from("/songs"));
        assert_eq!(cli.level(), LevelFilter::Debug);
        assert_eq!(cli.log, LogDestination::Both);
    }
}
