use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(
    name = "downloads_app",
    about = "Extract download records from a saved CMS collection page"
)]
pub struct Cli {
    /// Saved HTML page holding the collection
    pub snapshot: PathBuf,
    /// RON configuration file (default: ./downloads.ron when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Name of the slot wrapping the collection
    #[arg(long, conflicts_with = "no_slot")]
    pub slot: Option<String>,
    /// Search the whole document instead of a named slot
    #[arg(long)]
    pub no_slot: bool,
    /// Base for resolving relative download links
    #[arg(long)]
    pub base_url: Option<String>,
    /// Directory receiving the records and manifest
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
    /// Also export records without a usable name or link
    #[arg(long)]
    pub include_dropped: bool,
    /// Write logs to this file as well as the terminal
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log per-item decisions
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags win over file values.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(slot) = &self.slot {
            config.source.slot_name = Some(slot.clone());
        }
        if self.no_slot {
            config.source.slot_name = None;
        }
        if let Some(base_url) = &self.base_url {
            config.source.base_url = Some(base_url.clone());
        }
        if let Some(out_dir) = &self.out_dir {
            config.output_dir = out_dir.clone();
        }
        if self.include_dropped {
            config.export.include_dropped = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "downloads_app",
            "page.html",
            "--slot",
            "docs",
            "--base-url",
            "https://www.example.com/",
            "-o",
            "exports",
            "--include-dropped",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.source.slot_name.as_deref(), Some("docs"));
        assert_eq!(
            config.source.base_url.as_deref(),
            Some("https://www.example.com/")
        );
        assert_eq!(config.output_dir, PathBuf::from("exports"));
        assert!(config.export.include_dropped);
    }

    #[test]
    fn no_flags_keep_config() {
        let cli = Cli::try_parse_from(["downloads_app", "page.html"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn no_slot_clears_the_slot_name() {
        let cli = Cli::try_parse_from(["downloads_app", "page.html", "--no-slot"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.source.slot_name, None);
    }

    #[test]
    fn slot_and_no_slot_conflict() {
        let result =
            Cli::try_parse_from(["downloads_app", "page.html", "--slot", "a", "--no-slot"]);
        assert!(result.is_err());
    }
}
