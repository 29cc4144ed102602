//! Command-line interface for the scraper.

use std::path::PathBuf;

use clap::Parser;
use emoji_logging::{LevelFilter, LogDestination};
use scrape_engine::{
    validate_module_name, ScrapeSettings, CODE_SELECTOR, MAX_BODY_SIZE, UNICODE_EMOJI_URL,
};
use scraper::Selector;

/// Collects emoji code points from the Unicode full emoji list
#[derive(Parser, Debug)]
#[command(name = "emojiscrape", author, version, about, long_about = None)]
pub struct Args {
    /// Page to scrape
    #[arg(long, default_value = UNICODE_EMOJI_URL)]
    pub url: String,

    /// CSS selector for the cells holding code point text
    #[arg(long, default_value = CODE_SELECTOR, value_parser = parse_selector)]
    pub selector: String,

    /// Upper bound on the response body in bytes
    #[arg(long, default_value_t = MAX_BODY_SIZE)]
    pub max_bytes: u64,

    /// Only code points above this value are collected
    #[arg(long, default_value_t = codepoint_core::DEFAULT_THRESHOLD)]
    pub threshold: u32,

    /// Write the collected code points as a Rust module to this file
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Name of the generated module
    #[arg(short = 'm', long = "module", default_value = "emoji_table", value_parser = parse_module_name)]
    pub module: String,

    /// Also write the log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn scrape_settings(&self) -> ScrapeSettings {
        let mut settings = ScrapeSettings {
            url: self.url.clone(),
            selector: self.selector.clone(),
            threshold: self.threshold,
            ..ScrapeSettings::default()
        };
        settings.fetch.max_bytes = self.max_bytes;
        settings
    }

    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

fn parse_selector(raw: &str) -> Result<String, String> {
    Selector::parse(raw)
        .map(|_| raw.to_string())
        .map_err(|err| err.to_string())
}

fn parse_module_name(raw: &str) -> Result<String, String> {
    validate_module_name(raw)
        .map(|()| raw.to_string())
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_unicode_chart() {
        let args = Args::try_parse_from(["emojiscrape"]).unwrap();
        let settings = args.scrape_settings();
        assert_eq!(settings.url, UNICODE_EMOJI_URL);
        assert_eq!(settings.selector, "td.code");
        assert_eq!(settings.threshold, 100_000);
        assert_eq!(settings.fetch.max_bytes, MAX_BODY_SIZE);
        assert!(settings.allow_revisit);
        assert_eq!(args.module, "emoji_table");
        assert!(args.out.is_none());
        assert_eq!(args.log_destination(), LogDestination::Terminal);
        assert_eq!(args.log_level(), LevelFilter::Info);
    }

    #[test]
    fn overrides_flow_into_settings() {
        let args = Args::try_parse_from([
            "emojiscrape",
            "--url",
            "http://localhost:8080/list.html",
            "--max-bytes",
            "1024",
            "--threshold",
            "0",
            "--out",
            "table.rs",
            "--module",
            "codes",
            "-v",
        ])
        .unwrap();
        let settings = args.scrape_settings();
        assert_eq!(settings.url, "http://localhost:8080/list.html");
        assert_eq!(settings.fetch.max_bytes, 1024);
        assert_eq!(settings.threshold, 0);
        assert_eq!(args.out, Some(PathBuf::from("table.rs")));
        assert_eq!(args.module, "codes");
        assert_eq!(args.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn rejects_invalid_module_and_selector() {
        assert!(Args::try_parse_from(["emojiscrape", "--module", "emoji-table"]).is_err());
        assert!(Args::try_parse_from(["emojiscrape", "--selector", "td["]).is_err());
    }
}
