use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use codepoint_core::{
    parse_code_point_text, update, CodePoint, CodePointCollector, RunMsg, RunStatus, Stage,
    DEFAULT_THRESHOLD,
};
use emoji_logging::{emoji_debug, emoji_error, emoji_info};

use crate::client::HtmlClient;
use crate::fetch::{FetchSettings, Fetcher};
use crate::ScrapeError;

pub const UNICODE_EMOJI_URL: &str = "https://www.unicode.org/emoji/charts/full-emoji-list.html";
pub const CODE_SELECTOR: &str = "td.code";

/// The full emoji list is tens of megabytes and only grows, so the cap is generous.
pub const MAX_BODY_SIZE: u64 = 128 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub url: String,
    pub selector: String,
    /// Only code points strictly above this value are collected.
    pub threshold: u32,
    pub allow_revisit: bool,
    pub fetch: FetchSettings,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            url: UNICODE_EMOJI_URL.to_string(),
            selector: CODE_SELECTOR.to_string(),
            threshold: DEFAULT_THRESHOLD,
            allow_revisit: true,
            fetch: FetchSettings {
                max_bytes: MAX_BODY_SIZE,
                ..FetchSettings::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeReport {
    pub status: RunStatus,
    pub stage: Stage,
    /// Number of cells whose code point passed the threshold, duplicates included.
    pub iterated: usize,
    pub code_points: Vec<CodePoint>,
}

impl ScrapeReport {
    pub fn collected(&self) -> usize {
        self.code_points.len()
    }
}

/// Per-cell extraction shared by every element callback of one run.
#[derive(Debug)]
pub struct CellHandler {
    threshold: u32,
    collector: CodePointCollector,
    iterated: AtomicUsize,
    parse_failed: AtomicBool,
}

impl CellHandler {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            collector: CodePointCollector::new(),
            iterated: AtomicUsize::new(0),
            parse_failed: AtomicBool::new(false),
        }
    }

    /// Parse one cell's text and collect it if it passes the threshold.
    ///
    /// Parse failures are logged and remembered; they never stop the run.
    pub fn handle(&self, text: &str) {
        match parse_code_point_text(text) {
            Ok(code) if code.exceeds(self.threshold) => {
                let ordinal = self.iterated.fetch_add(1, Ordering::SeqCst) + 1;
                self.collector.push(code);
                emoji_info!("[{}] {}", ordinal, code);
            }
            Ok(code) => emoji_debug!("Skipping {} at or below threshold", code),
            Err(err) => {
                emoji_error!("{}", err);
                self.parse_failed.store(true, Ordering::SeqCst);
            }
        }
    }

    pub fn iterated(&self) -> usize {
        self.iterated.load(Ordering::SeqCst)
    }

    pub fn collector(&self) -> &CodePointCollector {
        &self.collector
    }

    pub fn status(&self) -> RunStatus {
        if self.parse_failed.load(Ordering::SeqCst) {
            RunStatus::ParseFailures
        } else {
            RunStatus::Success
        }
    }
}

/// Visit the configured page, collect code points from matching cells and
/// print the summary to `out`.
///
/// A failed visit yields a report with [`RunStatus::VisitFailed`] and prints
/// nothing. `Err` is reserved for configuration errors such as an invalid
/// selector.
pub async fn run_scrape<W: Write>(
    settings: &ScrapeSettings,
    fetcher: Arc<dyn Fetcher>,
    out: &mut W,
) -> Result<ScrapeReport, ScrapeError> {
    let handler = Arc::new(CellHandler::new(settings.threshold));
    let mut client = HtmlClient::new(fetcher).allow_revisit(settings.allow_revisit);

    let cells = Arc::clone(&handler);
    client.on_html(&settings.selector, move |element| cells.handle(&element.text))?;
    client.on_error(|request, response, err| {
        let response = response.map_or_else(
            || "<none>".to_string(),
            |response| response.metadata.status.to_string(),
        );
        emoji_error!(
            "Request URL: {} failed with response: {} Error: {}",
            request.url,
            response,
            err
        );
    });
    client.on_request(|request| emoji_info!("Visiting {}", request.url));

    let mut stage = advance(Stage::Idle, RunMsg::VisitStarted);
    if let Err(err) = client.visit(&settings.url).await {
        emoji_error!("{}", err);
        return Ok(ScrapeReport {
            status: RunStatus::VisitFailed,
            stage: advance(stage, RunMsg::VisitFailed),
            iterated: handler.iterated(),
            code_points: Vec::new(),
        });
    }
    stage = advance(stage, RunMsg::ElementsScheduled);

    client.wait().await;
    stage = advance(stage, RunMsg::WorkDrained);

    let report = ScrapeReport {
        status: handler.status(),
        stage,
        iterated: handler.iterated(),
        code_points: handler.collector().snapshot(),
    };
    if let Err(err) = print_summary(out, &report) {
        emoji_error!("Failed to print summary: {}", err);
        return Ok(report);
    }

    Ok(ScrapeReport {
        stage: advance(report.stage, RunMsg::SummaryPrinted),
        ..report
    })
}

fn advance(stage: Stage, msg: RunMsg) -> Stage {
    let next = update(stage, msg);
    emoji_debug!("Scrape stage {:?} -> {:?}", stage, next);
    next
}

fn print_summary<W: Write>(out: &mut W, report: &ScrapeReport) -> io::Result<()> {
    writeln!(out, "Iterated  : {}", report.iterated)?;
    writeln!(out, "Collected : {}", report.collected())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_counts_only_retained_cells() {
        let handler = CellHandler::new(DEFAULT_THRESHOLD);
        handler.handle("U+1F600 GRINNING FACE");
        handler.handle("U+0041 LATIN A");
        handler.handle("U+1F600 GRINNING FACE");

        assert_eq!(handler.iterated(), 2);
        assert_eq!(handler.collector().size(), 1);
        assert_eq!(handler.status(), RunStatus::Success);
    }

    #[test]
    fn handler_remembers_parse_failures() {
        let handler = CellHandler::new(DEFAULT_THRESHOLD);
        handler.handle("NOTHEX garbage");
        handler.handle("U+1F601");

        assert_eq!(handler.status(), RunStatus::ParseFailures);
        assert_eq!(handler.iterated(), 1);
    }

    #[test]
    fn default_settings_target_the_unicode_chart() {
        let settings = ScrapeSettings::default();
        assert_eq!(settings.url, UNICODE_EMOJI_URL);
        assert_eq!(settings.selector, "td.code");
        assert_eq!(settings.fetch.max_bytes, 128 * 1024 * 1024);
        assert!(settings.allow_revisit);
        assert!(settings.fetch.request_timeout.is_none());
    }
}
