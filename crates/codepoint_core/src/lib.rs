//! Codepoint core: pure data model for the emoji scraper.
mod code_point;
mod collector;
mod stage;
mod status;

pub use code_point::{parse_code_point_text, CodePoint, ParseCodePointError, DEFAULT_THRESHOLD};
pub use collector::CodePointCollector;
pub use stage::{update, RunMsg, Stage};
pub use status::RunStatus;
