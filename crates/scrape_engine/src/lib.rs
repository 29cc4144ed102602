//! Scrape engine: fetch, decode, select and aggregate code points.
mod client;
mod decode;
mod export;
mod fetch;
mod scrape;
mod types;

pub use client::{HtmlClient, HtmlElement, Request, Response};
pub use decode::{decode_html, DecodedHtml};
pub use export::{
    ensure_output_dir, render_code_point_module, validate_module_name, write_code_point_module,
    AtomicFileWriter, ModuleNameError, PersistError,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use scrape::{
    run_scrape, CellHandler, ScrapeReport, ScrapeSettings, CODE_SELECTOR, MAX_BODY_SIZE,
    UNICODE_EMOJI_URL,
};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, ScrapeError};
