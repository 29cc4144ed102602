mod cli;

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use codepoint_core::RunStatus;
use emoji_logging::{emoji_error, emoji_info};
use scrape_engine::{run_scrape, write_code_point_module, ReqwestFetcher};

/// `EX_USAGE` from sysexits.h, kept apart from the visit-failure code.
const USAGE_EXIT_CODE: i32 = 64;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            process::exit(if err.use_stderr() { USAGE_EXIT_CODE } else { 0 });
        }
    };
    emoji_logging::initialize(args.log_destination(), args.log_level());

    let status = match panic::catch_unwind(AssertUnwindSafe(|| run(&args))) {
        Ok(Ok(status)) => status,
        Ok(Err(err)) => {
            emoji_error!("{err:#}");
            RunStatus::Fault
        }
        Err(payload) => {
            emoji_error!("Panic Recovered: {}", panic_message(payload.as_ref()));
            RunStatus::Fault
        }
    };
    process::exit(status.exit_code());
}

fn run(args: &Args) -> Result<RunStatus> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let settings = args.scrape_settings();
    let fetcher = Arc::new(ReqwestFetcher::new(settings.fetch.clone()));
    let report = runtime
        .block_on(run_scrape(&settings, fetcher, &mut io::stdout()))
        .context("scrape could not start")?;

    let mut status = report.status;
    if let Some(out) = args.out.as_ref().filter(|_| status != RunStatus::VisitFailed) {
        match write_code_point_module(out, &args.module, &settings.url, &report.code_points) {
            Ok(path) => emoji_info!(
                "Wrote {} code points to {}",
                report.collected(),
                path.display()
            ),
            Err(err) => {
                emoji_error!("Failed to write {}: {}", out.display(), err);
                status = status.combine(RunStatus::ExportFailed);
            }
        }
    }
    Ok(status)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
