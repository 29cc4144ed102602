/// Outcome of a scrape run, mapped to the process exit code.
///
/// Combining two statuses keeps the more severe one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum RunStatus {
    #[default]
    Success,
    /// At least one code cell failed to parse.
    ParseFailures,
    /// The scraped table could not be written to the requested module file.
    ExportFailed,
    /// The initial page visit failed; nothing was reported.
    VisitFailed,
    /// An unexpected fault reached the top-level boundary.
    Fault,
}

impl RunStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Success => 0,
            RunStatus::ParseFailures | RunStatus::ExportFailed => 1,
            RunStatus::VisitFailed => 2,
            RunStatus::Fault => 100,
        }
    }

    pub fn combine(self, other: RunStatus) -> RunStatus {
        self.max(other)
    }
}
