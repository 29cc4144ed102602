/// Lifecycle of a single scrape run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    Visiting,
    ParsingElements,
    Drained,
    Reported,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMsg {
    /// The request for the target page is about to be issued.
    VisitStarted,
    /// The page was fetched and matched elements were handed to workers.
    ElementsScheduled,
    /// The visit call itself failed.
    VisitFailed,
    /// Every scheduled element callback has finished.
    WorkDrained,
    /// The summary has been printed.
    SummaryPrinted,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Reported | Stage::Aborted)
    }
}

/// Pure transition function. Messages that do not apply to the current stage
/// leave it unchanged.
pub fn update(stage: Stage, msg: RunMsg) -> Stage {
    match (stage, msg) {
        (Stage::Idle, RunMsg::VisitStarted) => Stage::Visiting,
        (Stage::Visiting, RunMsg::ElementsScheduled) => Stage::ParsingElements,
        (Stage::Visiting, RunMsg::VisitFailed) => Stage::Aborted,
        (Stage::Visiting | Stage::ParsingElements, RunMsg::WorkDrained) => Stage::Drained,
        (Stage::Drained, RunMsg::SummaryPrinted) => Stage::Reported,
        (current, _) => current,
    }
}
