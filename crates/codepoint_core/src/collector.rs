use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::CodePoint;

/// Thread-safe deduplicating set of code points gathered during one scrape.
///
/// Every read and write goes through the same mutex, so a snapshot reflects
/// all pushes that completed before it.
#[derive(Debug, Default)]
pub struct CodePointCollector {
    codes: Mutex<HashSet<CodePoint>>,
}

impl CodePointCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `code`; pushing a value already present is a no-op.
    pub fn push(&self, code: CodePoint) {
        self.lock().insert(code);
    }

    pub fn size(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, code: CodePoint) -> bool {
        self.lock().contains(&code)
    }

    /// All members in ascending order.
    pub fn snapshot(&self) -> Vec<CodePoint> {
        let mut codes: Vec<CodePoint> = self.lock().iter().copied().collect();
        codes.sort_unstable();
        codes
    }

    // A panicking writer cannot leave the set half-inserted, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, HashSet<CodePoint>> {
        self.codes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
