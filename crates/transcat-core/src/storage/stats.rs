//! Statement execution counters.

use std::cell::Cell;

/// Number of statements executed through a [`Store`](super::Store).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatementStats {
    /// Queries that only read rows.
    pub reads: u64,
    /// Statements that may change rows or schema.
    pub writes: u64,
}

impl StatementStats {
    /// Counts accumulated since an earlier snapshot.
    pub fn since(&self, earlier: StatementStats) -> StatementStats {
        StatementStats {
            reads: self.reads.saturating_sub(earlier.reads),
            writes: self.writes.saturating_sub(earlier.writes),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounter {
    reads: Cell<u64>,
    writes: Cell<u64>,
}

impl StatsCounter {
    pub(crate) fn record_read(&self) {
        self.reads.set(self.reads.get() + 1);
    }

    pub(crate) fn record_write(&self) {
        self.writes.set(self.writes.get() + 1);
    }

    pub(crate) fn snapshot(&self) -> StatementStats {
        StatementStats {
            reads: self.reads.get(),
            writes: self.writes.get(),
        }
    }
}
