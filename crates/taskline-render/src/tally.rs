//! Per-status task counts

use taskline_document::{DocumentRecord, Status};

/// Counts of documents per recognized status
///
/// `total` covers every record, including those whose status label is not
/// recognized, so the four buckets may sum to less than `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    /// Records with status `pending`
    pub pending: usize,
    /// Records with status `in-progress`
    pub in_progress: usize,
    /// Records with status `completed`
    pub completed: usize,
    /// Records with status `cancelled`
    pub cancelled: usize,
    /// All records
    pub total: usize,
}

impl StatusTally {
    /// Tally a record list
    #[must_use]
    pub fn from_records(records: &[DocumentRecord]) -> Self {
        records.iter().fold(
            Self {
                total: records.len(),
                ..Self::default()
            },
            |mut tally, record| {
                match record.status {
                    Status::Pending => tally.pending += 1,
                    Status::InProgress => tally.in_progress += 1,
                    Status::Completed => tally.completed += 1,
                    Status::Cancelled => tally.cancelled += 1,
                    Status::Other(_) => {}
                }
                tally
            },
        )
    }

    /// Count for one status (zero for unrecognized labels)
    #[must_use]
    pub fn count(&self, status: &Status) -> usize {
        match status {
            Status::Pending => self.pending,
            Status::InProgress => self.in_progress,
            Status::Completed => self.completed,
            Status::Cancelled => self.cancelled,
            Status::Other(_) => 0,
        }
    }

    /// Records with a recognized status
    #[inline]
    #[must_use]
    pub fn recognized(&self) -> usize {
        self.pending + self.in_progress + self.completed + self.cancelled
    }

    /// Records whose status fell outside every bucket
    #[inline]
    #[must_use]
    pub fn unrecognized(&self) -> usize {
        self.total - self.recognized()
    }
}
