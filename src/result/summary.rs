/// What one replay pass handed to the sink.
///
/// `rows` counts the rows covered by delete operations (batch members
/// included); locks are counted separately since they touch no row data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub locks: usize,
    pub batches: usize,
    pub singles: usize,
    pub rows: usize,
}

impl ReplaySummary {
    /// Total operations emitted to the sink, locks included.
    pub fn operation_count(&self) -> usize {
        self.locks + self.batches + self.singles
    }

    /// Rows the emitted delete operations cover.
    pub fn row_count(&self) -> usize {
        self.rows
    }
}
