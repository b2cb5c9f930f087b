/// Result of a single sync iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The ledger indexer has not caught up with the chain yet.
    CatchingUp,
    /// The cursor already equals the chain height.
    Idle { cursor: u64 },
    /// One block was merged and the cursor moved to `height`.
    Processed(BlockReport),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockReport {
    pub height: u64,
    pub messages: usize,
    pub issuances: usize,
    /// Issuances that produced a directive and were written.
    pub merged: usize,
    /// Issuance messages whose bindings could not be parsed.
    pub malformed: usize,
    /// Issuances skipped because merging them fails the same way on every
    /// attempt, such as an unreadable asset document.
    pub rejected: usize,
}
