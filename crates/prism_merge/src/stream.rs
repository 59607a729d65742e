//! Streaming merge variants: cursors that pull from open per-shard result
//! streams instead of materializing rows up front.
//!
//! Ordering and grouping across shards belong to the routed-query engine;
//! what lives here is the plumbing the proxy loop needs (sequential
//! concatenation of shard streams, plus offset/row-count pagination), each
//! honoring the same exhaustion contract as the local variant.

use std::collections::VecDeque;

use prism_common::{Datum, MergeError, PrismResult};

use crate::merged_result::MergedResult;

/// One shard's open result stream. Same pull shape as [`MergedResult`], but
/// scoped to a single backend: the merge variants below are what unify
/// several of these into one logical cursor.
pub trait ShardQueryResult {
    fn next(&mut self) -> PrismResult<bool>;

    fn value(&self, column_index: usize) -> PrismResult<Datum>;
}

/// In-memory shard result set. Backs tests and locally synthesized streams.
pub struct MemoryQueryResult {
    rows: Vec<Vec<Datum>>,
    index: usize,
    positioned: bool,
}

impl MemoryQueryResult {
    pub fn new(rows: Vec<Vec<Datum>>) -> Self {
        Self {
            rows,
            index: 0,
            positioned: false,
        }
    }
}

impl ShardQueryResult for MemoryQueryResult {
    fn next(&mut self) -> PrismResult<bool> {
        if self.index < self.rows.len() {
            self.index += 1;
            self.positioned = true;
            Ok(true)
        } else {
            self.positioned = false;
            Ok(false)
        }
    }

    fn value(&self, column_index: usize) -> PrismResult<Datum> {
        if !self.positioned {
            return Err(MergeError::NoCurrentRow.into());
        }
        let row = &self.rows[self.index - 1];
        row.get(column_index - 1)
            .cloned()
            .ok_or_else(|| MergeError::ColumnOutOfBounds(column_index).into())
    }
}

/// Sequential concatenation of per-shard streams: drain the first shard's
/// rows, then the second's, and so on. The cheapest streaming merge, used
/// when the statement imposes no cross-shard order.
pub struct IteratorStreamMergedResult {
    pending: VecDeque<Box<dyn ShardQueryResult>>,
    current: Option<Box<dyn ShardQueryResult>>,
}

impl IteratorStreamMergedResult {
    pub fn new(shard_results: Vec<Box<dyn ShardQueryResult>>) -> Self {
        Self {
            pending: shard_results.into(),
            current: None,
        }
    }
}

impl MergedResult for IteratorStreamMergedResult {
    fn next(&mut self) -> PrismResult<bool> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if current.next()? {
                    return Ok(true);
                }
                self.current = None;
            }
            match self.pending.pop_front() {
                Some(next_shard) => self.current = Some(next_shard),
                None => return Ok(false),
            }
        }
    }

    fn value(&self, column_index: usize) -> PrismResult<Datum> {
        match &self.current {
            Some(current) => current.value(column_index),
            None => Err(MergeError::NoCurrentRow.into()),
        }
    }
}

/// `LIMIT offset, row_count` applied across the merged stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct Limit {
    pub offset: u64,
    /// `None` = no row cap, offset only.
    pub row_count: Option<u64>,
}

/// Pagination decorator over any inner cursor. The offset is skipped at
/// construction time, so the first `next()` lands on the first visible row.
pub struct LimitPaginatedMergedResult {
    inner: Box<dyn MergedResult>,
    remaining: Option<u64>,
    positioned: bool,
}

impl LimitPaginatedMergedResult {
    pub fn new(mut inner: Box<dyn MergedResult>, limit: Limit) -> PrismResult<Self> {
        for _ in 0..limit.offset {
            if !inner.next()? {
                break;
            }
        }
        Ok(Self {
            inner,
            remaining: limit.row_count,
            positioned: false,
        })
    }
}

impl MergedResult for LimitPaginatedMergedResult {
    fn next(&mut self) -> PrismResult<bool> {
        if self.remaining == Some(0) {
            self.positioned = false;
            return Ok(false);
        }
        if self.inner.next()? {
            if let Some(remaining) = self.remaining.as_mut() {
                *remaining -= 1;
            }
            self.positioned = true;
            Ok(true)
        } else {
            self.remaining = Some(0);
            self.positioned = false;
            Ok(false)
        }
    }

    fn value(&self, column_index: usize) -> PrismResult<Datum> {
        if !self.positioned {
            return Err(MergeError::NoCurrentRow.into());
        }
        self.inner.value(column_index)
    }
}
