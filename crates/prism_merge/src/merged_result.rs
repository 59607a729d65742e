use prism_common::{Datum, PrismResult};

/// Pull-based cursor over a merged result set.
///
/// The proxy loop drives every result (locally computed or streamed from
/// shards) through this one contract:
///
/// 1. `next()` advances to the following row and reports whether one is
///    available. Once it has returned `false`, it keeps returning `false`;
///    advancing past exhaustion has no side effect.
/// 2. `value(column_index)` reads a cell of the current row, 1-based,
///    matching the query-header sequence advertised for the statement. It is
///    only valid while positioned on a row: calling it before the first
///    successful `next()`, or after exhaustion, is a programming error and
///    fails with `MergeError::NoCurrentRow`.
///
/// Implementations are session-scoped and driven sequentially; they need no
/// interior locking.
pub trait MergedResult {
    fn next(&mut self) -> PrismResult<bool>;

    fn value(&self, column_index: usize) -> PrismResult<Datum>;
}
