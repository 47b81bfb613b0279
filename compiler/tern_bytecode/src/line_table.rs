//! Instruction offset to source span mapping.

use tern_ir::Span;

/// Ordered `(offset, span)` entries, one per emitted instruction.
///
/// An entry covers every byte from its offset up to the next entry's
/// offset, so operands resolve to the span of their instruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineTable {
    entries: Vec<(u32, Span)>,
}

impl LineTable {
    pub fn new() -> Self {
        LineTable::default()
    }

    /// Record that the instruction starting at `offset` came from `span`.
    ///
    /// Offsets must be pushed in increasing order. Consecutive instructions
    /// from the same span share one entry.
    pub fn push(&mut self, offset: usize, span: Span) {
        let offset = u32::try_from(offset).unwrap_or(u32::MAX);
        debug_assert!(self.entries.last().map_or(true, |(last, _)| *last <= offset));
        if self.entries.last().is_some_and(|(_, last)| *last == span) {
            return;
        }
        if self.entries.last().is_some_and(|(last, _)| *last == offset) {
            self.entries.pop();
        }
        self.entries.push((offset, span));
    }

    /// Span of the instruction covering `offset`.
    pub fn span_at(&self, offset: usize) -> Option<Span> {
        let offset = u32::try_from(offset).ok()?;
        let idx = match self.entries.binary_search_by_key(&offset, |(at, _)| *at) {
            Ok(exact) => exact,
            Err(0) => return None,
            Err(insert) => insert - 1,
        };
        Some(self.entries[idx].1)
    }

    /// Drop entries at or past `offset` (used when the compiler removes a
    /// trailing instruction).
    pub fn truncate(&mut self, offset: usize) {
        let offset = u32::try_from(offset).unwrap_or(u32::MAX);
        self.entries.retain(|(at, _)| *at < offset);
    }

    pub fn entries(&self) -> &[(u32, Span)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
