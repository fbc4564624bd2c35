use crate::chunkable::Chunkable;
use crate::error::{ChunkerError, Result};
use std::fmt;
use tree_sitter::Point;

/// A virtual node fusing multiple sibling units into a single atomic unit.
///
/// The primary use case is binding decorators, attributes, and doc comments
/// to the definition they annotate, so the splitter never separates them.
/// The group spans from the first member's start to the last member's end;
/// gaps between members (blank lines, skipped trivia) are permitted and stay
/// inside the span.
///
/// A group is a value: constructed once per grouping decision, immutable,
/// owned by the splitting invocation that created it, and discarded with it.
///
/// Invariant: `members` is never empty.
#[derive(Clone)]
pub struct GroupedNode<U> {
    members: Vec<U>,
}

impl<U: Chunkable> GroupedNode<U> {
    /// Wrap an ordered run of sibling units.
    ///
    /// Fails with [`ChunkerError::InvalidGroup`] on an empty sequence; an
    /// empty group is a programming error in the grouping rule, not a
    /// recoverable condition.
    pub fn new(members: Vec<U>) -> Result<Self> {
        if members.is_empty() {
            return Err(ChunkerError::InvalidGroup);
        }
        Ok(Self { members })
    }

    /// The wrapped units, usable as children for recursive splitting
    pub fn members(&self) -> &[U] {
        &self.members
    }

    pub fn into_members(self) -> Vec<U> {
        self.members
    }

    /// First member's start byte
    pub fn start_byte(&self) -> usize {
        self.members[0].start_byte()
    }

    /// Last member's end byte
    pub fn end_byte(&self) -> usize {
        self.members[self.members.len() - 1].end_byte()
    }

    pub fn start_position(&self) -> Point {
        self.members[0].start_position()
    }

    pub fn end_position(&self) -> Point {
        self.members[self.members.len() - 1].end_position()
    }

    /// Kind of the primary (last) member of the group.
    ///
    /// Grouping exists to protect the definition at the end of the run, so
    /// downstream consumers asking "what kind of unit is this" see the
    /// definition's kind, not a decorator's.
    pub fn kind(&self) -> &str {
        self.members[self.members.len() - 1].kind()
    }

    /// Join each member's slice of `source` with a single newline.
    ///
    /// This is an approximation: when members are non-adjacent the result
    /// disagrees with the source text. The authoritative content of a group
    /// is always the `[start_byte, end_byte)` slice of the source buffer.
    pub fn reconstructed_text(&self, source: &str) -> String {
        let parts: Vec<&str> = self
            .members
            .iter()
            .map(|m| &source[m.byte_range()])
            .collect();
        parts.join("\n")
    }
}

impl<U: Chunkable> fmt::Debug for GroupedNode<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<&str> = self.members.iter().map(Chunkable::kind).collect();
        write!(
            f,
            "GroupedNode({:?}, bytes={}..{})",
            kinds,
            self.start_byte(),
            self.end_byte()
        )
    }
}
