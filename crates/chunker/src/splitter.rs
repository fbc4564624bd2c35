use crate::chunkable::Chunkable;
use crate::error::{ChunkerError, Result};
use crate::measure::Measure;
use crate::rules::SiblingGrouping;
use std::ops::Range;

/// One output window: an ordered packing of top-level units.
///
/// The derived span runs from the first item's start to the last item's end.
/// `over_budget` marks the soft-bound escape hatch: a single indivisible
/// unit that is intrinsically larger than the budget is emitted whole and
/// flagged instead of being rejected.
#[derive(Debug, Clone)]
pub struct Window<U> {
    items: Vec<U>,
    size: usize,
    over_budget: bool,
}

impl<U: Chunkable> Window<U> {
    fn new(items: Vec<U>, size: usize, over_budget: bool) -> Self {
        debug_assert!(!items.is_empty(), "windows are never empty");
        Self {
            items,
            size,
            over_budget,
        }
    }

    /// Units packed into this window, in source order
    pub fn items(&self) -> &[U] {
        &self.items
    }

    pub fn into_items(self) -> Vec<U> {
        self.items
    }

    pub fn start_byte(&self) -> usize {
        self.items[0].start_byte()
    }

    pub fn end_byte(&self) -> usize {
        self.items[self.items.len() - 1].end_byte()
    }

    /// Half-open byte span covered by this window
    pub fn byte_range(&self) -> Range<usize> {
        self.start_byte()..self.end_byte()
    }

    /// Measured size of the window span under the splitter's metric
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether this window holds a single indivisible unit larger than the
    /// budget
    pub fn is_over_budget(&self) -> bool {
        self.over_budget
    }
}

/// Recursive budget-bounded windowing over a [`Chunkable`] tree.
///
/// The splitter greedily packs sibling units left to right into windows
/// whose measured span stays within the budget, and descends into a unit's
/// own members only when that unit alone cannot fit in any window. Sibling
/// grouping is applied once per level, so fused runs are packed and split
/// as atomic units.
///
/// The algorithm is a pure function of (tree, budget, measure, grouping):
/// no shared state survives between invocations and identical inputs always
/// produce identical windows.
pub struct Splitter<'a> {
    source: &'a str,
    budget: usize,
    measure: &'a dyn Measure,
}

impl<'a> Splitter<'a> {
    pub fn new(source: &'a str, budget: usize, measure: &'a dyn Measure) -> Self {
        Self {
            source,
            budget,
            measure,
        }
    }

    /// Partition `root` into an ordered sequence of windows.
    ///
    /// Windows are emitted in source order and their spans never overlap.
    /// Every window except those flagged over budget measures within the
    /// budget.
    pub fn split<U, G>(&self, root: &U, grouping: &G) -> Result<Vec<Window<U>>>
    where
        U: Chunkable,
        G: SiblingGrouping<U>,
    {
        let size = self.unit_size(root);
        if size <= self.budget {
            return Ok(vec![Window::new(vec![root.clone()], size, false)]);
        }

        let mut windows = Vec::new();
        self.split_oversized(root, grouping, &mut windows)?;
        log::debug!(
            "split {} byte span into {} windows (budget {})",
            root.end_byte() - root.start_byte(),
            windows.len(),
            self.budget
        );
        Ok(windows)
    }

    /// Split a unit already known to exceed the budget.
    fn split_oversized<U, G>(
        &self,
        unit: &U,
        grouping: &G,
        out: &mut Vec<Window<U>>,
    ) -> Result<()>
    where
        U: Chunkable,
        G: SiblingGrouping<U>,
    {
        let members = unit.members();
        if members.is_empty() {
            // Indivisible leaf: the budget is a soft bound here.
            let size = self.unit_size(unit);
            log::warn!(
                "indivisible {} unit measures {} against budget {}; emitting oversized window",
                unit.kind(),
                size,
                self.budget
            );
            out.push(Window::new(vec![unit.clone()], size, true));
            return Ok(());
        }

        let units = self.effective_members(unit, members, grouping)?;
        self.pack(units, grouping, out)
    }

    /// Resolve the effective child sequence for one level of splitting.
    ///
    /// Grouping is a one-level transformation per call: members of an
    /// already-fused unit are used as-is, otherwise the grouping pass runs
    /// and its output is validated against its input.
    fn effective_members<U, G>(&self, unit: &U, members: Vec<U>, grouping: &G) -> Result<Vec<U>>
    where
        U: Chunkable,
        G: SiblingGrouping<U>,
    {
        if unit.is_fused() {
            return Ok(members);
        }

        let mut expected = Vec::with_capacity(members.len());
        flatten_spans(&members, &mut expected);

        let grouped = grouping.group(members);

        let mut actual = Vec::with_capacity(grouped.len());
        flatten_spans(&grouped, &mut actual);

        if expected != actual {
            return Err(ChunkerError::InconsistentGrouping {
                expected: expected.len(),
                actual: actual.len(),
            });
        }
        Ok(grouped)
    }

    /// Greedily pack a resolved sibling sequence into windows.
    fn pack<U, G>(&self, units: Vec<U>, grouping: &G, out: &mut Vec<Window<U>>) -> Result<()>
    where
        U: Chunkable,
        G: SiblingGrouping<U>,
    {
        let mut current: Vec<U> = Vec::new();

        for unit in units {
            let alone = self.unit_size(&unit);

            if alone > self.budget {
                // Cannot fit in any window: close the accumulating window
                // and splice the unit's own windows in place.
                self.flush(&mut current, out);
                self.split_oversized(&unit, grouping, out)?;
                continue;
            }

            if !current.is_empty() {
                let extended = current[0].start_byte()..unit.end_byte();
                if self.span_size(extended) > self.budget {
                    self.flush(&mut current, out);
                }
            }
            current.push(unit);
        }

        self.flush(&mut current, out);
        Ok(())
    }

    fn flush<U: Chunkable>(&self, current: &mut Vec<U>, out: &mut Vec<Window<U>>) {
        if current.is_empty() {
            return;
        }
        let items = std::mem::take(current);
        let range = items[0].start_byte()..items[items.len() - 1].end_byte();
        let size = self.span_size(range);
        out.push(Window::new(items, size, false));
    }

    fn unit_size<U: Chunkable>(&self, unit: &U) -> usize {
        self.span_size(unit.byte_range())
    }

    /// Measure a byte span of the source. The whole prospective window span
    /// is measured, not a sum of member sizes, so gaps between packed
    /// siblings count toward the budget exactly as they will appear in the
    /// emitted window.
    fn span_size(&self, range: Range<usize>) -> usize {
        self.measure.size(&self.source[range])
    }
}

/// Flatten fused units into their member spans, recursively, so a grouping
/// pass output can be compared one-to-one against its input.
fn flatten_spans<U: Chunkable>(units: &[U], spans: &mut Vec<(usize, usize)>) {
    for unit in units {
        if unit.is_fused() {
            flatten_spans(&unit.members(), spans);
        } else {
            spans.push((unit.start_byte(), unit.end_byte()));
        }
    }
}
