//! Structure tree traversal.
//!
//! Pre-order traversal visits elements in logical reading order.

use super::types::{StructElem, StructType};

/// Pre-order iterator over structure elements.
///
/// Yields each element with its depth, top-level elements at depth 0.
pub struct Descendants<'a> {
    stack: Vec<(usize, &'a StructElem)>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(roots: &'a [StructElem]) -> Self {
        Self {
            stack: roots.iter().rev().map(|elem| (0, elem)).collect(),
        }
    }

    /// Restrict the walk to elements whose standard role satisfies `predicate`.
    pub fn with_role<F>(self, predicate: F) -> impl Iterator<Item = (usize, &'a StructElem)>
    where
        F: Fn(&StructType) -> bool,
    {
        self.filter(move |(_, elem)| elem.role().is_some_and(&predicate))
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (usize, &'a StructElem);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, elem) = self.stack.pop()?;
        // Push children reversed so the first child is visited next
        self.stack
            .extend(elem.kids.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, elem))
    }
}
