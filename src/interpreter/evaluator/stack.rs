use crate::interpreter::value::number::Number;

/// A value stack whose slots outlive a single evaluation.
///
/// Popping only moves the length down; the slot keeps its allocation and is
/// overwritten in place by the next push. Slots are created at the stack's
/// precision, so pushed values are rounded to it.
///
/// # Example
/// ```
/// use tcalc::interpreter::{evaluator::stack::EvalStack, value::number::Number};
///
/// let mut stack = EvalStack::new(64);
/// stack.push(&Number::from_parts(64, 2, 0));
/// stack.push(&Number::from_parts(64, 3, 0));
/// assert_eq!(stack.len(), 2);
/// stack.truncate(1);
/// assert_eq!(stack.top().map(Number::string).as_deref(), Some("2"));
/// ```
#[derive(Debug, Clone)]
pub struct EvalStack {
    slots:     Vec<Number>,
    len:       usize,
    precision: u32,
}

impl EvalStack {
    #[must_use]
    pub const fn new(precision: u32) -> Self {
        Self { slots: Vec::new(),
               len: 0,
               precision }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, including the ones above the top.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Copies `value` into the next slot.
    pub fn push(&mut self, value: &Number) {
        if let Some(slot) = self.slots.get_mut(self.len) {
            slot.set(value);
        } else {
            let mut slot = Number::new(self.precision);
            slot.set(value);
            self.slots.push(slot);
        }
        self.len += 1;
    }

    #[must_use]
    pub fn top(&self) -> Option<&Number> {
        self.len.checked_sub(1).map(|index| &self.slots[index])
    }

    pub fn top_mut(&mut self) -> Option<&mut Number> {
        self.len.checked_sub(1).map(|index| &mut self.slots[index])
    }

    /// The second value from the top, mutably, and the top value.
    pub fn top_two_mut(&mut self) -> Option<(&mut Number, &Number)> {
        if self.len < 2 {
            return None;
        }
        let (below, top) = self.slots[..self.len].split_at_mut(self.len - 1);
        Some((&mut below[below.len() - 1], &top[0]))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Number> {
        self.slots[..self.len].get(index)
    }

    /// The values from `start` up to the top.
    pub fn above_mut(&mut self, start: usize) -> &mut [Number] {
        let start = start.min(self.len);
        &mut self.slots[start..self.len]
    }

    /// Drops the values above `len`, keeping their slots.
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}
