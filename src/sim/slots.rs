//! Null-marked entity collections
//!
//! Entities are removed during a tick by clearing their slot, never by
//! shifting the vector, so indices held by an in-progress pass stay valid.
//! `compact` runs once at the end of the tick to reclaim the holes.

/// Drop every empty slot, keeping the relative order of the rest
pub fn compact<T>(slots: &mut Vec<Option<T>>) {
    slots.retain(Option::is_some);
}

/// An ordered collection whose entries can be soft-deleted mid-iteration
#[derive(Debug, Clone)]
pub struct Slots<T> {
    entries: Vec<Option<T>>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Slots<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a live entry. Entries pushed mid-tick land past the end of any
    /// index range captured before the push.
    pub fn push(&mut self, value: T) {
        self.entries.push(Some(value));
    }

    /// Number of slots, live or not
    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of live entries
    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entries.get_mut(index).and_then(Option::as_mut)
    }

    /// Soft-delete: empty the slot and hand back what was there
    pub fn take(&mut self, index: usize) -> Option<T> {
        self.entries.get_mut(index).and_then(Option::take)
    }

    /// Put an entry back into a slot previously emptied with `take`
    pub fn restore(&mut self, index: usize, value: T) {
        if let Some(slot) = self.entries.get_mut(index) {
            *slot = Some(value);
        }
    }

    /// Live entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().flatten()
    }

    /// Live entries with their slot index
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|v| (i, v)))
    }

    pub fn iter_indexed_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.entries
            .iter_mut()
            .enumerate()
            .filter_map(|(i, e)| e.as_mut().map(|v| (i, v)))
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Reclaim emptied slots
    pub fn compact(&mut self) {
        compact(&mut self.entries);
    }

    /// True if no slot is empty
    pub fn is_compact(&self) -> bool {
        self.entries.iter().all(Option::is_some)
    }
}

impl<T> FromIterator<T> for Slots<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Some).collect(),
        }
    }
}
