/// Append-only storage whose entries may be vacated but never reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Slots<T>(Vec<Option<T>>);

impl<T> Slots<T> {
    pub fn push(&mut self, item: T) -> u64 {
        self.0.push(Some(item));
        // the vector is never shrunk so the index of the last entry is its length minus one
        (self.0.len() - 1) as u64
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.slot(id).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        usize::try_from(id)
            .ok()
            .and_then(|id| self.0.get_mut(id))
            .and_then(Option::as_mut)
    }

    /// Vacates the slot returning what it held.
    pub fn take(&mut self, id: u64) -> Option<T> {
        usize::try_from(id)
            .ok()
            .and_then(|id| self.0.get_mut(id))
            .and_then(Option::take)
    }

    pub fn len(&self) -> u64 {
        self.0.len() as u64
    }

    fn slot(&self, id: u64) -> Option<&Option<T>> {
        usize::try_from(id).ok().and_then(|id| self.0.get(id))
    }
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}
