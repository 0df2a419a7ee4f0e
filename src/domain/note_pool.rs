use crate::domain::NoteId;

/// Number of notes created for every suite run.
pub const POOL_SIZE: usize = 5;

/// The notes created during session setup, in creation order.
///
/// A pool always holds exactly [`POOL_SIZE`] ids; there is no way to
/// observe a partially built one.
#[derive(Debug, Clone)]
pub struct NotePool {
    ids: Vec<NoteId>,
}

impl NotePool {
    pub(crate) fn from_ids(ids: Vec<NoteId>) -> Self {
        debug_assert_eq!(ids.len(), POOL_SIZE);
        Self { ids }
    }

    /// The id at `index`, or `None` when `index` is outside `0..POOL_SIZE`.
    pub fn select(&self, index: usize) -> Option<&NoteId> {
        self.ids.get(index)
    }

    pub fn ids(&self) -> &[NoteId] {
        &self.ids
    }
}
