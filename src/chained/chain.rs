//! Chain entries and bucket arrays.
//!
//! Entries live in one arena in insertion order. Each bucket holds the index of
//! the first entry of its chain, and each entry holds the index of the next.

use crate::error::SetError;

/// Position of an entry inside the entry arena.
pub(super) type EntryIndex = usize;

/// The head of every chain, indexed by bucket.
pub(super) type Buckets = Vec<Option<EntryIndex>>;

#[derive(Clone, Debug)]
pub(super) struct Entry<T> {
    pub(super) element: T,
    /// Hash of `element`, kept so that growth never calls the hash function.
    pub(super) hash: u64,
    pub(super) next: Option<EntryIndex>,
}

/// Walks one chain from its head.
pub(super) struct Chain<'a, T> {
    entries: &'a [Entry<T>],
    cursor: Option<EntryIndex>,
}

impl<'a, T> Chain<'a, T> {
    pub(super) const fn new(entries: &'a [Entry<T>], head: Option<EntryIndex>) -> Self {
        Self {
            entries,
            cursor: head,
        }
    }
}

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = &'a Entry<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = &self.entries[self.cursor?];
        self.cursor = entry.next;
        Some(entry)
    }
}

/// Maps a hash to a bucket of an array with `capacity` buckets.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(super) const fn bucket_index(hash: u64, capacity: usize) -> usize {
    // The remainder is below `capacity`, which fits in usize.
    (hash % capacity as u64) as usize
}

/// Allocates `capacity` empty buckets, reporting allocation failure.
pub(super) fn allocate_buckets(capacity: usize) -> Result<Buckets, SetError> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(capacity)?;
    buckets.resize(capacity, None);
    Ok(buckets)
}

/// Links every entry into `buckets` at the head of its chain.
///
/// `buckets` must be empty. Chain order is not preserved.
pub(super) fn relink<T>(entries: &mut [Entry<T>], buckets: &mut Buckets) {
    let capacity = buckets.len();
    for (index, entry) in entries.iter_mut().enumerate() {
        let bucket = bucket_index(entry.hash, capacity);
        entry.next = buckets[bucket].replace(index);
    }
}
