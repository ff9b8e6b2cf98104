// Data structures for lyrics corpora

pub mod album;
pub mod artist;
pub mod song;

pub use album::Album;
pub use artist::Artist;
pub use song::Song;

/// A lazily filled field that remembers whether it was ever filled
///
/// `ResolvedEmpty` means the lookup ran and found nothing, which is
/// different from `Unresolved` (never looked up, or the lookup failed and
/// may be tried again).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheSlot<T> {
    /// Never looked up
    Unresolved,
    /// Looked up and found a value
    Resolved(T),
    /// Looked up and found nothing
    ResolvedEmpty,
}

impl<T> CacheSlot<T> {
    /// Whether a lookup has completed for this slot
    pub fn is_resolved(&self) -> bool {
        !matches!(self, CacheSlot::Unresolved)
    }

    /// The cached value, if one was found
    pub fn get(&self) -> Option<&T> {
        match self {
            CacheSlot::Resolved(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            CacheSlot::Resolved(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> CacheSlot<Vec<T>> {
    /// Store a fetched list, marking an empty list as `ResolvedEmpty`
    pub fn from_list(list: Vec<T>) -> Self {
        if list.is_empty() {
            CacheSlot::ResolvedEmpty
        } else {
            CacheSlot::Resolved(list)
        }
    }

    /// The cached list, empty unless something was found
    pub fn as_slice(&self) -> &[T] {
        match self {
            CacheSlot::Resolved(list) => list,
            _ => &[],
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            CacheSlot::Resolved(list) => list,
            _ => &mut [],
        }
    }
}

impl<T> Default for CacheSlot<T> {
    fn default() -> Self {
        CacheSlot::Unresolved
    }
}
