use std::mem::replace;

/// Slot handle into an [`Arena`].
///
/// Handles are only meaningful for the arena that issued them; they are
/// never invalidated by other insertions, only by removing the slot itself.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub(crate) struct Index(usize);

#[derive(Debug)]
enum Entry<T> {
    Occupied(T),
    Free(Option<Index>),
}

// ASSERT: user is responsible for dangling indices
#[derive(Debug)]
pub(crate) struct Arena<T> {
    items: Vec<Entry<T>>,
    free: Option<Index>,
    len: usize,
}

impl<T> Arena<T> {
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new(), free: None, len: 0 }
    }
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity), free: None, len: 0 }
    }
    #[inline]
    pub fn insert(&mut self, value: T) -> Index {
        self.len += 1;
        match self.free {
            Some(head) => {
                let next = replace(&mut self.items[head.0], Entry::Occupied(value));
                match next {
                    Entry::Free(next) => self.free = next,
                    _ => unreachable!("free list points at occupied slot"),
                }
                head
            }
            None => {
                let index = Index(self.items.len());
                self.items.push(Entry::Occupied(value));
                index
            }
        }
    }
    #[inline]
    pub fn remove(&mut self, index: Index) -> Option<T> {
        let entry = self.items.get_mut(index.0)?;
        match entry {
            Entry::Occupied(_) => {
                let old = replace(entry, Entry::Free(self.free));
                self.free = Some(index);
                self.len -= 1;
                match old {
                    Entry::Occupied(value) => Some(value),
                    _ => unreachable!(),
                }
            }
            _ => None,
        }
    }
    #[inline]
    pub fn get(&self, index: Index) -> Option<&T> {
        match self.items.get(index.0) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }
    #[inline]
    pub fn get_mut(&mut self, index: Index) -> Option<&mut T> {
        match self.items.get_mut(index.0) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }
}
