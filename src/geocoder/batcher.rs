// batcher.rs - contiguous, numbered slices of an ordered list

/// A contiguous run of items dispatched in one request.
#[derive(Debug, PartialEq)]
pub struct Batch<'a, T> {
    /// 1-based batch number.
    pub number: usize,
    /// 0-based position of the first item in the full list.
    pub offset: usize,
    pub items: &'a [T],
}

impl<T> Batch<'_, T> {
    /// 1-based index of the first record in this batch.
    pub fn first_record(&self) -> usize {
        self.offset + 1
    }

    /// 1-based index of the last record in this batch (inclusive).
    pub fn last_record(&self) -> usize {
        self.offset + self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub struct Batcher {
    pub batch_size: usize,
}

impl Batcher {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    /// Number of batches `len` items split into.
    pub fn batch_count(&self, len: usize) -> usize {
        len.div_ceil(self.batch_size)
    }

    /// Split `items` into batches numbered from 1. The same batcher yields
    /// identical boundaries for any two lists of equal length.
    pub fn batches<'a, T>(&self, items: &'a [T]) -> impl Iterator<Item = Batch<'a, T>> {
        let size = self.batch_size;
        items
            .chunks(size)
            .enumerate()
            .map(move |(index, items)| Batch {
                number: index + 1,
                offset: index * size,
                items,
            })
    }
}
