//! Partitioning of one array dimension into overlapping blocks.

/// Splits a dimension of `len` samples into blocks of at most `block`
/// samples. Consecutive blocks overlap by `2 * half` samples so that every
/// window needed by a block's emitted positions lies inside the block.
pub(crate) struct BlockDim {
    len: usize,
    half: usize,
    step: usize,
    pub count: usize,
}

impl BlockDim {
    /// Requires `2 * half + 1 <= block` (checked by the entry points).
    pub fn new(len: usize, half: usize, block: usize) -> Self {
        debug_assert!(2 * half + 1 <= block);
        let step = block - 2 * half;
        let count = if len <= block {
            1
        } else {
            (len - 2 * half).div_ceil(step)
        };
        BlockDim {
            len,
            half,
            step,
            count,
        }
    }

    /// Geometry of block `i`. Every position of the dimension is emitted by
    /// exactly one block.
    pub fn block(&self, i: usize) -> Block {
        debug_assert!(i < self.count);
        let start = i * self.step;
        let end = if i + 1 == self.count {
            self.len
        } else {
            2 * self.half + (i + 1) * self.step
        };
        let size = end - start;
        Block {
            start,
            size,
            lo: if i == 0 { 0 } else { self.half },
            hi: if i + 1 == self.count { size } else { size - self.half },
            half: self.half,
        }
    }
}

/// One block of a dimension: its placement in the full array and the range
/// of positions whose medians it emits.
pub(crate) struct Block {
    /// Offset of the block in the full array.
    pub start: usize,
    /// Number of samples in the block.
    pub size: usize,
    /// First block-local position emitted by this block.
    pub lo: usize,
    /// One past the last block-local position emitted by this block.
    pub hi: usize,
    half: usize,
}

impl Block {
    /// Left edge of the clipped window around block-local position `v`.
    /// Valid for `lo <= v < hi`.
    #[inline]
    pub fn w0(&self, v: usize) -> usize {
        v.saturating_sub(self.half)
    }

    /// Right edge (exclusive) of the clipped window around `v`.
    /// Valid for `lo <= v < hi`.
    #[inline]
    pub fn w1(&self, v: usize) -> usize {
        (v + 1 + self.half).min(self.size)
    }
}
