//! Rank table mapping block cells to their sorted order, with NaN exclusion.

use std::cmp::Ordering;

use num_traits::Float;

// local
use crate::bit_window::BitWindow;

/// Sentinel rank for cells holding NaN. Such cells never enter the sort
/// buffer, so NaN is excluded from every comparison and every median.
const NAN_RANK: u32 = u32::MAX;

/// Value-ordered view of one block's cells over a [`BitWindow`] membership
/// bitset.
///
/// A block is loaded in three steps (`start_block`, `feed` per cell,
/// `finish_block`), which sorts the finite cells once. Sliding the window
/// afterwards is a rank lookup per cell plus a bitset update, and the median
/// is one or two k-th selections on the bitset.
pub(crate) struct RankedWindow<F> {
    // slot -> rank, NAN_RANK for NaN slots
    ranks: Vec<u32>,
    // rank -> (value, slot), ascending
    sorted: Vec<(F, u32)>,
    bits: BitWindow,
}

impl<F: Float> RankedWindow<F> {
    /// Allocates for blocks of up to `slots` cells. This is the only
    /// allocation point; block loads and window updates reuse the buffers.
    pub fn new(slots: usize) -> Self {
        RankedWindow {
            ranks: vec![NAN_RANK; slots],
            sorted: Vec::with_capacity(slots),
            bits: BitWindow::new(slots),
        }
    }

    /// Begins loading a new block.
    pub fn start_block(&mut self) {
        self.sorted.clear();
    }

    /// Records the value held by `slot`.
    #[inline]
    pub fn feed(&mut self, value: F, slot: usize) {
        if value.is_nan() {
            self.ranks[slot] = NAN_RANK;
        } else {
            self.sorted.push((value, slot as u32));
        }
    }

    /// Sorts the fed values and assigns each finite slot its rank.
    ///
    /// Ties are broken by slot index, so the order is total and the
    /// slot-to-rank mapping is deterministic even with repeated values.
    pub fn finish_block(&mut self) {
        self.sorted.sort_unstable_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
        });
        for (rank, &(_, slot)) in self.sorted.iter().enumerate() {
            self.ranks[slot as usize] = rank as u32;
        }
    }

    /// Empties the window.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Adds `slot` to the window. NaN slots are ignored.
    #[inline]
    pub fn insert(&mut self, slot: usize) {
        let rank = self.ranks[slot];
        if rank != NAN_RANK {
            self.bits.insert(rank as usize);
        }
    }

    /// Removes `slot` from the window. NaN slots are ignored.
    #[inline]
    pub fn remove(&mut self, slot: usize) {
        let rank = self.ranks[slot];
        if rank != NAN_RANK {
            self.bits.remove(rank as usize);
        }
    }

    /// Median of the values currently in the window.
    ///
    /// For an even count, returns the average of the two middle order
    /// statistics; for an empty window, NaN.
    pub fn median(&mut self) -> F {
        let total = self.bits.len();
        if total == 0 {
            return F::nan();
        }
        let lower = (total - 1) / 2;
        let upper = total / 2;
        let mut value = self.sorted[self.bits.kth(lower)].0;
        if upper != lower {
            let high = self.sorted[self.bits.kth(upper)].0;
            value = (value + high) / (F::one() + F::one());
        }
        value
    }
}
