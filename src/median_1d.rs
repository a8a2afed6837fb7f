//! Sliding median over a one-dimensional array, computed block by block.

use ndarray::{ArrayView1, ArrayViewMut1};
use num_traits::Float;

// local
use crate::blocks::BlockDim;
use crate::checks;
use crate::error::FilterError;
use crate::ranked_window::RankedWindow;

/// Default block size for a 1D filter of half-radius `half`.
#[inline]
pub(crate) fn default_block_1d(half: usize) -> usize {
    8 * (half + 2)
}

/// Median-filters `input` into `output` with a window of `2 * half + 1`
/// samples, truncated at the array ends.
///
/// NaN samples are excluded from every window; a window holding only NaN
/// yields NaN. `block_hint = 0` selects the block size heuristically; any
/// positive hint whose block fits the window produces identical output.
///
/// # Errors
/// Fails before writing any output if the lengths differ, a view is not
/// contiguous, the buffers overlap, or the block is too small for the
/// window.
pub fn median_filter_1d<F>(
    input: ArrayView1<'_, F>,
    mut output: ArrayViewMut1<'_, F>,
    half: usize,
    block_hint: usize,
) -> Result<(), FilterError>
where
    F: Float,
{
    if input.len() != output.len() {
        return Err(FilterError::ShapeMismatch {
            input: input.shape().to_vec(),
            output: output.shape().to_vec(),
        });
    }
    let block = checks::resolve_block(block_hint, default_block_1d(half), &[("x", half)])?;
    let src = input.as_slice().ok_or(FilterError::NotContiguous)?;
    let dst = output.as_slice_mut().ok_or(FilterError::NotContiguous)?;
    if checks::overlap(src, dst) {
        return Err(FilterError::Overlap);
    }

    let dim = BlockDim::new(src.len(), half, block);
    let mut window = RankedWindow::new(block);

    for bx in 0..dim.count {
        let blk = dim.block(bx);
        if blk.lo == blk.hi {
            continue;
        }

        window.start_block();
        for x in 0..blk.size {
            window.feed(src[blk.start + x], x);
        }
        window.finish_block();

        window.clear();
        for slot in blk.w0(blk.lo)..blk.w1(blk.lo) {
            window.insert(slot);
        }
        dst[blk.start + blk.lo] = window.median();

        for x in blk.lo + 1..blk.hi {
            // Trailing sample leaves the window unless it was clipped away,
            // leading sample enters unless clipped.
            if x > half {
                window.remove(x - 1 - half);
            }
            if x + half < blk.size {
                window.insert(x + half);
            }
            dst[blk.start + x] = window.median();
        }
    }
    Ok(())
}
