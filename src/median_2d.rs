//! Sliding median over a two-dimensional array, computed block by block with
//! a snake-order walk inside each block.

use ndarray::{ArrayView2, ArrayViewMut2};
use num_traits::Float;

// local
use crate::blocks::{Block, BlockDim};
use crate::checks;
use crate::error::FilterError;
use crate::ranked_window::RankedWindow;

/// Default block size for a 2D filter with larger half-radius `half`.
#[inline]
pub(crate) fn default_block_2d(half: usize) -> usize {
    4 * (half + 2)
}

/// Median-filters `input` into `output` with a window of
/// `(2 * half_x + 1) x (2 * half_y + 1)` cells, truncated at the array
/// edges. `half_x` runs along the fast axis (columns), `half_y` along rows.
///
/// NaN cells are excluded from every window; a window holding only NaN
/// yields NaN. `block_hint = 0` selects the block size heuristically; any
/// positive hint whose block fits both windows produces identical output.
///
/// # Errors
/// Fails before writing any output if the shapes differ, a view is not
/// standard-layout contiguous, the buffers overlap, or the block is too
/// small for the window along either axis.
pub fn median_filter_2d<F>(
    input: ArrayView2<'_, F>,
    mut output: ArrayViewMut2<'_, F>,
    half_x: usize,
    half_y: usize,
    block_hint: usize,
) -> Result<(), FilterError>
where
    F: Float,
{
    if input.dim() != output.dim() {
        return Err(FilterError::ShapeMismatch {
            input: input.shape().to_vec(),
            output: output.shape().to_vec(),
        });
    }
    let block = checks::resolve_block(
        block_hint,
        default_block_2d(half_x.max(half_y)),
        &[("x", half_x), ("y", half_y)],
    )?;
    let (rows, cols) = input.dim();
    let src = input.as_slice().ok_or(FilterError::NotContiguous)?;
    let dst = output.as_slice_mut().ok_or(FilterError::NotContiguous)?;
    if checks::overlap(src, dst) {
        return Err(FilterError::Overlap);
    }

    let dim_x = BlockDim::new(cols, half_x, block);
    let dim_y = BlockDim::new(rows, half_y, block);
    let mut window = RankedWindow::new(block * block);

    for by in 0..dim_y.count {
        let blk_y = dim_y.block(by);
        for bx in 0..dim_x.count {
            let blk_x = dim_x.block(bx);
            filter_block(&mut window, src, dst, cols, &blk_x, &blk_y);
        }
    }
    Ok(())
}

/// Runs one block: builds its rank table, then walks the emitted positions
/// in snake order. Consecutive positions differ by one unit step, so every
/// transition only moves the single strip of cells that entered or left the
/// window.
fn filter_block<F>(
    window: &mut RankedWindow<F>,
    src: &[F],
    dst: &mut [F],
    row_len: usize,
    blk_x: &Block,
    blk_y: &Block,
) where
    F: Float,
{
    if blk_x.lo == blk_x.hi || blk_y.lo == blk_y.hi {
        return;
    }
    let width = blk_x.size;

    window.start_block();
    for y in 0..blk_y.size {
        let row = (blk_y.start + y) * row_len + blk_x.start;
        for x in 0..width {
            window.feed(src[row + x], y * width + x);
        }
    }
    window.finish_block();

    let mut x = blk_x.lo;
    let mut y = blk_y.lo;

    window.clear();
    for yy in blk_y.w0(y)..blk_y.w1(y) {
        for xx in blk_x.w0(x)..blk_x.w1(x) {
            window.insert(yy * width + xx);
        }
    }
    dst[(blk_y.start + y) * row_len + blk_x.start + x] = window.median();

    let mut down = true;
    loop {
        if down && y + 1 < blk_y.hi {
            // step down: top row of the window leaves, a new bottom row enters
            for yy in blk_y.w0(y)..blk_y.w0(y + 1) {
                for xx in blk_x.w0(x)..blk_x.w1(x) {
                    window.remove(yy * width + xx);
                }
            }
            for yy in blk_y.w1(y)..blk_y.w1(y + 1) {
                for xx in blk_x.w0(x)..blk_x.w1(x) {
                    window.insert(yy * width + xx);
                }
            }
            y += 1;
        } else if !down && y > blk_y.lo {
            // step up: bottom row leaves, a new top row enters
            for yy in blk_y.w1(y - 1)..blk_y.w1(y) {
                for xx in blk_x.w0(x)..blk_x.w1(x) {
                    window.remove(yy * width + xx);
                }
            }
            for yy in blk_y.w0(y - 1)..blk_y.w0(y) {
                for xx in blk_x.w0(x)..blk_x.w1(x) {
                    window.insert(yy * width + xx);
                }
            }
            y -= 1;
        } else if x + 1 < blk_x.hi {
            // hop to the next column and reverse the sweep direction
            for xx in blk_x.w0(x)..blk_x.w0(x + 1) {
                for yy in blk_y.w0(y)..blk_y.w1(y) {
                    window.remove(yy * width + xx);
                }
            }
            for xx in blk_x.w1(x)..blk_x.w1(x + 1) {
                for yy in blk_y.w0(y)..blk_y.w1(y) {
                    window.insert(yy * width + xx);
                }
            }
            x += 1;
            down = !down;
        } else {
            break;
        }
        dst[(blk_y.start + y) * row_len + blk_x.start + x] = window.median();
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, arr2, s};

    use super::median_filter_2d;
    use crate::error::FilterError;

    fn run(input: &Array2<f64>, half_x: usize, half_y: usize, block_hint: usize) -> Array2<f64> {
        let mut output = Array2::zeros(input.dim());
        median_filter_2d(input.view(), output.view_mut(), half_x, half_y, block_hint).unwrap();
        output
    }

    fn step_rows() -> Array2<f64> {
        arr2(&[
            [0., 0., 0., 1., 1., 1., 0., 0., 0., 0.],
            [0., 0., 0., 1., 1., 1., 0., 0., 0., 0.],
            [0., 0., 0., 1., 1., 0., 0., 0., 0., 0.],
            [0., 0., 0., 1., 1., 1., 0., 0., 2., 0.],
            [0., 0., 0., 1., 1., 1., 0., 0., 0., 0.],
        ])
    }

    #[test]
    fn horizontal_window_per_row() {
        let out = run(&step_rows(), 1, 0, 0);
        // Row 3 holds the outlier 2; its trimmed right edge averages {0, 2}.
        assert_eq!(
            out.slice(s![3, ..]).to_vec(),
            [0., 0., 0., 1., 1., 1., 0., 0., 0., 1.]
        );
        // Row 2 loses its rightmost 1 to the shorter plateau.
        assert_eq!(
            out.slice(s![2, ..]).to_vec(),
            [0., 0., 0., 1., 1., 0., 0., 0., 0., 0.]
        );
    }

    #[test]
    fn nan_is_dropped_from_the_window() {
        let mut data = step_rows();
        data[(2, 5)] = f64::NAN;
        let out = run(&data, 1, 0, 0);
        // Window {1, NaN, 0} reduces to {1, 0}.
        assert_eq!(out[(2, 5)], 0.5);
        // The neighbor window {1, 1, NaN} reduces to {1, 1}.
        assert_eq!(out[(2, 4)], 1.0);
    }

    #[test]
    fn single_cell_any_radius() {
        let data = arr2(&[[4.0]]);
        assert_eq!(run(&data, 0, 0, 0)[(0, 0)], 4.0);
        assert_eq!(run(&data, 3, 7, 0)[(0, 0)], 4.0);
        let nan = arr2(&[[f64::NAN]]);
        assert!(run(&nan, 2, 2, 0)[(0, 0)].is_nan());
    }

    #[test]
    fn empty_array() {
        let data = Array2::<f64>::zeros((0, 5));
        assert_eq!(run(&data, 1, 1, 0).dim(), (0, 5));
        let data = Array2::<f64>::zeros((5, 0));
        assert_eq!(run(&data, 1, 1, 0).dim(), (5, 0));
    }

    #[test]
    fn rejects_undersized_block_naming_axis() {
        let data = Array2::<f64>::zeros((6, 6));
        let mut out = Array2::<f64>::zeros((6, 6));
        let err =
            median_filter_2d(data.view(), out.view_mut(), 0, 2, 3).unwrap_err();
        assert_eq!(
            err,
            FilterError::BlockTooSmall {
                axis: "y",
                half: 2,
                block: 3
            }
        );
    }

    #[test]
    fn rejects_shape_mismatch() {
        let data = Array2::<f64>::zeros((4, 5));
        let mut out = Array2::<f64>::zeros((5, 4));
        let err = median_filter_2d(data.view(), out.view_mut(), 1, 1, 0).unwrap_err();
        assert_eq!(
            err,
            FilterError::ShapeMismatch {
                input: vec![4, 5],
                output: vec![5, 4]
            }
        );
    }

    #[test]
    fn rejects_non_contiguous_view() {
        let data = Array2::<f64>::zeros((6, 6));
        let strided = data.slice(s![.., ..;2]);
        let mut out = Array2::<f64>::zeros((6, 3));
        let err = median_filter_2d(strided, out.view_mut(), 1, 1, 0).unwrap_err();
        assert_eq!(err, FilterError::NotContiguous);
    }

    #[test]
    fn f32_inputs() {
        let data = arr2(&[[1.0f32, 9.0, 2.0], [8.0, f32::NAN, 3.0], [4.0, 6.0, 5.0]]);
        let mut out = Array2::<f32>::zeros((3, 3));
        median_filter_2d(data.view(), out.view_mut(), 1, 1, 0).unwrap();
        // Center window holds the eight finite neighbors.
        assert_eq!(out[(1, 1)], 4.5);
    }
}
