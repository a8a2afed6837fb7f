//! 'rmedian' library computing block-based sliding medians of 1D and 2D
//! arrays with possible NaN values.
//!
//! Each output cell is the median of the input cells inside a rectangular
//! window centered on it, truncated at the array edges. NaN cells are
//! excluded from their windows; a window holding only NaN yields NaN.
//! Instead of sorting every window, the input is cut into overlapping
//! blocks, each block is sorted once, and the window then slides through
//! the block as a bitset over the sorted ranks.
//!
//! ```
//! use ndarray::{Array2, arr2};
//! use rmedian::median_filter_2d;
//!
//! let data = arr2(&[[1.0, 9.0, 2.0], [8.0, f64::NAN, 3.0], [4.0, 6.0, 5.0]]);
//! let mut out = Array2::zeros(data.dim());
//! median_filter_2d(data.view(), out.view_mut(), 1, 1, 0).unwrap();
//! assert_eq!(out[(1, 1)], 4.5);
//! ```

// Local modules
mod bit_window;
mod blocks;
mod checks;
mod error;
mod median_1d;
mod median_2d;
mod ranked_window;

// Re-exports
pub use error::FilterError;
pub use median_1d::median_filter_1d;
pub use median_2d::median_filter_2d;
