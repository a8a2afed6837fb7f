//! Error type reported by the filter entry points.

use std::error::Error;
use std::fmt;

/// Argument problems detected at the call boundary, before any output cell
/// is written. NaN input is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Input and output shapes differ.
    ShapeMismatch {
        input: Vec<usize>,
        output: Vec<usize>,
    },
    /// A view is not contiguous in standard (row-major) layout.
    NotContiguous,
    /// Input and output buffers share memory.
    Overlap,
    /// The window does not fit in the block: `2 * half + 1 > block` along
    /// the named axis.
    BlockTooSmall {
        axis: &'static str,
        half: usize,
        block: usize,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::ShapeMismatch { input, output } => write!(
                f,
                "input shape {input:?} does not match output shape {output:?}"
            ),
            FilterError::NotContiguous => {
                write!(f, "views must be contiguous in standard layout")
            }
            FilterError::Overlap => write!(f, "input and output buffers overlap"),
            FilterError::BlockTooSmall { axis, half, block } => write!(
                f,
                "half-radius {half} along {axis} needs a block size of at least {}, got {block}",
                2 * half + 1
            ),
        }
    }
}

impl Error for FilterError {}

#[cfg(test)]
mod tests {
    use super::FilterError;

    #[test]
    fn display_names_the_axis() {
        let err = FilterError::BlockTooSmall {
            axis: "y",
            half: 3,
            block: 5,
        };
        let text = err.to_string();
        assert!(text.contains("y"));
        assert!(text.contains("7"));
        assert!(text.contains("5"));
    }
}
