//! Argument validation shared by the filter entry points.

// local
use crate::error::FilterError;

/// True when the two slices share any memory.
pub(crate) fn overlap<T>(a: &[T], b: &[T]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let a_lo = a.as_ptr() as usize;
    let a_hi = a_lo + std::mem::size_of_val(a);
    let b_lo = b.as_ptr() as usize;
    let b_hi = b_lo + std::mem::size_of_val(b);
    a_lo < b_hi && b_lo < a_hi
}

/// Resolves the block size from a caller hint (`0` selects `default`) and
/// checks that every window fits in it.
/// # Errors
/// Returns [`FilterError::BlockTooSmall`] naming the first axis whose window
/// does not fit.
pub(crate) fn resolve_block(
    hint: usize,
    default: usize,
    halves: &[(&'static str, usize)],
) -> Result<usize, FilterError> {
    let block = if hint > 0 { hint } else { default };
    for &(axis, half) in halves {
        if 2 * half + 1 > block {
            return Err(FilterError::BlockTooSmall { axis, half, block });
        }
    }
    Ok(block)
}
