/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Returns `true` if `value` is finite and has no fractional part.
///
/// ## Example
/// ```
/// use chonker::util::num::is_integral;
///
/// assert!(is_integral(3.0));
/// assert!(is_integral(-12.0));
/// assert!(!is_integral(0.5));
/// assert!(!is_integral(f64::INFINITY));
/// ```
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Safely converts an `f64` to `u64` if the value is integral, non-negative
/// and exactly representable.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, negative, fractional or too large
/// values.
///
/// ## Parameters
/// - `value`: The floating-point value to convert.
/// - `error`: The error to return if the conversion is not lossless.
///
/// ## Returns
/// - `Ok(u64)`: The converted value if it is safe.
/// - `Err(error)`: Otherwise.
///
/// ## Example
/// ```
/// use chonker::util::num::f64_to_u64_checked;
///
/// assert_eq!(f64_to_u64_checked(250.0, "bad"), Ok(250));
/// assert_eq!(f64_to_u64_checked(-1.0, "bad"), Err("bad"));
/// assert_eq!(f64_to_u64_checked(1.5, "bad"), Err("bad"));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_u64_checked<E>(value: f64, error: E) -> Result<u64, E> {
    if !is_integral(value) || value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return Err(error);
    }
    Ok(value as u64)
}

/// Safely converts an `f64` to `usize` if the value is integral, non-negative
/// and fits.
///
/// ## Errors
/// Returns `Err(error)` under the same conditions as
/// [`f64_to_u64_checked`], or if the value does not fit a `usize` on this
/// target.
///
/// ## Example
/// ```
/// use chonker::util::num::f64_to_usize_checked;
///
/// assert_eq!(f64_to_usize_checked(2.0, ()), Ok(2));
/// assert!(f64_to_usize_checked(2.5, ()).is_err());
/// ```
pub fn f64_to_usize_checked<E>(value: f64, error: E) -> Result<usize, E> {
    match f64_to_u64_checked(value, ()) {
        Ok(n) => usize::try_from(n).map_or(Err(error), Ok),
        Err(()) => Err(error),
    }
}

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds [`MAX_SAFE_U64_INT`].
///
/// ## Example
/// ```
/// use chonker::util::num::{MAX_SAFE_U64_INT, usize_to_f64_checked};
///
/// assert_eq!(usize_to_f64_checked(100, "too big"), Ok(100.0));
///
/// if cfg!(target_pointer_width = "64") {
///     let too_big = (MAX_SAFE_U64_INT + 1) as usize;
///     assert_eq!(usize_to_f64_checked(too_big, "too big"), Err("too big"));
/// }
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked<E>(value: usize, error: E) -> Result<f64, E> {
    match u64::try_from(value) {
        Ok(n) if n <= MAX_SAFE_U64_INT => Ok(n as f64),
        _ => Err(error),
    }
}
