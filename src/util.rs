/// Numeric conversion helpers.
///
/// Every number in the language is an `f64`, but list indices, list lengths
/// and sleep durations are integers. The helpers here convert between the
/// two without silent truncation or rounding.
///
/// All functions return a `Result`, which is `Ok` if the conversion is lossless
/// and valid, or the caller-supplied error otherwise.
pub mod num;
