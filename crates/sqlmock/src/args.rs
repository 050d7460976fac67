//! Argument list helpers.

use sqlmock_types::DriverValue;

/// Build a `Vec<DriverValue>` from heterogeneous values.
///
/// Each value keeps its own kind, so `args![1_i8, 1_u64]` yields an `I8` and a
/// `U64`.
///
/// # Examples
///
/// ```
/// use sqlmock::args;
///
/// let a = args![42_i64, "hello", 3.5_f64];
/// assert_eq!(a.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::DriverValue>::new()
    };
    ($($val:expr),+ $(,)?) => {
        ::std::vec![$($crate::DriverValue::from($val)),+]
    };
}

/// Collect an iterator of values into an argument list.
pub fn args_from_iter(iter: impl IntoIterator<Item = impl Into<DriverValue>>) -> Vec<DriverValue> {
    iter.into_iter().map(Into::into).collect()
}
