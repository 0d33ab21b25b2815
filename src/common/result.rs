use crate::common::error::ComposectlError;

/// composectl全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use composectl::common::result::ComposectlResult;
/// use composectl::common::error::ComposectlError;
///
/// fn find(name: &str) -> ComposectlResult<String> {
///     Err(ComposectlError::stack_not_found(name))
/// }
///
/// assert!(find("web").is_err());
/// ```
pub type ComposectlResult<T> = Result<T, ComposectlError>;
