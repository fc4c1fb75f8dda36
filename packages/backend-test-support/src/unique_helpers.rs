//! Test helpers for generating unique test data
//!
//! Random suffixes keep tests isolated from each other and from data left
//! behind by previous runs.

use uuid::Uuid;

/// Generate a unique string in the format `{prefix}-{uuid}`.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("blog");
/// let id2 = unique_str("blog");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("blog-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Generate a unique email address in the format `{prefix}-{uuid}@example.test`.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email1 = unique_email("admin");
/// let email2 = unique_email("admin");
/// assert_ne!(email1, email2);
/// assert!(email1.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Uuid::new_v4())
}
