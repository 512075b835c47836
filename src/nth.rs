//! Defines [`nth_index`], which finds the position of the N-th occurrence of a
//! marker within a string. The feed builder ([`crate::feed`]) uses it to find
//! where an article's preview stops.

/// Returns the byte index at which the `n`th occurrence of `marker` starts in
/// `text`, or `None` if `text` contains fewer than `n` occurrences.
///
/// Each search resumes right after the start of the previous match rather than
/// after its end, so overlapping occurrences are counted:
///
/// ```
/// use blogfeed::nth::nth_index;
///
/// assert_eq!(Some(4), nth_index("<p>a<p>b<p>c", "<p>", 2).unwrap());
/// assert_eq!(Some(1), nth_index("aaa", "aa", 2).unwrap());
/// assert_eq!(None, nth_index("<p>a", "<p>", 3).unwrap());
/// ```
///
/// Returns [`Error::InvalidArgument`] if `n` is zero or `marker` is empty.
pub fn nth_index(text: &str, marker: &str, n: usize) -> Result<Option<usize>> {
    if n < 1 {
        return Err(Error::InvalidArgument("occurrence must be at least 1"));
    }

    // The first character's width, which is also the smallest step that keeps
    // the next search start on a char boundary.
    let step = match marker.chars().next() {
        Some(c) => c.len_utf8(),
        None => return Err(Error::InvalidArgument("marker must not be empty")),
    };

    let mut start = 0;
    for remaining in (1..=n).rev() {
        let found = match text[start..].find(marker) {
            Some(offset) => start + offset,
            None => return Ok(None),
        };
        if remaining == 1 {
            return Ok(Some(found));
        }
        start = found + step;
    }

    // `n >= 1`, so the loop always returns.
    Ok(None)
}

/// The result of [`nth_index`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a misuse of [`nth_index`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Returned when the occurrence count is zero or the marker is empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
