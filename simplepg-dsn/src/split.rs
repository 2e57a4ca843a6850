//! Exactly-once delimiter splitting.
//!
//! Every split the codec performs is only honored when the delimiter occurs
//! exactly once in the input. Anything else is treated as "no split".

/// Split `s` around `delim`, but only if `delim` occurs exactly once.
pub(crate) fn two_fields(s: &str, delim: char) -> Option<(&str, &str)> {
    if s.matches(delim).count() != 1 {
        return None;
    }
    s.split_once(delim)
}

/// The trimmed text left of a unique `delim`, or `""`.
pub(crate) fn left_of(s: &str, delim: char) -> &str {
    two_fields(s, delim).map_or("", |(left, _)| left.trim())
}

/// The trimmed text right of a unique `delim`, or `""`.
pub(crate) fn right_of(s: &str, delim: char) -> &str {
    two_fields(s, delim).map_or("", |(_, right)| right.trim())
}
