//! Release-version rules.
//!
//! A release version has only numeric dot-separated segments. Ordering is
//! segment-wise numeric; when one version is a prefix of the other, the
//! shorter one is less (`1.2 < 1.2.0`).

use std::cmp::Ordering;

pub fn is_release_version(version: &str) -> bool {
    version
        .split('.')
        .all(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
}

/// Compare two release versions.
///
/// Segments are compared as unbounded integers, so `"10" > "9"` and
/// arbitrarily long segments never overflow.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    a.split('.').map(segment_key).cmp(b.split('.').map(segment_key))
}

fn segment_key(segment: &str) -> (usize, &str) {
    let digits = segment.trim_start_matches('0');
    (digits.len(), digits)
}

/// The greatest release version among `versions`, ignoring pre-releases.
pub fn latest_release<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .filter(|v| is_release_version(v))
        .max_by(|a, b| compare_versions(a, b))
}
