//! Small stateless helpers shared by the views

use leptos::logging::warn;
use uuid::Uuid;

/// Maximum accepted upload size (3 MiB)
pub const MAX_FILE_SIZE: u64 = 3 * 1024 * 1024;

/// Ranges at least this wide trigger a warning in [`range_to_list`]
const LARGE_RANGE: u64 = 1000;

/// Check for a hyphenated RFC 4122 UUID with version 0-5 and variant 0/8/9/a/b
pub fn is_valid_uuid(value: &str) -> bool {
    if value.len() != 36 || Uuid::try_parse(value).is_err() {
        return false;
    }

    let bytes = value.as_bytes();
    let version_ok = matches!(bytes[14], b'0'..=b'5');
    let variant_ok = matches!(bytes[19].to_ascii_lowercase(), b'0' | b'8' | b'9' | b'a' | b'b');

    version_ok && variant_ok
}

/// Position of `id` in `list`, or `None` when `id` is not a valid UUID
pub fn find_id_index<S: AsRef<str>>(list: &[S], id: &str) -> Option<usize> {
    if !is_valid_uuid(id) {
        return None;
    }

    list.iter().position(|item| item.as_ref() == id)
}

/// Expand an inclusive `"first-last"` range into its numbers.
///
/// Malformed input, more than one dash, or `first >= last` yields an empty list.
pub fn range_to_list(input: &str) -> Vec<u64> {
    let input = input.trim();
    if input.len() < 3 || input.matches('-').count() != 1 {
        return Vec::new();
    }

    let Some((first, last)) = input.split_once('-') else {
        return Vec::new();
    };

    let (Ok(first), Ok(last)) = (first.trim().parse::<u64>(), last.trim().parse::<u64>()) else {
        return Vec::new();
    };

    if first >= last {
        return Vec::new();
    }

    if last - first >= LARGE_RANGE {
        warn!("Trying to generate a large list of numbers.");
    }

    (first..=last).collect()
}

/// Check an upload size against [`MAX_FILE_SIZE`]
pub fn is_valid_file_size(size: u64) -> bool {
    size > 0 && size <= MAX_FILE_SIZE
}

/// Check a MIME type against an allow-list; an empty allow-list rejects everything
pub fn is_valid_mime_type<S: AsRef<str>>(mime_type: &str, allowed: &[S]) -> bool {
    if mime_type.is_empty() {
        return false;
    }

    allowed.iter().any(|a| a.as_ref() == mime_type)
}

/// Last path segment
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// Text after the last dot of the last path segment, or the whole segment
/// when it has no dot
pub fn extname(path: &str) -> &str {
    basename(path).rsplit('.').next().unwrap_or_default()
}
