use crate::codec::MARKER_MORE;

/// Printable ASCII runs of at least `min_len` bytes found in `bytes`.
///
/// A `0xFF` byte inside a run is a chunk marker and is skipped without
/// ending the run, so chunk-encoded text reads back whole.
#[must_use]
pub fn extract_ascii_strings(bytes: &[u8], min_len: usize) -> Vec<String> {
    let mut found = Vec::new();
    let mut current = String::new();

    for &byte in bytes {
        if is_printable(byte) {
            current.push(char::from(byte));
        } else if byte != MARKER_MORE || current.is_empty() {
            flush(&mut found, &mut current, min_len);
        }
    }
    flush(&mut found, &mut current, min_len);

    found
}

const fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E)
}

fn flush(found: &mut Vec<String>, current: &mut String, min_len: usize) {
    if !current.is_empty() && current.len() >= min_len {
        found.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

///
/// TESTS
///
