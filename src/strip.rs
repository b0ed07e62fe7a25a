//! Removal of whole field assignments from raw BibTeX text.
//!
//! The scanner only understands enough of the grammar to find where a field's
//! value ends: brace groups, quoted strings and bare tokens. Everything it does
//! not delete is copied through byte for byte.

use crate::config::FieldSet;

/// Return `raw` without the assignments whose field name is in `drop`.
///
/// A deleted assignment takes its trailing comma and the whitespace around
/// that comma with it, so no empty line or dangling separator is left behind.
pub fn strip_fields(raw: &str, drop: &FieldSet) -> String {
    let bytes = raw.as_bytes();
    let n = bytes.len();
    let mut out = String::with_capacity(n);
    let mut i = 0;

    while i < n {
        if is_blank(bytes[i]) {
            out.push(bytes[i] as char);
            i += 1;
            continue;
        }

        let Some(assign) = match_assignment(bytes, i) else {
            let len = raw[i..].chars().next().map_or(1, char::len_utf8);
            out.push_str(&raw[i..i + len]);
            i += len;
            continue;
        };

        let value_end = value_end(bytes, assign.value_start);

        if !drop.contains(&raw[i..assign.name_end]) {
            out.push_str(&raw[i..value_end]);
            i = value_end;
            continue;
        }

        if assign.value_start >= n {
            break;
        }

        let mut j = skip_blank(bytes, value_end);
        if j < n && bytes[j] == b',' {
            j = skip_blank(bytes, j + 1);
        }
        i = j;
    }

    out
}

struct Assignment {
    name_end: usize,
    value_start: usize,
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-')
}

fn skip_blank(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_blank(bytes[i]) {
        i += 1;
    }
    i
}

/// Match `name \s* = \s*` at `start`.
fn match_assignment(bytes: &[u8], start: usize) -> Option<Assignment> {
    let first = *bytes.get(start)?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let mut i = start + 1;
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    let name_end = i;
    i = skip_blank(bytes, i);
    if bytes.get(i) != Some(&b'=') {
        return None;
    }
    Some(Assignment {
        name_end,
        value_start: skip_blank(bytes, i + 1),
    })
}

/// Index one past the end of the value that starts at `start`.
fn value_end(bytes: &[u8], start: usize) -> usize {
    let n = bytes.len();
    if start >= n {
        return n;
    }
    let mut j = start;
    match bytes[j] {
        b'{' => {
            let mut depth = 1usize;
            j += 1;
            while j < n && depth > 0 {
                match bytes[j] {
                    b'{' => depth += 1,
                    b'}' => depth -= 1,
                    _ => {}
                }
                j += 1;
            }
        }
        b'"' => {
            j += 1;
            while j < n {
                if bytes[j] == b'"' && bytes[j - 1] != b'\\' {
                    j += 1;
                    break;
                }
                j += 1;
            }
        }
        _ => {
            // A bare token may still contain `# {...}` concatenations.
            let mut depth = 0usize;
            while j < n {
                match bytes[j] {
                    b',' | b'\n' | b'\r' if depth == 0 => break,
                    b'}' if depth == 0 => break,
                    b'{' => depth += 1,
                    b'}' => depth -= 1,
                    _ => {}
                }
                j += 1;
            }
        }
    }
    j
}
