//! Query string parsing module
//!
//! Minimal `application/x-www-form-urlencoded` query handling: key lookup
//! with percent-decoding and `+`-as-space, enough for the greeting page's
//! `name` parameter.

/// Look up a single parameter in a raw query string.
///
/// Returns the first matching value, percent-decoded. The value may be
/// empty (`?name=`); callers decide whether empty counts as present.
pub fn get_param(query: Option<&str>, key: &str) -> Option<String> {
    let query = query?;

    for pair in query.split('&') {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if percent_decode(k) == key {
            return Some(percent_decode(v));
        }
    }

    None
}

/// Decode `%XX` escapes and `+` in a query component.
///
/// Malformed escapes pass through literally rather than failing the
/// request; invalid UTF-8 is replaced rather than rejected.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    out.push(hi << 4 | lo);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
