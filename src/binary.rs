/// Renders a raw key as a printable string for log output
///
/// Printable ASCII is kept as-is, everything else becomes a `\xNN` escape.
pub fn to_string_binary(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());

    for &b in bytes {
        if (32..127).contains(&b) && b != b'\\' {
            out.push(b as char);
        } else {
            out.push_str(&format!("\\x{b:02X}"));
        }
    }

    out
}
