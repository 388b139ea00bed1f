//! Delimited-text (CSV) formatting.
//!
//! Standard quoting rules: a field is quoted when it contains the
//! delimiter, a quote character, or a newline; embedded quotes are doubled.

/// Escape a single CSV field.
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Join fields into one CSV line (no trailing newline).
pub fn csv_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| csv_escape(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}
