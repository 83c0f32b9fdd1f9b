/// Escape a single CSV field.
/// Fields containing a comma, double quote, or line break are wrapped in
/// double quotes, with embedded quotes doubled. Carrier data is normally
/// comma-free, but the escaping keeps the output well-formed if not.
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Join already-escaped fields into one CSV line.
pub fn join_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field(""), "");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_join_row() {
        assert_eq!(join_row(["a", "b", "c"]), "a,b,c");
        assert_eq!(join_row(["a,b", "c"]), "\"a,b\",c");
        // Splitting a comma-free row on commas round-trips the fields
        let fields = ["123456789012", "Delivered", "2.5"];
        let row = join_row(fields);
        assert_eq!(row.split(',').collect::<Vec<_>>(), fields);
    }
}
