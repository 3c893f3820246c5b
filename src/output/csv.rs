//! CSV output

use super::Tabular;

/// Escape a value for CSV output (RFC 4180 quoting)
pub fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render records as CSV lines
pub fn to_csv<T: Tabular>(records: &[T], no_header: bool) -> String {
    let mut out = String::new();
    if !no_header {
        out.push_str(&T::headers().join(","));
        out.push('\n');
    }
    for record in records {
        let cells: Vec<String> = record.row().iter().map(|c| escape_csv(c)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::Sample;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("has,comma"), "\"has,comma\"");
        assert_eq!(escape_csv("has\"quote"), "\"has\"\"quote\"");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn test_to_csv() {
        let rows = [Sample::new("SALES", "Sales, EMEA")];
        assert_eq!(to_csv(&rows, false), "NAME,LABEL\nSALES,\"Sales, EMEA\"\n");
        assert_eq!(to_csv(&rows, true), "SALES,\"Sales, EMEA\"\n");
    }
}
