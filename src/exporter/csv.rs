//! Minimal quote-aware CSV reading and writing.
//!
//! Covers exactly what the exports and the batch-input reader need:
//! comma separation, RFC-style double-quote escaping, and tolerant
//! line endings.

use std::io::{self, Write};

/// True when a field must be quoted to survive a round trip.
fn needs_quotes(field: &str) -> bool {
    field.contains(',')
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
        || field.starts_with(' ')
        || field.ends_with(' ')
}

fn quote(field: &str) -> String {
    let mut quoted = String::with_capacity(field.len() + 2);
    quoted.push('"');
    for c in field.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Writes one row, quoting fields only when required.
pub fn write_row<W: Write>(writer: &mut W, fields: &[String]) -> io::Result<()> {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            writer.write_all(b",")?;
        }
        if needs_quotes(field) {
            writer.write_all(quote(field).as_bytes())?;
        } else {
            writer.write_all(field.as_bytes())?;
        }
    }
    writer.write_all(b"\n")
}

/// Parses CSV text into rows of fields.
///
/// Handles quoted fields, doubled quotes inside them, and both `\n` and
/// `\r\n` line endings. Blank lines produce no row.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                if row.iter().any(|f| !f.is_empty()) {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        if row.iter().any(|f| !f.is_empty()) {
            rows.push(row);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_row_plain() {
        let mut out = Vec::new();
        write_row(
            &mut out,
            &["TCS".to_string(), "2024".to_string(), "1200".to_string()],
        )
        .unwrap();
        assert_eq!(out, b"TCS,2024,1200\n");
    }

    #[test]
    fn test_write_row_quotes_when_needed() {
        let mut out = Vec::new();
        write_row(
            &mut out,
            &["Profit & Loss".to_string(), "a,b".to_string(), "say \"hi\"".to_string()],
        )
        .unwrap();
        assert_eq!(out, b"Profit & Loss,\"a,b\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_parse_rows() {
        let rows = parse_rows("Company,Symbol\n\"Tata, Sons\",TCS\r\nInfosys,INFY\n\n");
        assert_eq!(
            rows,
            vec![
                vec!["Company".to_string(), "Symbol".to_string()],
                vec!["Tata, Sons".to_string(), "TCS".to_string()],
                vec!["Infosys".to_string(), "INFY".to_string()],
            ]
        );
    }

    #[test]
    fn test_parse_rows_embedded_quotes_and_trailing_line() {
        let rows = parse_rows("a,\"he said \"\"ok\"\"\",c");
        assert_eq!(
            rows,
            vec![vec![
                "a".to_string(),
                "he said \"ok\"".to_string(),
                "c".to_string()
            ]]
        );
    }

    #[test]
    fn test_round_trip() {
        let fields = vec![
            "plain".to_string(),
            "with,comma".to_string(),
            "with \"quote\"".to_string(),
        ];

        let mut out = Vec::new();
        write_row(&mut out, &fields).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(parse_rows(&text), vec![fields]);
    }
}
