// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

use crate::error::CsvError;

/* ---------------- Parsing ---------------- */

/// Minimal CSV parser (quotes + CRLF tolerant).
///
/// Blank lines are skipped. A quoted field still open at end of input is an
/// error: the file was cut short and its last row cannot be trusted.
pub fn parse_rows(text: &str, sep: char) -> Result<Vec<Vec<String>>, CsvError> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut quote_line = 0usize;
    let mut chars = text.trim_start_matches('\u{feff}').chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                    quote_line = line;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                line += 1;
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            c => {
                if c == '\n' { line += 1; }
                field.push(c);
            }
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote { line: quote_line });
    }

    // Flush a trailing row without newline.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Write an optional header followed by every row.
pub fn write_rows<W: Write>(
    mut w: W,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
    sep: char,
) -> io::Result<()> {
    if let Some(h) = headers {
        write_row(&mut w, h, sep)?;
    }
    for r in rows {
        write_row(&mut w, r, sep)?;
    }
    Ok(())
}

pub fn rows_to_string(rows: &[Vec<String>], headers: Option<&[String]>, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_rows(&mut buf, headers, rows, sep);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_fields_keep_separators_and_quotes() {
        let text = "A,B\n\"x, y\",\"say \"\"hi\"\"\"\n";
        let rows = parse_rows(text, ',').unwrap();
        assert_eq!(rows, vec![record!["A", "B"], record!["x, y", "say \"hi\""]]);
    }

    #[test]
    fn crlf_blank_lines_and_missing_final_newline() {
        let text = "a,b\r\n\r\nc,d";
        let rows = parse_rows(text, ',').unwrap();
        assert_eq!(rows, vec![record!["a", "b"], record!["c", "d"]]);
    }

    #[test]
    fn quoted_newline_stays_in_field() {
        let rows = parse_rows("\"line1\nline2\",z\n", ',').unwrap();
        assert_eq!(rows, vec![record!["line1\nline2", "z"]]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = parse_rows("a,b\nc,\"oops\n", ',').unwrap_err();
        assert_eq!(err, CsvError::UnterminatedQuote { line: 2 });
    }

    #[test]
    fn empty_trailing_cell_is_preserved() {
        let rows = parse_rows("a,b,\n", ',').unwrap();
        assert_eq!(rows, vec![record!["a", "b", ""]]);
    }

    #[test]
    fn writer_quotes_only_when_needed() {
        let rows = vec![record!["C1", "Lot 1; Stadium Dr", "plain"]];
        assert_eq!(rows_to_string(&rows, None, ';'), "C1;\"Lot 1; Stadium Dr\";plain\n");
        assert_eq!(rows_to_string(&rows, None, ','), "C1,Lot 1; Stadium Dr,plain\n");
    }

    #[test]
    fn header_is_written_first() {
        let header = record!["K", "V"];
        let s = rows_to_string(&[record!["1", "2"]], Some(&header), ',');
        assert_eq!(s, "K,V\n1,2\n");
    }
}
