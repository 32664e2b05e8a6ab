//! Minimal parser for the comma-separated roster and question files.
//!
//! The source files are exported from spreadsheets, so cells may be wrapped
//! in double quotes and contain commas or doubled quotes. Nothing here
//! handles embedded newlines; the exports never produce them.

/// Splits one line into cells, honoring quoted cells and `""` escapes.
pub fn parse_row(line: &str) -> Vec<String> {
    let line = line.trim_end_matches('\r');
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if cell.is_empty() => in_quotes = true,
            ',' if !in_quotes => cells.push(std::mem::take(&mut cell)),
            _ => cell.push(c),
        }
    }
    cells.push(cell);
    cells
}
