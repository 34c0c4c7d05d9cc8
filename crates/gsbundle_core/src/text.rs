//! Line iteration and size formatting for source text.

/// A 1-based line number within a source unit.
pub type LineNumber = u32;

/// Iterate over the lines of `text` together with their 1-based line numbers.
///
/// Lines are split on `\n` only. A trailing `\r` stays part of the line and
/// a trailing newline yields a final empty line, so line numbers agree with
/// what an editor shows.
pub fn numbered_lines(text: &str) -> impl Iterator<Item = (LineNumber, &str)> {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| ((index + 1) as LineNumber, line))
}

/// Format a byte count as kilobytes with the given number of decimals.
pub fn format_kb(bytes: usize, decimals: usize) -> String {
    format!("{:.*}", decimals, bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_lines_are_one_based() {
        let lines: Vec<_> = numbered_lines("a\nb\nc").collect();
        assert_eq!(lines, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn test_numbered_lines_keep_trailing_empty_line() {
        let lines: Vec<_> = numbered_lines("a\n").collect();
        assert_eq!(lines, vec![(1, "a"), (2, "")]);
    }

    #[test]
    fn test_numbered_lines_keep_carriage_return() {
        let lines: Vec<_> = numbered_lines("a\r\nb").collect();
        assert_eq!(lines[0], (1, "a\r"));
    }

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(0, 1), "0.0");
        assert_eq!(format_kb(1024, 1), "1.0");
        assert_eq!(format_kb(1536, 2), "1.50");
    }
}
