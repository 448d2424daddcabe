//! Line classification and small string helpers shared by the CSV readers.

/// Field delimiter for every file the tool reads or writes.
pub const DELIMITER: char = ',';

/// Returns true when `line` looks like a header row.
///
/// A line is a header when it holds at most `max_digits` ASCII digits. Data
/// rows carry timestamps and ids, so they rarely fall under the threshold.
/// Lines of length 0 or 1 are never headers.
pub fn is_header(line: &str, max_digits: usize) -> bool {
    if line.len() <= 1 {
        return false;
    }
    line.bytes().filter(u8::is_ascii_digit).count() <= max_digits
}

/// Returns true when `line` has enough delimiters for `columns` fields.
///
/// Lines of length 0 or 1 are never valid rows.
pub fn is_csv_line(line: &str, columns: usize) -> bool {
    if line.len() <= 1 {
        return false;
    }
    delimiter_count(line) + 1 >= columns
}

/// Number of delimiters in `line`.
pub fn delimiter_count(line: &str) -> usize {
    line.matches(DELIMITER).count()
}

/// Split a row on the delimiter, trimming each cell and keeping empty ones.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(DELIMITER).map(str::trim).collect()
}

/// Parse the integer prefix of `s` the way C `strtol` does.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. Returns 0 when no digit is found and saturates on overflow.
pub fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in rest.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(v) => v,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Final component of a path, accepting both `/` and `\` separators.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
