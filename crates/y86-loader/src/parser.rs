//! Fixed-column parser for one line of a `.yo` object file.
//!
//! Every line is at least 29 characters long and carries `|` at column 28;
//! everything after the marker is a free-form comment. Lines with an address
//! look like:
//!
//! ```text
//! 0x00a: 30f40002000000000000 |   irmovq stack, %rsp
//! ^^^^^^ ^^^^^^^^^^^^^^^^^^^^ ^
//! 0    6 7                    28
//! ```
//!
//! Lines without an address must be blank up to the marker.

use thiserror::Error;

/// First column of the hex address digits.
pub const ADDRESS_BEGIN: usize = 2;
/// Last column of the hex address digits.
pub const ADDRESS_END: usize = 4;
/// First column of the data digits.
pub const DATA_BEGIN: usize = 7;
/// Column holding the `|` comment marker.
pub const COMMENT_COLUMN: usize = 28;

/// Structured contents of one valid line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectLine {
    /// Address field, `None` for blank or comment-only lines.
    pub address: Option<u64>,
    /// Bytes placed starting at `address`.
    pub data: Vec<u8>,
}

impl ObjectLine {
    /// Returns `true` when the line places at least one byte.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.address.is_some() && !self.data.is_empty()
    }
}

/// Reason a line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line ends before the comment marker column.
    #[error("line is shorter than {} columns", COMMENT_COLUMN + 1)]
    TooShort,
    /// Column 28 is not `|`.
    #[error("missing `|` at column {}", COMMENT_COLUMN)]
    MissingCommentMarker,
    /// The `0xAAA: ` address prefix is malformed.
    #[error("malformed address field")]
    MalformedAddress,
    /// A data digit is not hexadecimal.
    #[error("invalid data digit at column {column}")]
    InvalidDataDigit {
        /// Zero-based column of the digit.
        column: usize,
    },
    /// The data field does not hold whole bytes.
    #[error("odd number of data digits")]
    OddDataDigits,
    /// A column that must be blank holds text.
    #[error("unexpected character at column {column}")]
    UnexpectedCharacter {
        /// Zero-based column of the character.
        column: usize,
    },
}

/// Parses one line (without its line terminator).
///
/// # Errors
///
/// Returns the first layout violation found, scanning left to right after
/// the length and comment-marker checks.
pub fn parse_line(text: &str) -> Result<ObjectLine, ParseError> {
    let bytes = text.as_bytes();
    if bytes.len() <= COMMENT_COLUMN {
        return Err(ParseError::TooShort);
    }
    if bytes[COMMENT_COLUMN] != b'|' {
        return Err(ParseError::MissingCommentMarker);
    }

    if bytes[0] != b'0' {
        expect_blank(bytes, 0)?;
        return Ok(ObjectLine::default());
    }

    let address_digits = &bytes[ADDRESS_BEGIN..=ADDRESS_END];
    if bytes[1] != b'x'
        || bytes[ADDRESS_END + 1] != b':'
        || bytes[ADDRESS_END + 2] != b' '
        || !address_digits.iter().all(u8::is_ascii_hexdigit)
    {
        return Err(ParseError::MalformedAddress);
    }
    let address = hex_value(address_digits);

    let digit_count = bytes[DATA_BEGIN..]
        .iter()
        .take_while(|&&byte| byte != b' ')
        .count();
    let data_end = DATA_BEGIN + digit_count;
    if let Some(offset) = bytes[DATA_BEGIN..data_end]
        .iter()
        .position(|byte| !byte.is_ascii_hexdigit())
    {
        return Err(ParseError::InvalidDataDigit {
            column: DATA_BEGIN + offset,
        });
    }
    if digit_count % 2 != 0 {
        return Err(ParseError::OddDataDigits);
    }
    expect_blank(bytes, data_end)?;

    let data = bytes[DATA_BEGIN..data_end]
        .chunks_exact(2)
        .map(|pair| u8::try_from(hex_value(pair)).unwrap_or(0))
        .collect();

    Ok(ObjectLine {
        address: Some(address),
        data,
    })
}

/// Requires columns `from..COMMENT_COLUMN` to be spaces.
fn expect_blank(bytes: &[u8], from: usize) -> Result<(), ParseError> {
    match bytes[from..COMMENT_COLUMN]
        .iter()
        .position(|&byte| byte != b' ')
    {
        Some(offset) => Err(ParseError::UnexpectedCharacter {
            column: from + offset,
        }),
        None => Ok(()),
    }
}

/// Value of validated ASCII hex digits.
fn hex_value(digits: &[u8]) -> u64 {
    digits.iter().fold(0, |acc, &digit| {
        (acc << 4) | u64::from(char::from(digit).to_digit(16).unwrap_or(0))
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_line, ObjectLine, ParseError};
    use rstest::rstest;

    #[test]
    fn parses_data_line() {
        let line = parse_line("0x00a: 30f40002000000000000 |   irmovq stack, %rsp").expect("valid");

        assert_eq!(line.address, Some(0x00a));
        assert_eq!(
            line.data,
            vec![0x30, 0xf4, 0x00, 0x02, 0, 0, 0, 0, 0, 0]
        );
        assert!(line.has_data());
    }

    #[test]
    fn accepts_uppercase_hex() {
        let line = parse_line("0x1F0: AB                   |").expect("valid");

        assert_eq!(line.address, Some(0x1f0));
        assert_eq!(line.data, vec![0xAB]);
    }

    #[test]
    fn address_without_data_places_nothing() {
        let line = parse_line("0x100:                      | .pos 0x100").expect("valid");

        assert_eq!(line.address, Some(0x100));
        assert!(line.data.is_empty());
        assert!(!line.has_data());
    }

    #[test]
    fn blank_line_with_comment_is_accepted() {
        let line = parse_line("                            | # comment").expect("valid");

        assert_eq!(line, ObjectLine::default());
    }

    #[test]
    fn ten_byte_instruction_fills_data_field() {
        let line = parse_line("0x000: 30f00100000000000000 |").expect("valid");

        assert_eq!(line.data.len(), 10);
    }

    #[rstest]
    #[case::empty("", ParseError::TooShort)]
    #[case::short("0x000: 00 |", ParseError::TooShort)]
    #[case::marker_moved("0x000: 00                    x|", ParseError::MissingCommentMarker)]
    #[case::text_without_address("   stray text               |", ParseError::UnexpectedCharacter { column: 3 })]
    #[case::missing_x("00000: 00                   |", ParseError::MalformedAddress)]
    #[case::missing_colon("0x000  00                   |", ParseError::MalformedAddress)]
    #[case::bad_address_digit("0x0g0: 00                   |", ParseError::MalformedAddress)]
    #[case::no_space_after_colon("0x000:00                    |", ParseError::MalformedAddress)]
    #[case::bad_data_digit("0x000: 0z                   |", ParseError::InvalidDataDigit { column: 8 })]
    #[case::odd_digits("0x000: 000                  |", ParseError::OddDataDigits)]
    #[case::text_after_data("0x000: 00 ff                |", ParseError::UnexpectedCharacter { column: 10 })]
    #[case::data_runs_into_marker("0x000: 000000000000000000000|", ParseError::InvalidDataDigit { column: 28 })]
    fn rejects_malformed_lines(#[case] text: &str, #[case] expected: ParseError) {
        assert_eq!(parse_line(text), Err(expected));
    }
}
