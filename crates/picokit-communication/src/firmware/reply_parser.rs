//! Reply parsing
//!
//! Controller replies arrive as raw ASCII bytes of the form
//! `"{address}>{payload}\r\n"`. [`parse_reply`] strips the trailing
//! terminators and the two-character address echo (the caller already
//! knows which address it queried); the helpers below convert cleaned
//! payloads into typed values.

use picokit_core::ReplyError;
use std::str::FromStr;

/// Clean a raw reply down to its payload
///
/// The length check is explicit: a degenerate reply shorter than the
/// address echo must fail rather than silently yield a wrong slice.
pub fn parse_reply(raw: &[u8]) -> Result<String, ReplyError> {
    // The protocol is ASCII-only; decode each byte as its code point.
    let text: String = raw.iter().map(|&b| b as char).collect();
    let trimmed = text.trim_end();

    let mut chars = trimmed.chars();
    if chars.next().is_none() || chars.next().is_none() {
        return Err(ReplyError::TooShort {
            len: trimmed.chars().count(),
        });
    }

    Ok(chars.as_str().to_string())
}

/// Parse a numeric payload
pub fn parse_number<T: FromStr>(payload: &str) -> Result<T, ReplyError> {
    payload
        .trim()
        .parse()
        .map_err(|_| ReplyError::NotNumeric {
            payload: payload.to_string(),
        })
}

/// Status flag convention: the last payload character is '1' when done
pub fn trailing_flag(payload: &str) -> bool {
    payload.ends_with('1')
}

/// Extract the trailing digit of a payload
///
/// Motor type replies carry the code as their final character; reply
/// width varies by firmware revision, so only that character is trusted.
pub fn trailing_digit(payload: &str) -> Result<u8, ReplyError> {
    payload
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .map(|d| d as u8)
        .ok_or_else(|| ReplyError::NotNumeric {
            payload: payload.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_echo_and_terminators() {
        assert_eq!(parse_reply(b"1>XYZ\r\n").unwrap(), "XYZ");
        assert_eq!(parse_reply(b"2>500\r").unwrap(), "500");
        assert_eq!(parse_reply(b"1>0").unwrap(), "0");
    }

    #[test]
    fn empty_payload_is_allowed() {
        // Exactly the echo: payload is empty but the reply is well-formed.
        assert_eq!(parse_reply(b"1>\r\n").unwrap(), "");
    }

    #[test]
    fn short_replies_fail() {
        assert_eq!(parse_reply(b"").unwrap_err(), ReplyError::TooShort { len: 0 });
        assert_eq!(
            parse_reply(b"1\r\n").unwrap_err(),
            ReplyError::TooShort { len: 1 }
        );
        assert_eq!(
            parse_reply(b"\r\n \r").unwrap_err(),
            ReplyError::TooShort { len: 0 }
        );
    }

    #[test]
    fn parses_numbers() {
        assert_eq!(parse_number::<u32>("500").unwrap(), 500);
        assert_eq!(parse_number::<i32>("-1200").unwrap(), -1200);
        assert!(matches!(
            parse_number::<i32>("MOTOR").unwrap_err(),
            ReplyError::NotNumeric { .. }
        ));
    }

    #[test]
    fn trailing_flag_reads_last_character() {
        assert!(trailing_flag("1"));
        assert!(trailing_flag("001"));
        assert!(!trailing_flag("0"));
        assert!(!trailing_flag("10"));
        assert!(!trailing_flag(""));
    }

    #[test]
    fn trailing_digit_rejects_non_digits() {
        assert_eq!(trailing_digit("3").unwrap(), 3);
        assert_eq!(trailing_digit("02").unwrap(), 2);
        assert!(trailing_digit("x").is_err());
        assert!(trailing_digit("").is_err());
    }
}
