//! Conversion between human-entered times and hundredths of a second.

/// Parses a time string into hundredths of a second.
///
/// Accepted forms: `M:SS.hh`, `M:SS`, `:SS.hh`, `:SS`, `SS.hh` and plain
/// seconds. A single fraction digit means tenths, digits past the second are
/// dropped. Anything else, including seconds of 60 or more after a colon,
/// yields 0. Callers reading free text must treat 0 as "no time".
pub fn parse_time(input: &str) -> u32 {
    try_parse_time(input).unwrap_or(0)
}

fn try_parse_time(input: &str) -> Option<u32> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match input.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = if minutes.is_empty() {
                0
            } else {
                parse_digits(minutes)?
            };
            let seconds = parse_seconds(seconds)?;
            if seconds >= 6_000 {
                return None;
            }
            minutes.checked_mul(6_000)?.checked_add(seconds)
        }
        None => parse_seconds(input),
    }
}

/// `SS` or `SS.hh`, returned in hundredths.
fn parse_seconds(s: &str) -> Option<u32> {
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };

    let whole = parse_digits(whole)?;
    let hundredths = match fraction {
        None => 0,
        Some(f) if f.is_empty() => 0,
        Some(f) => {
            if !f.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let mut digits = f.bytes().take(2).map(|b| u32::from(b - b'0'));
            let tenths = digits.next().unwrap_or(0);
            let hundredths = digits.next().unwrap_or(0);
            tenths * 10 + hundredths
        }
    };

    whole.checked_mul(100)?.checked_add(hundredths)
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Formats hundredths as `MM:SS.hh`.
pub fn format_time(hundredths: u32) -> String {
    let minutes = hundredths / 6_000;
    let seconds = (hundredths / 100) % 60;
    let fraction = hundredths % 100;
    format!("{:02}:{:02}.{:02}", minutes, seconds, fraction)
}

/// Formats whole seconds as `M:SS`, used for start delays.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_and_seconds() {
        assert_eq!(parse_time("1:10"), 7_000);
        assert_eq!(parse_time("1:10.00"), 7_000);
        assert_eq!(parse_time("2:31.45"), 15_145);
        assert_eq!(parse_time("  0:59.99 "), 5_999);
    }

    #[test]
    fn test_parse_leading_colon() {
        assert_eq!(parse_time(":58.20"), 5_820);
        assert_eq!(parse_time(":58"), 5_800);
    }

    #[test]
    fn test_parse_plain_seconds() {
        assert_eq!(parse_time("65.3"), 6_530);
        assert_eq!(parse_time("65.37"), 6_537);
        assert_eq!(parse_time("65.379"), 6_537);
        assert_eq!(parse_time("90"), 9_000);
        assert_eq!(parse_time("90."), 9_000);
    }

    #[test]
    fn test_parse_is_total() {
        for garbage in ["", "   ", "NT", "DNS", "1:2:3", "1:60", "-5", "abc.12", "1:xx", ".5", "12.a"] {
            assert_eq!(parse_time(garbage), 0, "input {garbage:?}");
        }
        assert_eq!(parse_time("99999999999"), 0);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(7_000), "01:10.00");
        assert_eq!(format_time(0), "00:00.00");
        assert_eq!(format_time(15_145), "02:31.45");
        assert_eq!(format_time(5_999), "00:59.99");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for input in ["1:10", "65.3", ":58", "2:31.456", "nonsense"] {
            let once = format_time(parse_time(input));
            let twice = format_time(parse_time(&once));
            assert_eq!(once, twice, "input {input:?}");
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(75), "1:15");
        assert_eq!(format_clock(90), "1:30");
    }
}
