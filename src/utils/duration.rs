//! Human duration strings.
//!
//! Accepted forms, tried in order: a compound `[Nh][Mm]` with at least one
//! unit present, decimal hours with a dot (`1.5h`), and a bare integer
//! taken as minutes. Callers pass tokenized words; surrounding whitespace
//! is not stripped here.

/// Raised when an input matches none of the accepted duration forms.
///
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration '{0}': expected \"30m\", \"1h\", \"2h30m\", \"1.5h\", or a number of minutes")]
pub struct DurationError(pub String);

/// Parse a duration string into whole minutes.
///
pub fn parse_duration(input: &str) -> Result<u32, DurationError> {
    if input.is_empty() {
        return Err(DurationError(input.to_string()));
    }
    if let Some(minutes) = parse_compound(input) {
        return Ok(minutes);
    }
    if let Some(minutes) = parse_decimal_hours(input) {
        return Ok(minutes);
    }
    if let Ok(minutes) = input.parse::<u32>() {
        return Ok(minutes);
    }
    Err(DurationError(input.to_string()))
}

/// Format whole minutes as the canonical `{h,m}` string. This is the
/// inverse of [`parse_duration`] for every canonical output.
///
pub fn format_minutes(total: u32) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    match (hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h{}m", h, m),
    }
}

/// `[Nh][Mm]` where N and M are non-negative decimal integers and at
/// least one unit is present. Anything trailing makes the match fail.
fn parse_compound(input: &str) -> Option<u32> {
    let bytes = input.as_bytes();
    let mut pos = 0;
    let mut hours: Option<u32> = None;
    let mut minutes: Option<u32> = None;

    let digits = |bytes: &[u8], start: usize| {
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        end
    };

    let end = digits(bytes, pos);
    if end == pos {
        return None;
    }
    match bytes.get(end) {
        Some(b'h') => {
            hours = input[pos..end].parse().ok();
            hours?;
            pos = end + 1;
            let m_end = digits(bytes, pos);
            if m_end > pos {
                if bytes.get(m_end) != Some(&b'm') {
                    return None;
                }
                minutes = input[pos..m_end].parse().ok();
                minutes?;
                pos = m_end + 1;
            }
        }
        Some(b'm') => {
            minutes = input[pos..end].parse().ok();
            minutes?;
            pos = end + 1;
        }
        _ => return None,
    }
    if pos != bytes.len() {
        return None;
    }
    hours
        .unwrap_or(0)
        .checked_mul(60)?
        .checked_add(minutes.unwrap_or(0))
}

/// `<F>h` where F is a decimal containing a dot. Converts to floor(60·F).
fn parse_decimal_hours(input: &str) -> Option<u32> {
    let number = input.strip_suffix('h')?;
    if !number.contains('.') {
        return None;
    }
    let value: f64 = number.parse().ok()?;
    if !value.is_finite() || value < 0.0 || value * 60.0 > u32::MAX as f64 {
        return None;
    }
    Some((value * 60.0).floor() as u32)
}
