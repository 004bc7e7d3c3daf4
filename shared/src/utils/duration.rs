//! Duration-string parsing for TTL configuration
//!
//! TTL environment variables accept a bare number of seconds or a value
//! with a unit suffix: `45s`, `30m`, `1h`, `7d`.

/// Parse a duration string into whole seconds
///
/// # Examples
///
/// ```
/// use tg_shared::utils::duration;
///
/// assert_eq!(duration::parse("1h"), Ok(3600));
/// assert_eq!(duration::parse("7d"), Ok(604_800));
/// assert_eq!(duration::parse("90"), Ok(90));
/// ```
pub fn parse(value: &str) -> Result<i64, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("empty duration".to_string());
    }

    let (number, multiplier) = match value.chars().last() {
        Some('s') => (&value[..value.len() - 1], 1),
        Some('m') => (&value[..value.len() - 1], 60),
        Some('h') => (&value[..value.len() - 1], 3600),
        Some('d') => (&value[..value.len() - 1], 86400),
        Some(c) if c.is_ascii_digit() => (value, 1),
        _ => return Err(format!("invalid duration: {}", value)),
    };

    let amount: i64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration: {}", value))?;
    if amount < 0 {
        return Err(format!("negative duration: {}", value));
    }

    amount
        .checked_mul(multiplier)
        .ok_or_else(|| format!("duration overflow: {}", value))
}
