//! Prefix-limit helpers for product listings
//!
//! `limit` is parsed leniently: leading whitespace, an optional sign and the
//! leading digits count, anything after is ignored. Absent, non-numeric or
//! zero values mean "no limit". A negative limit drops that many items from
//! the end instead.

/// Parse a raw `limit` query value; `None` when it is absent or falsy.
pub fn parse_limit(raw: Option<&str>) -> Option<i64> {
    let s = raw?.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let number = digits.get(..end).filter(|d| !d.is_empty())?;
    // Overflow saturates: "more than we could ever hold".
    let magnitude = number.parse::<i64>().unwrap_or(i64::MAX);
    let n = if negative { -magnitude } else { magnitude };
    (n != 0).then_some(n)
}

/// Keep the first `n` items in stored order, or all but the last `|n|` when
/// `n` is negative. `None` keeps everything.
pub fn apply_limit<T>(mut items: Vec<T>, limit: Option<i64>) -> Vec<T> {
    let keep = match limit {
        None => return items,
        Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
        Some(n) => {
            let drop = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
            items.len().saturating_sub(drop)
        }
    };
    items.truncate(keep);
    items
}
