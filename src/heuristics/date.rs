//! Production-year recovery from free-text descriptions, per locale.

use crate::constants::NONE_I32;
use crate::types::Locale;
use super::{find_at, scan_number, skip_spaces, strip_span};

/// Result of one date scan; `year` is -1 when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateScan {
    pub year: i32,
    pub remaining: Option<String>,
    pub found: bool,
}

impl DateScan {
    fn none() -> Self {
        Self { year: NONE_I32, remaining: None, found: false }
    }
}

/// Recover a production year embedded in `description`. GBR expects a
/// parenthesized 4-digit year beginning "(19" or "(20"; EGY a leading
/// 4-digit prefix before a colon. The default locale takes the year from
/// descriptor tags instead (normalizer fallback), so nothing matches here.
pub fn extract_date(description: &str, locale: Locale, remove_data: bool) -> DateScan {
    let b = description.as_bytes();
    let hit = match locale {
        Locale::Gbr => scan_paren_year(b),
        Locale::Egypt => scan_prefix_year(b),
        Locale::Netherlands | Locale::Other => None,
    };
    match hit {
        Some((year, start, end)) => {
            let remaining =
                if remove_data { Some(strip_span(description, start, end)) } else { None };
            DateScan { year, remaining, found: true }
        }
        None => DateScan::none(),
    }
}

/// "(1999)" / "(2004)"
fn scan_paren_year(b: &[u8]) -> Option<(i32, usize, usize)> {
    let mut from = 0;
    while let Some(p) = find_at(b, b"(", from) {
        let century = &b[p + 1..(p + 3).min(b.len())];
        if (century == b"19" || century == b"20")
            && b.get(p + 3).is_some_and(|c| c.is_ascii_digit())
            && b.get(p + 4).is_some_and(|c| c.is_ascii_digit())
            && b.get(p + 5) == Some(&b')')
        {
            let (year, _) = scan_number(b, p + 1)?;
            return Some((year, p, p + 6));
        }
        from = p + 1;
    }
    None
}

/// "2004: ..." prefix
fn scan_prefix_year(b: &[u8]) -> Option<(i32, usize, usize)> {
    if b.len() < 5 || !b[..4].iter().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (year, after) = scan_number(b, 0)?;
    if after != 4 {
        return None; // longer digit run is not a year prefix
    }
    let i = skip_spaces(b, after);
    if b.get(i) != Some(&b':') {
        return None;
    }
    Some((year, 0, i + 1))
}
