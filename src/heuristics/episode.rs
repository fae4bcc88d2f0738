//! Season/episode recovery from free-text descriptions, per locale.

use crate::constants::NONE_I32;
use crate::types::Locale;
use super::{find_at, scan_number, skip_spaces, strip_span, Hit};

/// Result of one episode scan. `remaining` is `Some` only when matched text
/// was removed; `found == false` means no embedded numbers were detected
/// and the description is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeScan {
    pub season: i32,
    pub episode: i32,
    pub remaining: Option<String>,
    pub found: bool,
}

impl EpisodeScan {
    fn none() -> Self {
        Self { season: NONE_I32, episode: NONE_I32, remaining: None, found: false }
    }
}

type Rule = fn(&[u8]) -> Option<Hit>;

/// Rules are evaluated in order; the first match wins.
const GBR_RULES: &[Rule] = &[
    scan_bracket_season,
    scan_bracket_episode,
    scan_slash_episode,
    scan_space_episode,
];
const EGY_RULES: &[Rule] = &[scan_season_prefix, scan_episode_prefix];
const DEFAULT_RULES: &[Rule] = &[scan_paren_slash_season];

/// Recover season/episode numbers embedded in `description`. With
/// `remove_data` the matched substring is stripped and the remainder
/// trimmed; without it the numbers are reported but the text is unchanged.
pub fn extract_episode(description: &str, locale: Locale, remove_data: bool) -> EpisodeScan {
    let rules: &[Rule] = match locale {
        Locale::Gbr => GBR_RULES,
        Locale::Egypt => EGY_RULES,
        Locale::Netherlands => &[], // heuristics suppressed
        Locale::Other => DEFAULT_RULES,
    };
    for rule in rules {
        if let Some(hit) = rule(description.as_bytes()) {
            let remaining =
                if remove_data { Some(strip_span(description, hit.start, hit.end)) } else { None };
            return EpisodeScan { season: hit.season, episode: hit.episode, remaining, found: true };
        }
    }
    EpisodeScan::none()
}

/// GBR: "(S3)" or "(S3/Ep12)"
fn scan_bracket_season(b: &[u8]) -> Option<Hit> {
    let mut from = 0;
    while let Some(p) = find_at(b, b"(S", from) {
        if b.get(p + 2).is_some_and(|c| c.is_ascii_digit()) {
            let (season, after_season) = scan_number(b, p + 2)?;
            let mut i = after_season;
            let mut episode = NONE_I32;
            if b.get(i) == Some(&b'/') {
                let mut j = skip_spaces(b, i + 1);
                if b[j..].starts_with(b"Ep") {
                    j = skip_spaces(b, j + 2);
                    if b.get(j) == Some(&b'.') {
                        j = skip_spaces(b, j + 1);
                    }
                    if let Some((e, nj)) = scan_number(b, j) {
                        episode = e;
                        i = nj;
                    }
                }
            }
            if b.get(i) == Some(&b')') {
                i += 1;
            }
            return Some(Hit { season, episode, start: p, end: i });
        }
        from = p + 1;
    }
    None
}

/// GBR: "(Ep 12)"
fn scan_bracket_episode(b: &[u8]) -> Option<Hit> {
    let mut from = 0;
    while let Some(p) = find_at(b, b"(Ep", from) {
        let mut i = skip_spaces(b, p + 3);
        if b.get(i) == Some(&b'.') {
            i = skip_spaces(b, i + 1);
        }
        if let Some((episode, mut end)) = scan_number(b, i) {
            if b.get(end) == Some(&b')') {
                end += 1;
            }
            return Some(Hit { season: NONE_I32, episode, start: p, end });
        }
        from = p + 1;
    }
    None
}

/// GBR: "S3/Ep12" without brackets; scans backward from the slash for the
/// "S" digits.
fn scan_slash_episode(b: &[u8]) -> Option<Hit> {
    let mut from = 0;
    while let Some(p) = find_at(b, b"/Ep", from) {
        let mut i = skip_spaces(b, p + 3);
        if b.get(i) == Some(&b'.') {
            i = skip_spaces(b, i + 1);
        }
        if let Some((episode, end)) = scan_number(b, i) {
            let (season, start) = season_before(b, p);
            return Some(Hit { season, episode, start, end });
        }
        from = p + 1;
    }
    None
}

/// GBR: " Ep12"; the digit must follow "Ep" immediately.
fn scan_space_episode(b: &[u8]) -> Option<Hit> {
    let mut from = 0;
    while let Some(p) = find_at(b, b" Ep", from) {
        if b.get(p + 3).is_some_and(|c| c.is_ascii_digit()) {
            let (episode, end) = scan_number(b, p + 3)?;
            let (season, start) = season_before(b, p);
            return Some(Hit { season, episode, start, end });
        }
        from = p + 1;
    }
    None
}

/// Backward scan for "S<digits>" ending right before position `p`.
fn season_before(b: &[u8], p: usize) -> (i32, usize) {
    let mut k = p;
    while k > 0 && b[k - 1].is_ascii_digit() {
        k -= 1;
    }
    if k < p && k > 0 && b[k - 1] == b'S' {
        if let Some((season, _)) = scan_number(b, k) {
            return (season, k - 1);
        }
    }
    (NONE_I32, p)
}

/// EGY: "Season 2, Episode 5." / "Season 2." prefix
fn scan_season_prefix(b: &[u8]) -> Option<Hit> {
    if !b.starts_with(b"Season") {
        return None;
    }
    let i = skip_spaces(b, 6);
    let (season, after) = scan_number(b, i)?;
    let mut end = after;
    if b.get(end) == Some(&b'.') {
        end += 1;
    }
    let mut episode = NONE_I32;
    let mut j = end;
    if b.get(j) == Some(&b',') {
        j += 1;
    }
    j = skip_spaces(b, j);
    if b[j..].starts_with(b"Episode") {
        let k = skip_spaces(b, j + 7);
        if let Some((e, nk)) = scan_number(b, k) {
            episode = e;
            end = nk;
            if b.get(end) == Some(&b'.') {
                end += 1;
            }
        }
    }
    Some(Hit { season, episode, start: 0, end })
}

/// EGY: bare "Episode 4." prefix
fn scan_episode_prefix(b: &[u8]) -> Option<Hit> {
    if !b.starts_with(b"Episode") {
        return None;
    }
    let i = skip_spaces(b, 7);
    let (episode, mut end) = scan_number(b, i)?;
    if b.get(end) == Some(&b'.') {
        end += 1;
    }
    Some(Hit { season: NONE_I32, episode, start: 0, end })
}

/// Default: "(Ep. 3/s2)" or "(3/s2)"; the "/s" separator is required.
fn scan_paren_slash_season(b: &[u8]) -> Option<Hit> {
    let mut from = 0;
    while let Some(p) = find_at(b, b"(", from) {
        let mut i = p + 1;
        if b[i..].starts_with(b"Ep") {
            i += 2;
            if b.get(i) == Some(&b'.') {
                i += 1;
            }
            i = skip_spaces(b, i);
        }
        if let Some((episode, after)) = scan_number(b, i) {
            if b[after..].starts_with(b"/s") {
                if let Some((season, mut end)) = scan_number(b, after + 2) {
                    if b.get(end) == Some(&b')') {
                        end += 1;
                    }
                    return Some(Hit { season, episode, start: p, end });
                }
            }
        }
        from = p + 1;
    }
    None
}
