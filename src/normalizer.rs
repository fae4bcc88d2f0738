// src/normalizer.rs
//! Builds the exported programme record from one decoded event.

use crate::constants::NONE_I32;
use crate::eit::EitEvent;
use crate::heuristics::{extract_date, extract_episode};
use crate::types::{GrabberConfig, ProgrammeRecord, RunContext};

/// DVB content level-1 genre names
fn genre_name(nibble: u8) -> Option<&'static str> {
    match nibble {
        0x1 => Some("Movie/Drama"),
        0x2 => Some("News/Current Affairs"),
        0x3 => Some("Show/Game Show"),
        0x4 => Some("Sports"),
        0x5 => Some("Children/Youth"),
        0x6 => Some("Music/Ballet/Dance"),
        0x7 => Some("Arts/Culture"),
        0x8 => Some("Social/Political/Economics"),
        0x9 => Some("Education/Science"),
        0xA => Some("Leisure/Hobbies"),
        _ => None,
    }
}

/// Combine the decoded event, its descriptor-derived values and the locale
/// heuristics into one record for the service identified by `triple`.
/// Events without a defined start time produce nothing.
pub fn normalize(
    triple: (u16, u16, u16),
    event: &EitEvent,
    cfg: &GrabberConfig,
    ctx: &mut RunContext,
) -> Option<ProgrammeRecord> {
    let start_time = event.start_time?;
    let remove_data = !cfg.preserve_matched_text;

    // descriptor-tagged numbers take precedence; heuristics fill the gaps
    // from the free text
    let numbers = event.season_episode();
    let mut season_number = numbers.season;
    let mut episode_number = numbers.episode;
    let episode_count = numbers.count;
    let mut description = event.short_description.clone();

    if season_number == NONE_I32 || episode_number == NONE_I32 {
        let scan = extract_episode(&description, cfg.locale, remove_data);
        if scan.found {
            if season_number == NONE_I32 {
                season_number = scan.season;
            }
            if episode_number == NONE_I32 {
                episode_number = scan.episode;
            }
            if let Some(remaining) = scan.remaining {
                description = remaining;
            }
        }
    }

    let mut date = None;
    let date_scan = extract_date(&description, cfg.locale, remove_data);
    if date_scan.found {
        date = Some(date_scan.year.to_string());
        if let Some(remaining) = date_scan.remaining {
            description = remaining;
        }
    } else if let Some(year) = event.year() {
        date = Some(year);
    }

    let category = if cfg.use_description_as_category {
        (!description.is_empty()).then(|| description.clone())
    } else {
        event.content_nibbles.and_then(|(level1, level2)| {
            genre_name(level1).map(|name| {
                if cfg.use_content_subtype_for_category {
                    format!("{name} ({level1:X}.{level2:X})")
                } else {
                    name.to_string()
                }
            })
        })
    };
    if let Some(c) = &category {
        ctx.count_category(c);
    }

    Some(ProgrammeRecord {
        original_network_id: triple.0,
        transport_stream_id: triple.1,
        service_id: triple.2,
        start_time,
        duration_secs: event.duration_secs,
        event_name: event.event_name.clone(),
        short_description: description,
        event_subtitle: event.episode_title(),
        season_number,
        episode_number,
        episode_count,
        date,
        country: event.country(),
        cast: event.cast(),
        directors: event.directors(),
        producers: event.producers(),
        writers: event.writers(),
        parental_rating: event.parental_rating,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eit::{ExtendedEventItem, ExtendedEventText};
    use crate::types::Locale;
    use chrono::NaiveDate;

    fn event_with(items: &[(&str, &str)], description: &str) -> EitEvent {
        EitEvent {
            event_id: 1,
            start_time: NaiveDate::from_ymd_opt(2004, 5, 1).unwrap().and_hms_opt(20, 0, 0),
            duration_secs: 3600,
            running_status: 4,
            scrambled: false,
            language: "eng".into(),
            event_name: "Title".into(),
            short_description: description.into(),
            content_nibbles: Some((0x1, 0x4)),
            component_type_video: None,
            component_type_audio: None,
            parental_rating: NONE_I32,
            extended: Some(ExtendedEventText {
                items: items
                    .iter()
                    .map(|(t, v)| ExtendedEventItem { tag: t.to_string(), text: v.to_string() })
                    .collect(),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn merges_tags_and_heuristics() {
        let cfg = GrabberConfig { locale: Locale::Gbr, ..Default::default() };
        let mut ctx = RunContext::default();
        let ev = event_with(&[("DIRECTOR", "J. Doe")], "Drama (S3/Ep12)");
        let rec = normalize((3, 2, 0x0101), &ev, &cfg, &mut ctx).unwrap();
        assert_eq!((rec.season_number, rec.episode_number), (3, 12));
        assert_eq!(rec.short_description, "Drama");
        assert_eq!(rec.directors, vec!["J. Doe"]);
        assert_eq!(rec.category.as_deref(), Some("Movie/Drama"));
        assert_eq!(ctx.category_counts["Movie/Drama"], 1);
    }

    #[test]
    fn tagged_numbers_win_over_heuristics() {
        let cfg = GrabberConfig { locale: Locale::Gbr, ..Default::default() };
        let mut ctx = RunContext::default();
        let ev = event_with(&[("TEP", "7:9")], "Drama (S3/Ep12)");
        let rec = normalize((3, 2, 0x0101), &ev, &cfg, &mut ctx).unwrap();
        assert_eq!((rec.season_number, rec.episode_number), (7, 9));
        // nothing missing, so the description keeps its bracket text
        assert_eq!(rec.short_description, "Drama (S3/Ep12)");
    }

    #[test]
    fn year_tag_is_date_fallback() {
        let cfg = GrabberConfig::default();
        let mut ctx = RunContext::default();
        let ev = event_with(&[("YEAR", "1999")], "A film");
        let rec = normalize((3, 2, 0x0101), &ev, &cfg, &mut ctx).unwrap();
        assert_eq!(rec.date.as_deref(), Some("1999"));
    }

    #[test]
    fn gbr_date_scan_beats_year_tag() {
        let cfg = GrabberConfig { locale: Locale::Gbr, ..Default::default() };
        let mut ctx = RunContext::default();
        let ev = event_with(&[("YEAR", "1999")], "Heat (1995)");
        let rec = normalize((3, 2, 0x0101), &ev, &cfg, &mut ctx).unwrap();
        assert_eq!(rec.date.as_deref(), Some("1995"));
        assert_eq!(rec.short_description, "Heat");
    }

    #[test]
    fn undefined_start_emits_nothing() {
        let cfg = GrabberConfig::default();
        let mut ctx = RunContext::default();
        let mut ev = event_with(&[], "x");
        ev.start_time = None;
        assert!(normalize((3, 2, 0x0101), &ev, &cfg, &mut ctx).is_none());
    }

    #[test]
    fn preserve_text_keeps_description() {
        let cfg = GrabberConfig {
            locale: Locale::Gbr,
            preserve_matched_text: true,
            ..Default::default()
        };
        let mut ctx = RunContext::default();
        let ev = event_with(&[], "Drama (S3/Ep12)");
        let rec = normalize((3, 2, 0x0101), &ev, &cfg, &mut ctx).unwrap();
        assert_eq!((rec.season_number, rec.episode_number), (3, 12));
        assert_eq!(rec.short_description, "Drama (S3/Ep12)");
    }

    #[test]
    fn description_as_category() {
        let cfg = GrabberConfig { use_description_as_category: true, ..Default::default() };
        let mut ctx = RunContext::default();
        let ev = event_with(&[], "Documentary");
        let rec = normalize((3, 2, 0x0101), &ev, &cfg, &mut ctx).unwrap();
        assert_eq!(rec.category.as_deref(), Some("Documentary"));
    }
}
