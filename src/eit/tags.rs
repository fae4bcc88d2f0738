// eit/tags.rs
//! Canonical tag dictionary over extended-event items.
//!
//! Broadcasters label the same concept with different (and differently
//! spelled) item descriptions; each concept here carries its synonym set.
//! Tags are upper-cased at ingestion, so lookups are exact matches.
//! Every accessor returns a sentinel (`None` / -1) when absent.

use crate::constants::NONE_I32;
use super::descriptor::ExtendedEventText;
use super::event::EitEvent;

const CAST_TAGS: &[&str] = &["ACTORS", "ACTOR", "INT", "AKTOR"];
const PRODUCER_TAGS: &[&str] = &["PRODUCERS", "PRODUCER"];
const DIRECTOR_TAGS: &[&str] = &["DIRECTORS", "DIRECTOR", "DIR", "REŻYSER", "REZYSER"];
const WRITER_TAGS: &[&str] = &["WRITERS", "WRITER", "GUI"];
const YEAR_TAGS: &[&str] = &["YEAR", "PRODUCTION YEAR", "AÑO", "ROK PRODUKCJI", "DATE"];
const COUNTRY_TAGS: &[&str] = &["COUNTRY", "NAC", "KRAJ PRODUKCJI"];
const STAR_TAGS: &[&str] = &["STAR"];
const SERIES_ID_TAGS: &[&str] = &["SERIESID"];
const SEASON_ID_TAGS: &[&str] = &["SEASONID"];
const EPISODE_ID_TAGS: &[&str] = &["EPISODEID"];
const TV_RATING_TAGS: &[&str] = &["TV RATINGS"];
const PROGRAMME_ID_TAGS: &[&str] = &["PPD"];
const EPISODE_TITLE_TAGS: &[&str] = &["EPISODE", "EPISODETITLE"];

const TEP_TAGS: &[&str] = &["TEP"];
const EPISODE_NO_TAGS: &[&str] = &["EPISODENO"];
const EPISODE_NUM_TAGS: &[&str] = &["EPISODE-NUM"];

/// Season/episode numbers recovered from tagged items; -1 means absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeNumbers {
    pub season: i32,
    pub episode: i32,
    pub count: i32,
}

impl Default for EpisodeNumbers {
    fn default() -> Self {
        Self { season: NONE_I32, episode: NONE_I32, count: NONE_I32 }
    }
}

impl ExtendedEventText {
    fn first_value(&self, synonyms: &[&str]) -> Option<&str> {
        self.items
            .iter()
            .find(|i| synonyms.contains(&i.tag.as_str()))
            .map(|i| i.text.as_str())
    }

    fn single(&self, synonyms: &[&str]) -> Option<String> {
        self.first_value(synonyms).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    /// Comma-split, trimmed, de-duplicated preserving first-seen order.
    fn multi(&self, synonyms: &[&str]) -> Vec<String> {
        let Some(value) = self.first_value(synonyms) else {
            return Vec::new();
        };
        let mut out: Vec<String> = Vec::new();
        for part in value.split(',') {
            let p = part.trim();
            if !p.is_empty() && !out.iter().any(|x| x == p) {
                out.push(p.to_string());
            }
        }
        out
    }

    pub fn cast(&self) -> Vec<String> {
        self.multi(CAST_TAGS)
    }

    pub fn producers(&self) -> Vec<String> {
        self.multi(PRODUCER_TAGS)
    }

    pub fn directors(&self) -> Vec<String> {
        self.multi(DIRECTOR_TAGS)
    }

    pub fn writers(&self) -> Vec<String> {
        self.multi(WRITER_TAGS)
    }

    pub fn year(&self) -> Option<String> {
        self.single(YEAR_TAGS)
    }

    pub fn country(&self) -> Option<String> {
        self.single(COUNTRY_TAGS)
    }

    pub fn star_rating(&self) -> Option<String> {
        self.single(STAR_TAGS)
    }

    pub fn tv_rating(&self) -> Option<String> {
        self.single(TV_RATING_TAGS)
    }

    pub fn series_id(&self) -> Option<String> {
        self.single(SERIES_ID_TAGS)
    }

    pub fn season_id(&self) -> Option<String> {
        self.single(SEASON_ID_TAGS)
    }

    pub fn episode_id(&self) -> Option<String> {
        self.single(EPISODE_ID_TAGS)
    }

    pub fn programme_id(&self) -> Option<String> {
        self.single(PROGRAMME_ID_TAGS)
    }

    pub fn episode_title(&self) -> Option<String> {
        self.single(EPISODE_TITLE_TAGS)
    }

    /// Numeric season/episode recovery over tagged values, tried in fixed
    /// priority: TEP "s:e", EPISODENO "Ep n", EPISODENO "n|...",
    /// EPISODE-NUM "e/total". The first successfully parsed form wins.
    pub fn season_episode(&self) -> EpisodeNumbers {
        if let Some(v) = self.first_value(TEP_TAGS) {
            if let Some((season, episode)) = parse_tep(v) {
                return EpisodeNumbers { season, episode, count: NONE_I32 };
            }
        }
        if let Some(v) = self.first_value(EPISODE_NO_TAGS) {
            if let Some(episode) = parse_episodeno_space(v) {
                return EpisodeNumbers { season: NONE_I32, episode, count: NONE_I32 };
            }
            if let Some(episode) = parse_episodeno_pipe(v) {
                return EpisodeNumbers { season: NONE_I32, episode, count: NONE_I32 };
            }
        }
        if let Some(v) = self.first_value(EPISODE_NUM_TAGS) {
            if let Some((episode, count)) = parse_episode_num(v) {
                return EpisodeNumbers { season: NONE_I32, episode, count };
            }
        }
        EpisodeNumbers::default()
    }
}

impl EitEvent {
    pub fn cast(&self) -> Vec<String> {
        self.extended.as_ref().map(|x| x.cast()).unwrap_or_default()
    }

    pub fn producers(&self) -> Vec<String> {
        self.extended.as_ref().map(|x| x.producers()).unwrap_or_default()
    }

    pub fn directors(&self) -> Vec<String> {
        self.extended.as_ref().map(|x| x.directors()).unwrap_or_default()
    }

    pub fn writers(&self) -> Vec<String> {
        self.extended.as_ref().map(|x| x.writers()).unwrap_or_default()
    }

    pub fn year(&self) -> Option<String> {
        self.extended.as_ref().and_then(|x| x.year())
    }

    pub fn country(&self) -> Option<String> {
        self.extended.as_ref().and_then(|x| x.country())
    }

    pub fn star_rating(&self) -> Option<String> {
        self.extended.as_ref().and_then(|x| x.star_rating())
    }

    pub fn tv_rating(&self) -> Option<String> {
        self.extended.as_ref().and_then(|x| x.tv_rating())
    }

    pub fn series_id(&self) -> Option<String> {
        self.extended.as_ref().and_then(|x| x.series_id())
    }

    pub fn season_id(&self) -> Option<String> {
        self.extended.as_ref().and_then(|x| x.season_id())
    }

    pub fn episode_id(&self) -> Option<String> {
        self.extended.as_ref().and_then(|x| x.episode_id())
    }

    pub fn episode_title(&self) -> Option<String> {
        self.extended.as_ref().and_then(|x| x.episode_title())
    }

    pub fn season_episode(&self) -> EpisodeNumbers {
        self.extended.as_ref().map(|x| x.season_episode()).unwrap_or_default()
    }
}

/// Checked numeric parse; garbage maps to `None`, never an error.
fn parse_num(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}

fn parse_tep(v: &str) -> Option<(i32, i32)> {
    let (s, e) = v.split_once(':')?;
    Some((parse_num(s)?, parse_num(e)?))
}

fn parse_episodeno_space(v: &str) -> Option<i32> {
    parse_num(v.trim().strip_prefix("Ep")?)
}

fn parse_episodeno_pipe(v: &str) -> Option<i32> {
    parse_num(v.split_once('|')?.0)
}

fn parse_episode_num(v: &str) -> Option<(i32, i32)> {
    let (e, c) = v.split_once('/')?;
    Some((parse_num(e)?, parse_num(c)?))
}
