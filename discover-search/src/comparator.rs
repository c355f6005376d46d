//! Title comparators used by searchers to accept or reject matches.
//!
//! A [`Comparator`] is chosen once per dispatch from the configured
//! [`ComparatorKind`] and handed to every searcher. Searchers call
//! [`Comparator::judge`] for each prospective match and use the returned
//! ratio as the result's `search_sort`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use similar::TextDiff;

use crate::error::SearchError;

/// Cutoff used by the loose (`normal`) comparator.
pub const LOOSE_CUTOFF: f64 = 0.7;

/// Cutoff used by the `exact` comparator and for movie titles.
pub const EXACT_CUTOFF: f64 = 0.9;

/// Release-noise tokens dropped by [`clean_title`].
const NOISE_TOKENS: &[&str] = &[
    "480p", "576p", "720p", "1080p", "1080i", "2160p", "4k", "uhd", "hdtv", "pdtv", "dsr",
    "webrip", "webdl", "bluray", "bdrip", "brrip", "dvdrip", "dvdscr", "hdrip", "x264", "h264",
    "x265", "h265", "hevc", "xvid", "divx", "avc", "aac", "ac3", "dts", "mp3", "flac", "proper",
    "repack", "internal", "limited",
];

/// Which comparison strategy a dispatch uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparatorKind {
    /// Accept every prospective match.
    Any,
    /// Loose similarity on cleaned titles.
    #[default]
    Normal,
    /// Strict similarity on raw titles.
    Exact,
    /// Movie title and year matching.
    Movies,
}

impl ComparatorKind {
    /// Returns the configuration name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Normal => "normal",
            Self::Exact => "exact",
            Self::Movies => "movies",
        }
    }

    /// Build the comparator strategy for this kind.
    pub fn comparator(self) -> Comparator {
        match self {
            Self::Any => Comparator::AcceptAll,
            Self::Normal => Comparator::Loose(StringComparator::new(LOOSE_CUTOFF, true)),
            Self::Exact => Comparator::Exact(StringComparator::new(EXACT_CUTOFF, false)),
            Self::Movies => Comparator::Movie(MovieComparator::default()),
        }
    }
}

impl fmt::Display for ComparatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComparatorKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "normal" => Ok(Self::Normal),
            "exact" => Ok(Self::Exact),
            "movies" => Ok(Self::Movies),
            other => Err(SearchError::Config(format!(
                "unknown comparison type `{other}` (expected any, normal, exact or movies)"
            ))),
        }
    }
}

/// Outcome of comparing a wanted title against a found one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Judgment {
    /// Whether the found title is an acceptable match.
    pub accepted: bool,
    /// Similarity in `[0.0, 1.0]`, suitable as a `search_sort` value.
    pub ratio: f64,
}

/// Config-selected comparison strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparator {
    /// Loose similarity on cleaned titles.
    Loose(StringComparator),
    /// Strict similarity on raw titles.
    Exact(StringComparator),
    /// Accepts everything with a ratio of 1.0.
    AcceptAll,
    /// Movie-aware title and year matching.
    Movie(MovieComparator),
}

impl Comparator {
    /// Judge whether `found` is a match for `wanted`.
    pub fn judge(&self, wanted: &str, found: &str) -> Judgment {
        match self {
            Self::Loose(inner) | Self::Exact(inner) => inner.judge(wanted, found),
            Self::AcceptAll => Judgment {
                accepted: true,
                ratio: 1.0,
            },
            Self::Movie(inner) => inner.judge(wanted, found),
        }
    }
}

/// Sequence-similarity comparator with a fixed acceptance cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct StringComparator {
    cutoff: f64,
    clean: bool,
}

impl StringComparator {
    /// Create a comparator accepting ratios `>= cutoff`. When `clean` is
    /// set, both titles pass through [`clean_title`] first.
    pub fn new(cutoff: f64, clean: bool) -> Self {
        Self { cutoff, clean }
    }

    /// The acceptance cutoff.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    fn judge(&self, wanted: &str, found: &str) -> Judgment {
        let ratio = if self.clean {
            similarity(&clean_title(wanted), &clean_title(found))
        } else {
            similarity(wanted, found)
        };
        Judgment {
            accepted: ratio >= self.cutoff,
            ratio,
        }
    }
}

/// Compares movie titles: names must be near-identical once cleaned and
/// release years must agree when both sides carry one.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieComparator {
    cutoff: f64,
}

impl Default for MovieComparator {
    fn default() -> Self {
        Self {
            cutoff: EXACT_CUTOFF,
        }
    }
}

impl MovieComparator {
    fn judge(&self, wanted: &str, found: &str) -> Judgment {
        let (wanted_name, wanted_year) = split_year(wanted);
        let (found_name, found_year) = split_year(found);

        if let (Some(a), Some(b)) = (wanted_year, found_year) {
            if a != b {
                return Judgment {
                    accepted: false,
                    ratio: 0.0,
                };
            }
        }

        let ratio = similarity(&wanted_name, &found_name);
        Judgment {
            accepted: ratio >= self.cutoff,
            ratio,
        }
    }
}

/// Character-level similarity ratio in `[0.0, 1.0]`.
fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    f64::from(TextDiff::from_chars(a, b).ratio())
}

/// Normalise a title for loose comparison.
///
/// Lowercases, removes `[...]` and `(...)` groups, turns punctuation into
/// spaces, drops resolution/codec/source tags and collapses whitespace.
pub fn clean_title(title: &str) -> String {
    let mut stripped = String::with_capacity(title.len());
    let mut depth = 0usize;
    for ch in title.chars() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            c if c.is_alphanumeric() => stripped.extend(c.to_lowercase()),
            _ => stripped.push(' '),
        }
    }

    stripped
        .split_whitespace()
        .filter(|token| !NOISE_TOKENS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a movie title into its cleaned name and release year, if any.
///
/// The year is the last 1900-2099 token that is not the first word, so
/// titles like `"2012 (2009)"` keep `2012` as the name.
fn split_year(title: &str) -> (String, Option<u16>) {
    let tokens: Vec<&str> = title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    let year_at = tokens
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .find_map(|(idx, token)| parse_year(token).map(|year| (idx, year)));

    match year_at {
        Some((idx, year)) => (clean_title(&tokens[..idx].join(" ")), Some(year)),
        None => (clean_title(title), None),
    }
}

fn parse_year(token: &str) -> Option<u16> {
    if token.len() != 4 {
        return None;
    }
    token
        .parse::<u16>()
        .ok()
        .filter(|year| (1900..=2099).contains(year))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn kind_defaults_to_normal() {
        assert_eq!(ComparatorKind::default(), ComparatorKind::Normal);
    }

    #[test]
    fn kind_maps_to_strategy() {
        assert_eq!(ComparatorKind::Any.comparator(), Comparator::AcceptAll);
        match ComparatorKind::Normal.comparator() {
            Comparator::Loose(c) => assert!((c.cutoff() - 0.7).abs() < f64::EPSILON),
            other => panic!("unexpected comparator {other:?}"),
        }
        match ComparatorKind::Exact.comparator() {
            Comparator::Exact(c) => assert!((c.cutoff() - 0.9).abs() < f64::EPSILON),
            other => panic!("unexpected comparator {other:?}"),
        }
        assert!(matches!(
            ComparatorKind::Movies.comparator(),
            Comparator::Movie(_)
        ));
    }

    #[test]
    fn kind_parses_known_names() {
        for kind in [
            ComparatorKind::Any,
            ComparatorKind::Normal,
            ComparatorKind::Exact,
            ComparatorKind::Movies,
        ] {
            assert_eq!(kind.name().parse::<ComparatorKind>().unwrap(), kind);
        }
    }

    #[test]
    fn kind_rejects_unknown_name() {
        let err = "fuzzy".parse::<ComparatorKind>().unwrap_err();
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("fuzzy"));
    }

    #[test]
    fn kind_serde_uses_lowercase_names() {
        let kind: ComparatorKind = serde_json::from_str("\"movies\"").unwrap();
        assert_eq!(kind, ComparatorKind::Movies);
        assert!(serde_json::from_str::<ComparatorKind>("\"Movies\"").is_err());
    }

    #[test]
    fn clean_title_strips_noise() {
        assert_eq!(
            clean_title("Show.Name.S01E01.720p.HDTV.x264-[GRP]"),
            "show name s01e01"
        );
        assert_eq!(clean_title("The Movie (2010) [1080p]"), "the movie");
        assert_eq!(clean_title("  spaced   out  "), "spaced out");
    }

    #[test]
    fn loose_accepts_release_name_of_same_episode() {
        let cmp = ComparatorKind::Normal.comparator();
        let j = cmp.judge("Show Name S01E01", "Show.Name.S01E01.720p.HDTV.x264");
        assert!(j.accepted, "ratio was {}", j.ratio);
        assert!((j.ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn loose_rejects_unrelated_title() {
        let cmp = ComparatorKind::Normal.comparator();
        let j = cmp.judge("Show Name S01E01", "Completely Different Thing");
        assert!(!j.accepted);
        assert!(j.ratio < LOOSE_CUTOFF);
    }

    #[test]
    fn exact_does_not_clean() {
        let cmp = ComparatorKind::Exact.comparator();
        assert!(cmp.judge("Show S01E01", "Show S01E01").accepted);
        assert!(!cmp
            .judge("Show S01E01", "show.s01e01.720p.hdtv.x264-group")
            .accepted);
    }

    #[test]
    fn accept_all_accepts_anything() {
        let j = Comparator::AcceptAll.judge("a", "zzz");
        assert!(j.accepted);
        assert!((j.ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn movie_requires_matching_year() {
        let cmp = ComparatorKind::Movies.comparator();
        assert!(cmp.judge("Inception 2010", "Inception.2010.1080p.BluRay.x264").accepted);
        assert!(!cmp.judge("Inception 2010", "Inception.2011.1080p").accepted);
    }

    #[test]
    fn movie_without_year_on_one_side_compares_names() {
        let cmp = ComparatorKind::Movies.comparator();
        assert!(cmp.judge("Inception", "Inception (2010)").accepted);
        assert!(!cmp.judge("Inception", "Interstellar (2014)").accepted);
    }

    #[test]
    fn split_year_keeps_leading_number_as_name() {
        assert_eq!(split_year("2012 (2009)"), ("2012".to_owned(), Some(2009)));
        assert_eq!(split_year("1917"), ("1917".to_owned(), None));
    }
}
