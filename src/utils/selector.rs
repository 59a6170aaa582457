//! Member selector parsing utilities.
//!
//! Explicit selectors in the YAML configuration may mix plain indices with
//! inclusive spans written as strings, so a variant split such as
//! `[1..=10, 57..=66]` can be written `["1-10", "57-66"]` instead of twenty
//! literal numbers.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::config::{MemberSelector, MAX_GROUP_MEMBERS};

fn span_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d+)\s*(?:-\s*(\d+)\s*)?$").expect("span pattern is a valid regex")
    })
}

/// Parse a span string ("11-20" or "42") into the ids it covers
///
/// Spans are inclusive on both ends, must not run backwards, and may cover
/// at most `MAX_GROUP_MEMBERS` ids.
///
/// # Examples
/// ```
/// use shelfgen::utils::selector::parse_span;
///
/// assert_eq!(parse_span("11-14"), Ok(vec![11, 12, 13, 14]));
/// assert_eq!(parse_span("42"), Ok(vec![42]));
/// assert!(parse_span("20-11").is_err());
/// assert!(parse_span("a-b").is_err());
/// ```
pub fn parse_span(span: &str) -> Result<Vec<u32>, String> {
    let captures = span_pattern()
        .captures(span)
        .ok_or_else(|| format!("Invalid member span: '{}'", span))?;

    let start: u32 = captures[1]
        .parse()
        .map_err(|_| format!("Member index out of range in span '{}'", span))?;
    let end: u32 = match captures.get(2) {
        Some(end) => end
            .as_str()
            .parse()
            .map_err(|_| format!("Member index out of range in span '{}'", span))?,
        None => start,
    };

    if end < start {
        return Err(format!(
            "Member span '{}' runs backwards ({} > {})",
            span, start, end
        ));
    }

    let len = (end - start) as usize + 1;
    if len > MAX_GROUP_MEMBERS {
        return Err(format!(
            "Member span '{}' covers {} ids (limit is {})",
            span, len, MAX_GROUP_MEMBERS
        ));
    }

    Ok((start..=end).collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelector {
    Count(u32),
    Entries(Vec<RawEntry>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Index(u32),
    Span(String),
}

/// Expand a raw list of indices and spans into one ordered id list
fn expand_entries(entries: Vec<RawEntry>) -> Result<Vec<u32>, String> {
    let mut ids = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            RawEntry::Index(id) => ids.push(id),
            RawEntry::Span(span) => ids.extend(parse_span(&span)?),
        }
        if ids.len() > MAX_GROUP_MEMBERS {
            return Err(format!(
                "Member list expands to more than {} ids",
                MAX_GROUP_MEMBERS
            ));
        }
    }
    Ok(ids)
}

/// Deserialize a member selector from a count, or a list of indices and spans
pub fn deserialize_selector<'de, D>(deserializer: D) -> Result<MemberSelector, D::Error>
where
    D: Deserializer<'de>,
{
    match RawSelector::deserialize(deserializer)? {
        RawSelector::Count(count) => Ok(MemberSelector::Count(count)),
        RawSelector::Entries(entries) => expand_entries(entries)
            .map(MemberSelector::Explicit)
            .map_err(serde::de::Error::custom),
    }
}
