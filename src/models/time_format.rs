//! Serde helpers for optional time-of-day fields
//!
//! Times arrive as "HH:MM" (what the forms produce) or "HH:MM:SS" and are
//! written back as "HH:MM".

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

pub(crate) fn parse(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

pub(crate) fn serialize<S: Serializer>(
    time: &Option<NaiveTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match time {
        Some(t) => serializer.serialize_str(&t.format("%H:%M").to_string()),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveTime>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {}", s))),
    }
}
