// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire envelope for pipeline events: `{id?, type, timestamp, data}`.

use crate::event::Event;
use chrono::DateTime;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Monotonically issued event identifier, scoped to one backend process.
///
/// Accepts a JSON number or a numeric string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Decode an optional id. Anything that is not a non-negative integer
/// (or a string holding one) becomes `None`.
fn deserialize_opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<EventId>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_u64().map(EventId),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok().map(EventId),
        _ => None,
    }))
}

/// ISO-8601 timestamp carried verbatim, ordered by the instant it names.
///
/// Two parseable timestamps naming the same instant compare equal even when
/// their text differs. Strings that do not parse sort before every parseable
/// instant and among themselves by raw text.
#[derive(Debug, Clone, Default)]
pub struct Timestamp {
    raw: String,
    epoch_ms: Option<i64>,
}

impl Timestamp {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let epoch_ms = DateTime::parse_from_rfc3339(raw.trim())
            .ok()
            .map(|dt| dt.timestamp_millis());
        Self { raw, epoch_ms }
    }

    pub fn from_epoch_ms(ms: i64) -> Self {
        let raw = DateTime::from_timestamp_millis(ms)
            .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
            .unwrap_or_default();
        Self {
            raw,
            epoch_ms: Some(ms),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn epoch_ms(&self) -> Option<i64> {
        self.epoch_ms
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.epoch_ms, other.epoch_ms) {
            (Some(a), Some(b)) => a.cmp(&b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimestampVisitor;

        impl Visitor<'_> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an ISO-8601 timestamp string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
                Ok(Timestamp::parse(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Timestamp, E> {
                Ok(Timestamp::default())
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
                Ok(Timestamp::from_epoch_ms(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
                Ok(Timestamp::from_epoch_ms(i64::try_from(v).unwrap_or(i64::MAX)))
            }
        }

        deserializer.deserialize_any(TimestampVisitor)
    }
}

/// How two envelopes are recognised as the same delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventIdentity {
    Id(EventId),
    Content {
        kind: String,
        timestamp: String,
        data: String,
    },
}

/// One unit received from the event feed.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope {
    pub id: Option<EventId>,
    pub timestamp: Timestamp,
    pub event: Event,
}

impl EventEnvelope {
    pub fn new(id: Option<EventId>, timestamp: impl Into<Timestamp>, event: Event) -> Self {
        Self {
            id,
            timestamp: timestamp.into(),
            event,
        }
    }

    /// Identity used for backfill de-duplication: the id when present,
    /// otherwise the full wire content.
    pub fn identity(&self) -> EventIdentity {
        match self.id {
            Some(id) => EventIdentity::Id(id),
            None => EventIdentity::Content {
                kind: self.event.kind().to_string(),
                timestamp: self.timestamp.as_str().to_string(),
                data: self.event.data().to_string(),
            },
        }
    }

    pub fn log_summary(&self) -> String {
        match self.id {
            Some(id) => format!("#{id} {}", self.event.log_summary()),
            None => self.event.log_summary(),
        }
    }
}

#[derive(Deserialize)]
struct WireEnvelope {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    id: Option<EventId>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    timestamp: Timestamp,
    #[serde(default)]
    data: serde_json::Value,
}

impl<'de> Deserialize<'de> for EventEnvelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireEnvelope::deserialize(deserializer)?;
        let data = match wire.data {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            data => data,
        };
        Ok(Self {
            id: wire.id,
            timestamp: wire.timestamp,
            event: Event::from_wire(&wire.kind, data),
        })
    }
}

impl Serialize for EventEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.id.is_some() { 4 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        map.serialize_entry("type", self.event.kind())?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.serialize_entry("data", &self.event.data())?;
        map.end()
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
