//! Server-assigned timestamps.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp the document store assigns at write time.
///
/// Writers pass `Pending` as a sentinel and the store resolves it against its
/// own clock. A document read back may still carry `Pending` when the field
/// was never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "at", rename_all = "lowercase")]
pub enum ServerTimestamp {
    #[default]
    Pending,
    Resolved(DateTime<Utc>),
}

impl ServerTimestamp {
    /// Resolve a pending timestamp to `now`, keeping resolved ones.
    pub fn resolve(self, now: DateTime<Utc>) -> Self {
        match self {
            ServerTimestamp::Pending => ServerTimestamp::Resolved(now),
            resolved => resolved,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            ServerTimestamp::Pending => None,
            ServerTimestamp::Resolved(at) => Some(*at),
        }
    }

    /// Plain date string handed to the view layer.
    ///
    /// RFC 3339 with millisecond precision and a `Z` suffix, `None` while pending.
    pub fn to_date_string(&self) -> Option<String> {
        self.as_datetime()
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<Option<DateTime<Utc>>> for ServerTimestamp {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(ServerTimestamp::Pending, ServerTimestamp::Resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pending_normalizes_to_none() {
        assert_eq!(ServerTimestamp::Pending.to_date_string(), None);
    }

    #[test]
    fn test_resolved_normalizes_to_iso_string() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(
            ServerTimestamp::Resolved(at).to_date_string().as_deref(),
            Some("2024-03-09T14:05:00.000Z")
        );
    }

    #[test]
    fn test_resolve_keeps_existing_value() {
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            ServerTimestamp::Resolved(first).resolve(later),
            ServerTimestamp::Resolved(first)
        );
        assert_eq!(
            ServerTimestamp::Pending.resolve(later),
            ServerTimestamp::Resolved(later)
        );
    }
}
