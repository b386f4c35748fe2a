use chrono::{DateTime, SubsecRound, Utc};
use serde::*;

/// Julian Date of the Unix epoch (1970-01-01 00:00:00 UTC).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Date of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;

/// Approximate TT - UT1 offset in seconds, good to a second for the 2020s.
pub const TT_MINUS_UT_SECONDS: f64 = 69.2;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Date representation on the UT scale.
/// JD 0 = -4712-01-01 12:00:00 (proleptic Julian calendar)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDate(qtty::Days);

impl JulianDate {
    /// Create a new Julian Date.
    pub fn new(v: f64) -> Self {
        Self(qtty::Days::new(v))
    }

    /// Raw JD value as f64.
    pub fn value(&self) -> f64 {
        self.0.value()
    }

    /// Create from Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn from_unix_timestamp(timestamp: f64) -> Self {
        Self::new(timestamp / SECONDS_PER_DAY + UNIX_EPOCH_JD)
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::from_unix_timestamp(dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9)
    }

    /// Shift by a number of seconds.
    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self::new(self.value() + seconds / SECONDS_PER_DAY)
    }

    /// Days elapsed since J2000.0.
    pub fn days_since_j2000(&self) -> f64 {
        self.value() - J2000
    }

    /// Julian centuries since J2000.0 on the dynamical (TT) scale, as used
    /// by the orbital series.
    pub fn dynamical_centuries(&self) -> f64 {
        (self.add_seconds(TT_MINUS_UT_SECONDS).value() - J2000) / 36_525.0
    }
}

/// Drop the sub-second part of an instant.
pub fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.trunc_subsecs(0)
}

/// ISO-8601 formatting with second precision and a trailing `Z`.
pub fn format_iso_seconds(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Serde adapters for instants rendered as `YYYY-MM-DDTHH:MM:SSZ`.
pub mod iso_seconds {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_iso_seconds(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "super")] DateTime<Utc>);

            let v = Option::<Wrapper>::deserialize(deserializer)?;
            Ok(v.map(|Wrapper(dt)| dt))
        }
    }
}
