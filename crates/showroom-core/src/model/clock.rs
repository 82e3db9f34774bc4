// Time-of-day wire format: written as `HH:MM`, read as `HH:MM` or
// `HH:MM:SS` (the datastore echoes seconds back).

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer, de};

const WRITE_FORMAT: &str = "%H:%M";
const READ_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

pub(crate) fn parse(raw: &str) -> Option<NaiveTime> {
    READ_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw.trim(), fmt).ok())
}

pub(crate) mod hh_mm {
    use super::{Deserialize, Deserializer, NaiveTime, Serializer, WRITE_FORMAT, de, parse};

    pub(crate) fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&time.format(WRITE_FORMAT))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid time of day: {raw:?}")))
    }
}

pub(crate) mod hh_mm_opt {
    use super::{Deserialize, Deserializer, NaiveTime, Serializer, WRITE_FORMAT, de, parse};

    #[allow(clippy::ref_option)]
    pub(crate) fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.collect_str(&t.format(WRITE_FORMAT)),
            None => s.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid time of day: {raw:?}"))),
        }
    }
}
