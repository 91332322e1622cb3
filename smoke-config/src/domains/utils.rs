//! Utility functions and helpers for configuration

use std::time::Duration;

/// Serde helper for timeouts: whole seconds (`30`) or a humantime string (`"1m 30s"`)
///
/// Always written back as a humantime string so sub-second values survive.
pub mod serde_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Text(String),
    }

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&humantime_serde::re::humantime::format_duration(*duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Seconds(seconds) => Ok(Duration::from_secs(seconds)),
            Raw::Text(text) => super::parse_duration(&text).map_err(serde::de::Error::custom),
        }
    }
}

/// Parse a humantime duration such as `100ms` or `2s`
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    humantime_serde::re::humantime::parse_duration(value.trim())
        .map_err(|e| format!("invalid duration '{}': {}", value, e))
}

/// Default functions for serde
pub fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "serde_duration")]
        timeout: Duration,
    }

    #[test]
    fn test_duration_accepts_seconds_and_text() {
        let holder: Holder = serde_yaml::from_str("timeout: 45").unwrap();
        assert_eq!(holder.timeout, Duration::from_secs(45));

        let holder: Holder = serde_yaml::from_str("timeout: 1m 30s").unwrap();
        assert_eq!(holder.timeout, Duration::from_secs(90));

        assert!(serde_yaml::from_str::<Holder>("timeout: soon").is_err());
    }

    #[test]
    fn test_sub_second_duration_round_trips() {
        let yaml = serde_yaml::to_string(&Holder {
            timeout: Duration::from_millis(1500),
        })
        .unwrap();
        assert_eq!(yaml.trim(), "timeout: 1s 500ms");

        let holder: Holder = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(holder.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("100ms").unwrap(), Duration::from_millis(100));
        assert!(parse_duration("").is_err());
    }
}
