//! Mirror settings: where to read, where to write, how often, where to log
//!
//! Settings arrive from up to three places (command line, config file,
//! interactive prompt). Each source fills a [`PartialSettings`]; they are
//! layered with [`PartialSettings::or`] and then resolved.

use std::path::{Path, PathBuf};
use std::time::Duration;

use mirror_fs::ConfigStore;
use serde::Deserialize;

use crate::{Error, Result};

/// Fully resolved settings for a mirror session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSettings {
    pub source: PathBuf,
    pub replica: PathBuf,
    pub interval: Option<Duration>,
    pub log_file: Option<PathBuf>,
}

impl MirrorSettings {
    /// The pass interval, required for repeated runs.
    pub fn require_interval(&self) -> Result<Duration> {
        self.interval.ok_or_else(|| Error::MissingSetting {
            name: "interval".into(),
        })
    }
}

/// Interval as written in a config file: `"HH:MM:SS"`, `"90"` or `90`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IntervalValue {
    Seconds(u64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    source: Option<PathBuf>,
    replica: Option<PathBuf>,
    interval: Option<IntervalValue>,
    log_file: Option<PathBuf>,
}

/// Settings from one source, any of which may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialSettings {
    pub source: Option<PathBuf>,
    pub replica: Option<PathBuf>,
    pub interval: Option<Duration>,
    pub log_file: Option<PathBuf>,
}

impl PartialSettings {
    /// Load from a TOML, JSON or YAML file.
    ///
    /// Relative paths in the file are taken relative to the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let file: SettingsFile = ConfigStore::new().load(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let anchor = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };

        let interval = match file.interval {
            Some(IntervalValue::Seconds(secs)) => Some(seconds_to_interval(secs, &secs.to_string())?),
            Some(IntervalValue::Text(text)) => Some(parse_interval(&text)?),
            None => None,
        };

        Ok(Self {
            source: file.source.map(anchor),
            replica: file.replica.map(anchor),
            interval,
            log_file: file.log_file.map(anchor),
        })
    }

    /// Fill every missing field of `self` from `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            source: self.source.or(fallback.source),
            replica: self.replica.or(fallback.replica),
            interval: self.interval.or(fallback.interval),
            log_file: self.log_file.or(fallback.log_file),
        }
    }

    /// Require source and replica; interval and log file stay optional.
    pub fn resolve(self) -> Result<MirrorSettings> {
        let source = self.source.ok_or_else(|| Error::MissingSetting {
            name: "source".into(),
        })?;
        let replica = self.replica.ok_or_else(|| Error::MissingSetting {
            name: "replica".into(),
        })?;
        Ok(MirrorSettings {
            source,
            replica,
            interval: self.interval,
            log_file: self.log_file,
        })
    }
}

/// Parse a pass interval.
///
/// Accepts `HH:MM:SS` (hours 0-23, minutes and seconds 0-59) or a plain
/// number of seconds. Zero is rejected.
pub fn parse_interval(value: &str) -> Result<Duration> {
    let trimmed = value.trim();
    let invalid = |reason: &str| Error::InvalidInterval {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if !trimmed.contains(':') {
        let secs: u64 = trimmed
            .parse()
            .map_err(|_| invalid("expected HH:MM:SS or a number of seconds"))?;
        return seconds_to_interval(secs, value);
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(invalid("expected HH:MM:SS"));
    };
    let field = |text: &str, max: u64, unit: &str| -> Result<u64> {
        let n: u64 = text
            .parse()
            .map_err(|_| invalid(&format!("{unit} is not a number")))?;
        if n > max {
            return Err(invalid(&format!("{unit} must be at most {max}")));
        }
        Ok(n)
    };

    let total = field(*hours, 23, "hours")? * 3600
        + field(*minutes, 59, "minutes")? * 60
        + field(*seconds, 59, "seconds")?;
    seconds_to_interval(total, value)
}

fn seconds_to_interval(secs: u64, original: &str) -> Result<Duration> {
    if secs == 0 {
        return Err(Error::InvalidInterval {
            value: original.to_string(),
            reason: "interval must be greater than zero".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("00:00:30", 30)]
    #[case("01:02:03", 3723)]
    #[case("23:59:59", 86399)]
    #[case("45", 45)]
    #[case(" 7 ", 7)]
    fn parses_valid_intervals(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(parse_interval(input).unwrap(), Duration::from_secs(expected));
    }

    #[rstest]
    #[case("")]
    #[case("00:00:00")]
    #[case("0")]
    #[case("24:00:00")]
    #[case("00:60:00")]
    #[case("1:2")]
    #[case("a:b:c")]
    #[case("-5")]
    fn rejects_invalid_intervals(#[case] input: &str) {
        assert!(matches!(
            parse_interval(input),
            Err(Error::InvalidInterval { .. })
        ));
    }

    #[test]
    fn earlier_layers_win() {
        let cli = PartialSettings {
            source: Some("cli-src".into()),
            ..PartialSettings::default()
        };
        let file = PartialSettings {
            source: Some("file-src".into()),
            replica: Some("file-rep".into()),
            ..PartialSettings::default()
        };

        let merged = cli.or(file).resolve().unwrap();
        assert_eq!(merged.source, PathBuf::from("cli-src"));
        assert_eq!(merged.replica, PathBuf::from("file-rep"));
        assert!(merged.require_interval().is_err());
    }

    #[test]
    fn resolve_requires_replica() {
        let partial = PartialSettings {
            source: Some("s".into()),
            ..PartialSettings::default()
        };
        assert!(matches!(
            partial.resolve(),
            Err(Error::MissingSetting { name }) if name == "replica"
        ));
    }

    #[test]
    fn load_anchors_relative_paths_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mirror.toml");
        std::fs::write(
            &path,
            "source = \"src\"\nreplica = \"/abs/replica\"\ninterval = \"00:01:00\"\n",
        )
        .unwrap();

        let partial = PartialSettings::load(&path).unwrap();
        assert_eq!(partial.source, Some(dir.path().join("src")));
        assert_eq!(partial.replica, Some(PathBuf::from("/abs/replica")));
        assert_eq!(partial.interval, Some(Duration::from_secs(60)));
        assert_eq!(partial.log_file, None);
    }

    #[test]
    fn load_accepts_numeric_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mirror.json");
        std::fs::write(&path, r#"{"interval": 15}"#).unwrap();

        let partial = PartialSettings::load(&path).unwrap();
        assert_eq!(partial.interval, Some(Duration::from_secs(15)));
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mirror.yaml");
        std::fs::write(&path, "sauce: typo\n").unwrap();

        assert!(matches!(
            PartialSettings::load(&path),
            Err(Error::Fs(mirror_fs::Error::ConfigParse { .. }))
        ));
    }
}
