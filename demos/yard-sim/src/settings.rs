//! Run settings: defaults, then an optional JSON file, then CLI overrides.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use yard_core::YardConfig;

/// JSON configuration file.  Durations are milliseconds; every key is optional.
///
/// ```json
/// { "firstSwitchTimeout": 200, "backoffDelay": 500, "maxTrains": 12 }
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub first_switch_timeout:  Option<u64>,
    pub second_switch_timeout: Option<u64>,
    pub third_switch_timeout:  Option<u64>,
    pub backoff_delay:         Option<u64>,
    pub transit_delay:         Option<u64>,
    pub max_trains:            Option<usize>,
    pub worker_slots:          Option<usize>,
    pub switch_count:          Option<u32>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Later values win: `other`'s set fields replace `self`'s.
    pub fn merge(self, other: ConfigFile) -> Self {
        Self {
            first_switch_timeout:  other.first_switch_timeout.or(self.first_switch_timeout),
            second_switch_timeout: other.second_switch_timeout.or(self.second_switch_timeout),
            third_switch_timeout:  other.third_switch_timeout.or(self.third_switch_timeout),
            backoff_delay:         other.backoff_delay.or(self.backoff_delay),
            transit_delay:         other.transit_delay.or(self.transit_delay),
            max_trains:            other.max_trains.or(self.max_trains),
            worker_slots:          other.worker_slots.or(self.worker_slots),
            switch_count:          other.switch_count.or(self.switch_count),
        }
    }

    /// Apply the set fields on top of `YardConfig::default()` and validate.
    pub fn to_config(&self) -> Result<YardConfig> {
        let mut config = YardConfig::default();
        let p = &mut config.pacing;
        let ms = Duration::from_millis;

        if let Some(v) = self.first_switch_timeout  { p.first_switch_timeout  = ms(v); }
        if let Some(v) = self.second_switch_timeout { p.second_switch_timeout = ms(v); }
        if let Some(v) = self.third_switch_timeout  { p.third_switch_timeout  = ms(v); }
        if let Some(v) = self.backoff_delay         { p.backoff_delay         = ms(v); }
        if let Some(v) = self.transit_delay         { p.transit_delay         = ms(v); }
        if let Some(v) = self.max_trains   { config.max_trains   = v; }
        if let Some(v) = self.worker_slots { config.worker_slots = v; }
        if let Some(v) = self.switch_count { config.switch_count = v; }

        config.validate()?;
        Ok(config)
    }
}
