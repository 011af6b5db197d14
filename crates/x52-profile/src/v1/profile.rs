use ahash::AHashMap;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileV1 {
    pub version: u8,
    #[serde(default)]
    pub device: Option<u32>,
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,
    #[serde(default)]
    pub calibration: ProfileV1Calibration,
    #[serde(default)]
    pub labels: AHashMap<usize, String>, // button index -> label
    #[serde(default)]
    pub leds: Vec<ProfileV1Led>,
    #[serde(default)]
    pub mfd: Vec<ProfileV1Mfd>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileV1Calibration {
    #[serde(default)]
    pub preset: Option<String>, // sdl | direct_input
    #[serde(default)]
    pub deadzone: Option<f64>,
    #[serde(default)]
    pub hat: Option<String>, // bitmask | centidegrees
    #[serde(default)]
    pub channels: AHashMap<String, ProfileV1Channel>, // channel name -> overrides
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileV1Channel {
    #[serde(default)]
    pub source: Option<usize>,
    #[serde(default)]
    pub center: Option<f64>,
    #[serde(default)]
    pub full_scale: Option<f64>,
    #[serde(default)]
    pub deadzone: Option<f64>,
    #[serde(default)]
    pub invert: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileV1Led {
    pub button: usize,
    pub zone: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileV1Mfd {
    pub line: u8,
    pub text: String,
}
