use serde::Deserialize;

use crate::{v1::ProfileV1, Profile, ProfileError};

/// Parse yaml profile.
pub fn parse_profile(input: &str) -> Result<Profile, ProfileError> {
    let version = parse_version(input)?;
    match version {
        1 => {
            let profile: ProfileV1 = serde_yaml::from_str(input)?;
            let profile = profile.to_profile()?;
            Ok(profile)
        }
        _ => Err(ProfileError::UnsupportedVersion(version)),
    }
}

/// A profile with a version.
#[derive(Debug, Clone, Deserialize)]
struct VersionedProfile {
    version: u8,
}

/// Parse the version of yaml profile.
fn parse_version(input: &str) -> Result<u8, ProfileError> {
    let raw: VersionedProfile = serde_yaml::from_str(input)?;
    Ok(raw.version)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use x52_hotas::{CalibrationPreset, Channel, LedZone};

    use super::*;

    #[test]
    fn parse_profile_yaml_error_when_version_missing() {
        let yaml = "device: 0\n";
        assert!(matches!(
            parse_profile(yaml),
            Err(ProfileError::YamlDeserializeError(_))
        ));
    }

    #[test]
    fn parse_profile_rejects_unknown_version() {
        assert!(matches!(
            parse_profile("version: 2\n"),
            Err(ProfileError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn parse_profile_rejects_unknown_fields() {
        let yaml = "version: 1\ncontrollers: []\n";
        assert!(matches!(
            parse_profile(yaml),
            Err(ProfileError::YamlDeserializeError(_))
        ));
    }

    #[test]
    fn parse_profile_surfaces_validation_errors() {
        let yaml = "version: 1\ncalibration:\n  preset: xinput\n";
        assert!(matches!(
            parse_profile(yaml),
            Err(ProfileError::V1ProfileError(_))
        ));
    }

    #[test]
    fn parse_full_profile() {
        let yaml = r#"
version: 1
device: 1
poll_interval_ms: 20
calibration:
  preset: direct_input
  deadzone: 2000
  channels:
    rx: { deadzone: 500 }
labels:
  5: pinkie
leds:
  - { button: 0, zone: fire, color: red }
mfd:
  - { line: 0, text: X52 PRO }
"#;
        let profile = parse_profile(yaml).expect("profile");
        assert_eq!(profile.device, 1);
        assert_eq!(profile.poll_interval, Duration::from_millis(20));
        assert_eq!(profile.preset, CalibrationPreset::DirectInput);
        assert_eq!(profile.calibration.channel(Channel::X).deadzone, 2000.0);
        assert_eq!(profile.calibration.channel(Channel::Rx).deadzone, 500.0);
        assert_eq!(profile.labels.label(5), "pinkie");
        assert_eq!(profile.leds[0].zone, LedZone::Fire);
        assert_eq!(profile.mfd[0].text, "X52 PRO");
    }
}
