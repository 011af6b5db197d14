use std::time::Duration;

use x52_hotas::{
    fit_mfd_text, Calibration, CalibrationPreset, Channel, HatEncoding, LedColor, LedZone,
    MfdLine,
};

use crate::profile::{LedBinding, MfdText, Profile, DEFAULT_POLL_INTERVAL};
use crate::ButtonLabels;

use super::profile::{ProfileV1Calibration, ProfileV1Channel, ProfileV1Led, ProfileV1Mfd};
use super::{Error, ProfileV1};

impl ProfileV1 {
    pub fn to_profile(&self) -> Result<Profile, Error> {
        // Checked by the version dispatch in `parse_profile`.
        debug_assert_eq!(self.version, 1);

        let poll_interval = match self.poll_interval_ms {
            Some(0) => return Err(Error::InvalidPollInterval),
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_POLL_INTERVAL,
        };

        let (preset, calibration) = parse_calibration(&self.calibration)?;

        let mut labels = ButtonLabels::x52_pro();
        let mut custom = ButtonLabels::new();
        for (index, label) in &self.labels {
            custom.insert(*index, label.as_str());
        }
        labels.merge(custom);

        let leds = self
            .leds
            .iter()
            .map(parse_led_binding)
            .collect::<Result<Vec<_>, _>>()?;
        let mfd = self
            .mfd
            .iter()
            .map(parse_mfd_text)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Profile {
            device: self.device.unwrap_or(0),
            poll_interval,
            preset,
            calibration,
            labels,
            leds,
            mfd,
        })
    }
}

fn parse_calibration(
    raw: &ProfileV1Calibration,
) -> Result<(CalibrationPreset, Calibration), Error> {
    let preset = match raw.preset.as_deref() {
        Some(name) => parse_preset(name)?,
        None => CalibrationPreset::default(),
    };
    let mut calibration = preset.calibration();

    if let Some(deadzone) = raw.deadzone {
        check_deadzone("calibration", deadzone)?;
        calibration = calibration.with_deadzone(deadzone);
    }

    if let Some(hat) = raw.hat.as_deref() {
        calibration.set_hat_encoding(parse_hat_encoding(hat)?);
    }

    for (name, overrides) in &raw.channels {
        let channel = Channel::from_name(&name.to_lowercase())
            .ok_or_else(|| Error::InvalidChannel(name.clone()))?;
        apply_channel_overrides(&mut calibration, channel, overrides)?;
    }

    Ok((preset, calibration))
}

fn apply_channel_overrides(
    calibration: &mut Calibration,
    channel: Channel,
    raw: &ProfileV1Channel,
) -> Result<(), Error> {
    let target = calibration.channel_mut(channel);
    if let Some(source) = raw.source {
        target.source = Some(source);
    }
    if let Some(center) = raw.center {
        target.center = center;
    }
    if let Some(full_scale) = raw.full_scale {
        if full_scale.is_nan() || full_scale <= 0.0 {
            return Err(Error::InvalidFullScale(channel.to_string(), full_scale));
        }
        target.full_scale = full_scale;
    }
    if let Some(deadzone) = raw.deadzone {
        check_deadzone(channel.name(), deadzone)?;
        target.deadzone = deadzone;
    }
    if let Some(invert) = raw.invert {
        target.inverted = invert;
    }
    Ok(())
}

fn check_deadzone(target: &str, deadzone: f64) -> Result<(), Error> {
    if deadzone.is_nan() || deadzone < 0.0 {
        return Err(Error::InvalidDeadzone(target.to_string(), deadzone));
    }
    Ok(())
}

fn parse_preset(name: &str) -> Result<CalibrationPreset, Error> {
    Ok(match name.to_lowercase().as_str() {
        "sdl" | "sdl2" | "linux" => CalibrationPreset::Sdl,
        "direct_input" | "directinput" | "windows" => CalibrationPreset::DirectInput,
        _ => return Err(Error::InvalidPreset(name.to_string())),
    })
}

fn parse_hat_encoding(name: &str) -> Result<HatEncoding, Error> {
    Ok(match name.to_lowercase().as_str() {
        "bitmask" => HatEncoding::Bitmask,
        "centidegrees" => HatEncoding::Centidegrees,
        _ => return Err(Error::InvalidHatEncoding(name.to_string())),
    })
}

fn parse_led_binding(raw: &ProfileV1Led) -> Result<LedBinding, Error> {
    let zone = LedZone::from_name(&raw.zone.to_lowercase())
        .ok_or_else(|| Error::InvalidZone(raw.zone.clone()))?;
    let color = match raw.color.as_deref() {
        Some(name) => LedColor::from_name(&name.to_lowercase())
            .ok_or_else(|| Error::InvalidColor(name.to_string()))?,
        None => LedColor::Green,
    };
    Ok(LedBinding {
        button: raw.button,
        zone,
        color,
    })
}

fn parse_mfd_text(raw: &ProfileV1Mfd) -> Result<MfdText, Error> {
    let line = MfdLine::new(raw.line).ok_or(Error::InvalidMfdLine(raw.line))?;
    if fit_mfd_text(&raw.text).len() != raw.text.len() {
        return Err(Error::MfdTextTooLong(raw.text.clone()));
    }
    Ok(MfdText {
        line,
        text: raw.text.clone(),
    })
}
