use x52_hotas::{fit_mfd_text, LedColor, LedZone, MfdLine, OutputSurface, MFD_LINES};

use crate::{print_debug, print_info};

const LED_COUNT: usize = 20;

/// Output surface that reports LED and MFD changes through the log.
///
/// Keeps the last diode and line state so only changes are reported.
#[derive(Debug, Default)]
pub(crate) struct LogSurface {
    diodes: [bool; LED_COUNT],
    lines: [String; MFD_LINES as usize],
}

impl LogSurface {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn diode(&self, led: u32) -> bool {
        self.diodes.get(led as usize).copied().unwrap_or(false)
    }

    #[cfg(test)]
    pub fn line(&self, line: MfdLine) -> &str {
        &self.lines[usize::from(line.get())]
    }
}

impl OutputSurface for LogSurface {
    fn set_led(&mut self, zone: LedZone, color: LedColor) {
        let mut changed = false;
        for command in zone.commands(color) {
            let Some(diode) = self.diodes.get_mut(command.led as usize) else {
                continue;
            };
            if *diode != command.on {
                *diode = command.on;
                changed = true;
                print_debug!("led {} {}", command.led, if command.on { "on" } else { "off" });
            }
        }
        if changed {
            print_info!("led {zone}: {color:?}");
        }
    }

    fn set_text(&mut self, line: MfdLine, text: &str) {
        let text = fit_mfd_text(text);
        let slot = &mut self.lines[usize::from(line.get())];
        if slot.as_str() != text {
            text.clone_into(slot);
            print_info!("mfd line {}: \"{text}\"", line.get());
        }
    }
}
