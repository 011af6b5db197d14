use std::fmt::Write as _;

use x52_hotas::{Channel, OutputFrame, OutputSurface, PovAngle, POV_CENTERED};
use x52_profile::ButtonLabels;

use crate::{app::Action, print_debug, print_info};

pub(crate) struct ActionRunner<S: OutputSurface> {
    surface: S,
    labels: ButtonLabels,
}

impl<S: OutputSurface> ActionRunner<S> {
    pub fn new(surface: S, labels: ButtonLabels) -> Self {
        Self { surface, labels }
    }

    pub fn run_all(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.run(action);
        }
    }

    pub fn run(&mut self, action: Action) {
        match action {
            Action::Button { index, pressed } => {
                let state = if pressed { "pressed" } else { "released" };
                print_debug!("{} {state}", self.labels.label(index));
            }
            Action::Led { zone, color } => self.surface.set_led(zone, color),
            Action::Text { line, text } => self.surface.set_text(line, &text),
            Action::Frame(frame) => {
                print_info!("{}", self.describe(&frame));
            }
        }
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// One line summary: axes, slider, POV and held buttons.
    fn describe(&self, frame: &OutputFrame) -> String {
        let mut line = String::new();
        for (channel, value) in Channel::AXES.iter().zip(frame.axes) {
            let _ = write!(line, "{channel} {value:+.3} ");
        }
        let _ = write!(line, "{} {:+.3} pov ", Channel::Slider, frame.slider);
        if frame.pov == f64::from(POV_CENTERED) {
            let _ = write!(line, "{}", PovAngle::Centered);
        } else {
            let _ = write!(line, "{}", frame.pov);
        }

        let pressed: Vec<_> = frame
            .buttons
            .iter()
            .enumerate()
            .filter(|&(_, &down)| down)
            .map(|(i, _)| self.labels.label(i))
            .collect();
        if !pressed.is_empty() {
            let _ = write!(line, " | {}", pressed.join(", "));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use x52_hotas::{LedColor, LedZone, MfdLine};

    use super::*;
    use crate::surface::LogSurface;

    fn runner() -> ActionRunner<LogSurface> {
        ActionRunner::new(LogSurface::new(), ButtonLabels::x52_pro())
    }

    #[test]
    fn describe_lists_held_buttons_by_label() {
        let runner = runner();
        let mut buttons = vec![false; 39];
        buttons[0] = true;
        buttons[5] = true;
        let frame = OutputFrame {
            axes: [0.0, -1.0, 0.5, 0.0, 0.0, 0.0],
            slider: 0.0,
            pov: 90.0,
            buttons,
        };
        let line = runner.describe(&frame);
        assert!(line.starts_with("x +0.000 y -1.000 z +0.500"));
        assert!(line.contains("pov 90"));
        assert!(line.ends_with("| stick index fire, stick pinkie fire"));
    }

    #[test]
    fn describe_marks_centered_pov() {
        let runner = runner();
        let frame = OutputFrame {
            pov: f64::from(POV_CENTERED),
            ..OutputFrame::default()
        };
        let line = runner.describe(&frame);
        assert!(line.ends_with(&format!("pov {}", PovAngle::Centered)));
    }

    #[test]
    fn output_actions_reach_the_surface() {
        let mut runner = runner();
        let line = MfdLine::new(2).expect("line");
        runner.run_all(vec![
            Action::Led {
                zone: LedZone::Fire,
                color: LedColor::Red,
            },
            Action::Text {
                line,
                text: "HELLO".to_string(),
            },
        ]);
        assert!(runner.surface().diode(0));
        assert_eq!(runner.surface().line(line), "HELLO");
    }
}
