use std::borrow::Cow;

use ahash::AHashMap;

/// Printable names of the X52 Pro buttons, by button index.
const X52_PRO_LABELS: [&str; 39] = [
    "stick index fire",
    "stick safe fire",
    "stick A",
    "stick B",
    "stick C",
    "stick pinkie fire",
    "throttle D",
    "throttle E",
    "toggle T1 (left up)",
    "toggle T2 (left down)",
    "toggle T3 (mid up)",
    "toggle T4 (mid down)",
    "toggle T5 (right up)",
    "toggle T6 (right down)",
    "stick index full fire",
    "throttle mouse click",
    "throttle roller (outside)",
    "throttle roller (inside)",
    "throttle roller press",
    "stick hat up",
    "stick hat right",
    "stick hat down",
    "stick hat left",
    "throttle hat inside",
    "throttle hat right",
    "throttle hat outside",
    "throttle hat left",
    "mode 1",
    "mode 2",
    "mode 3",
    "throttle i",
    "mfd function",
    "mfd start/stop (up)",
    "mfd reset (down)",
    "mfd function page up",
    "mfd function page down",
    "mfd select up",
    "mfd select down",
    "mfd select",
];

/// Button index to label lookup, supplied to whatever presents readings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonLabels {
    labels: AHashMap<usize, Box<str>>,
}

impl ButtonLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels printed on the X52 Pro.
    pub fn x52_pro() -> Self {
        let labels = X52_PRO_LABELS
            .iter()
            .enumerate()
            .map(|(i, l)| (i, Box::from(*l)))
            .collect();
        Self { labels }
    }

    pub fn insert(&mut self, index: usize, label: impl Into<Box<str>>) {
        self.labels.insert(index, label.into());
    }

    /// Overlays `other` on top of `self`.
    pub fn merge(&mut self, other: ButtonLabels) {
        self.labels.extend(other.labels);
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(&index).map(AsRef::as_ref)
    }

    /// Label of `index`, or a one-based "button N" when none is known.
    pub fn label(&self, index: usize) -> Cow<'_, str> {
        match self.get(index) {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(format!("button {}", index + 1)),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
