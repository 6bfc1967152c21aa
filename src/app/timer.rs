mod mode;

pub use mode::{Mode, TickOutcome, Transition};

/// Parses the seconds typed into the input box.
///
/// Anything that is not a finite, non-negative number counts as zero. A zero
/// duration is not an error: the next tick simply finishes the boil.
pub fn parse_duration(text: &str) -> f32 {
    text.trim()
        .parse::<f32>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        // -0.0 passes the filter and would make every tick step -inf
        .map(|secs| secs + 0.0)
        .unwrap_or(0.0)
}

/// Formats seconds to one decimal, rounding to the nearest tenth first.
pub fn format_remaining(secs: f32) -> String {
    format!("{:.1}", (secs * 10.0).round() / 10.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    progress: f32,
    boiling: bool,
    boil_duration: f32,
    // seconds of real time per tick
    interval: f32,
}

impl Timer {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            progress: 0.0,
            boiling: false,
            boil_duration: 0.0,
            interval: 1.0 / tick_rate.max(1) as f32,
        }
    }

    pub fn mode(&self) -> Mode {
        match (self.boiling, self.progress >= 1.0) {
            (false, _) => Mode::Idle,
            (true, false) => Mode::Boiling,
            (true, true) => Mode::Finished,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn boil_duration(&self) -> f32 {
        self.boil_duration
    }

    /// Seconds left until the current boil completes.
    pub fn remaining(&self) -> f32 {
        (1.0 - self.progress) * self.boil_duration
    }

    pub fn label(&self) -> &'static str {
        match self.mode() {
            Mode::Idle => "Start",
            Mode::Boiling => "Stop",
            Mode::Finished => "Finished",
        }
    }

    /// Advances progress by one tick's share of the boil duration.
    pub fn tick(&mut self) -> TickOutcome {
        if self.mode() != Mode::Boiling {
            return TickOutcome::Ignored;
        }

        // A zero duration makes the step infinite, which clamps straight to 1.
        self.progress += self.interval / self.boil_duration;
        if self.progress >= 1.0 {
            self.progress = 1.0;
            return TickOutcome::Finished;
        }
        TickOutcome::Advanced
    }

    /// The start/stop button.
    ///
    /// Starting from `Idle` scales the typed seconds by the progress already
    /// made, so that the typed value is the time remaining. Pressing while
    /// `Finished` returns to `Idle` with progress rewound to zero.
    pub fn toggle(&mut self, input: &str) -> Transition {
        match self.mode() {
            Mode::Boiling => {
                self.boiling = false;
                Transition::Paused
            }
            Mode::Finished => {
                self.boiling = false;
                self.progress = 0.0;
                self.boil_duration = parse_duration(input);
                Transition::Reset
            }
            Mode::Idle => {
                // progress must be below 1 before dividing by what is left
                if self.progress >= 1.0 {
                    self.progress = 0.0;
                }
                self.boil_duration = parse_duration(input) / (1.0 - self.progress);
                self.boiling = true;
                Transition::Started
            }
        }
    }
}
