//! First-order thermal plant for closed-loop tests.
//!
//! `dT/dt = heater_gain * on - loss * (T - ambient)`, integrated with a
//! forward Euler step. Records the command history so tests can check when
//! the heater switched.

use heaterctl::HeaterState;

pub struct MockPlant {
    pub temperature: f32,
    pub ambient: f32,
    /// °C/s added while the heater is on.
    pub heater_gain: f32,
    /// 1/s coupling to ambient.
    pub loss: f32,
    pub history: Vec<(f32, HeaterState)>,
}

impl MockPlant {
    pub fn new(temperature: f32, ambient: f32) -> Self {
        Self {
            temperature,
            ambient,
            heater_gain: 5.0,
            loss: 0.05,
            history: Vec::new(),
        }
    }

    /// Advance the plant by `dt` seconds with the heater driven by `command`.
    pub fn advance(&mut self, command: HeaterState, dt: f32) {
        self.history.push((self.temperature, command));
        let heat = if command.is_on() { self.heater_gain } else { 0.0 };
        let drift = self.loss * (self.temperature - self.ambient);
        self.temperature += (heat - drift) * dt;
    }

    /// `(reading, new command)` at every tick where the command changed.
    pub fn switches(&self) -> Vec<(f32, HeaterState)> {
        self.history
            .windows(2)
            .filter(|w| w[0].1 != w[1].1)
            .map(|w| w[1])
            .collect()
    }

    pub fn min_temperature(&self) -> f32 {
        self.history.iter().map(|h| h.0).fold(f32::INFINITY, f32::min)
    }

    pub fn max_temperature(&self) -> f32 {
        self.history.iter().map(|h| h.0).fold(f32::NEG_INFINITY, f32::max)
    }
}
