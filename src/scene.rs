// Copyright (c) 2026 rezky_nightky

use rand::{rngs::StdRng, Rng};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::compositor::compose;
use crate::frame::Frame;
use crate::lightning::LightningSystem;
use crate::palette::Palette;
use crate::rain::RainSystem;
use crate::runtime::Input;

pub struct Scene<R = StdRng, C = SystemClock> {
    width: u16,
    height: u16,
    thunderstorm: bool,
    running: bool,
    rain: RainSystem,
    lightning: LightningSystem,
    palette: Palette,
    frame: Frame,
    rng: R,
    clock: C,
}

impl<R: Rng, C: Clock> Scene<R, C> {
    pub fn new(rng: R, clock: C, palette: Palette, thunderstorm: bool) -> Self {
        Self {
            width: 0,
            height: 0,
            thunderstorm,
            running: true,
            rain: RainSystem::new(0, 0),
            lightning: LightningSystem::new(),
            palette,
            frame: Frame::new(0, 0),
            rng,
            clock,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_thunderstorm(&self) -> bool {
        self.thunderstorm
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn rain(&self) -> &RainSystem {
        &self.rain
    }

    pub fn lightning(&self) -> &LightningSystem {
        &self.lightning
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn apply(&mut self, input: Input) {
        match input {
            Input::Quit => {
                self.running = false;
            }
            Input::ToggleThunderstorm => {
                self.thunderstorm = !self.thunderstorm;
                debug!(
                    thunderstorm = self.thunderstorm,
                    drops = self.rain.len(),
                    bolts = self.lightning.len(),
                    "mode toggled, clearing particles"
                );
                self.clear_particles();
            }
            Input::Resize(width, height) => {
                debug!(width, height, "resize");
                self.width = width;
                self.height = height;
                self.frame = Frame::new(width, height);
                self.clear_particles();
            }
        }
    }

    fn clear_particles(&mut self) {
        self.rain.reset(self.width, self.height);
        self.lightning.clear();
    }

    pub fn tick(&mut self) {
        if !self.running || !self.has_area() {
            return;
        }
        let now = self.clock.now();
        self.lightning.update(
            &mut self.rng,
            now,
            self.width,
            self.height,
            self.thunderstorm,
        );
        self.rain.update(&mut self.rng, self.thunderstorm);
    }

    pub fn render(&mut self) -> &Frame {
        let now = self.clock.now();
        compose(
            &mut self.frame,
            &self.rain,
            &self.lightning,
            &self.palette,
            self.thunderstorm,
            now,
        );
        &self.frame
    }
}
