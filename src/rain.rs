// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    Rng,
};

pub const RAIN_GLYPHS: [char; 3] = ['|', '.', '`'];

const MIN_SPEED: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Raindrop {
    pub x: u16,
    // Fractional row; the drop is drawn at `y as u16`.
    pub y: f32,
    pub speed: f32,
    pub ch: char,
}

impl Raindrop {
    pub fn row(&self) -> u16 {
        self.y as u16
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intensity {
    pub generation_chance: f32,
    pub cols_per_drop: u16,
    pub max_speed: f32,
}

impl Intensity {
    pub const DRIZZLE: Intensity = Intensity {
        generation_chance: 0.3,
        cols_per_drop: 15,
        max_speed: 0.6,
    };

    pub const STORM: Intensity = Intensity {
        generation_chance: 0.5,
        cols_per_drop: 8,
        max_speed: 1.0,
    };

    pub fn for_mode(thunderstorm: bool) -> Self {
        if thunderstorm {
            Self::STORM
        } else {
            Self::DRIZZLE
        }
    }

    pub fn max_new_drops(&self, width: u16) -> usize {
        (width / self.cols_per_drop).max(1) as usize
    }
}

pub struct RainSystem {
    width: u16,
    height: u16,
    drops: Vec<Raindrop>,
    rand_chance: Uniform<f32>,
    rand_col: Uniform<u16>,
}

impl RainSystem {
    pub fn new(width: u16, height: u16) -> Self {
        let mut rain = Self {
            width: 0,
            height: 0,
            drops: Vec::new(),
            rand_chance: Uniform::new(0.0, 1.0).expect("valid range"),
            rand_col: Uniform::new_inclusive(0, 0).expect("valid range"),
        };
        rain.reset(width, height);
        rain
    }

    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.drops.clear();
        self.rand_col =
            Uniform::new_inclusive(0, width.saturating_sub(1)).expect("valid range");
    }

    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, thunderstorm: bool) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        self.spawn(rng, Intensity::for_mode(thunderstorm));
        self.advance();
    }

    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, intensity: Intensity) {
        if self.width == 0 || self.rand_chance.sample(rng) >= intensity.generation_chance {
            return;
        }

        let count = rng.random_range(1..=intensity.max_new_drops(self.width));
        self.drops.reserve(count);
        for _ in 0..count {
            let x = self.rand_col.sample(rng);
            let speed = rng.random_range(MIN_SPEED..intensity.max_speed);
            let ch = RAIN_GLYPHS[rng.random_range(0..RAIN_GLYPHS.len())];
            self.drops.push(Raindrop {
                x,
                y: 0.0,
                speed,
                ch,
            });
        }
    }

    pub fn advance(&mut self) {
        let height = self.height;
        self.drops.retain_mut(|d| {
            d.y += d.speed;
            d.row() < height
        });
    }
}
