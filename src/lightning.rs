// Copyright (c) 2026 rezky_nightky

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::debug;

// Ordered dimmest to brightest.
pub const LIGHTNING_GLYPHS: [char; 3] = ['*', '+', '#'];

pub const LIGHTNING_CHANCE: f64 = 0.005;
pub const MAX_ACTIVE_BOLTS: usize = 3;
pub const GROWTH_DELAY: Duration = Duration::from_millis(2);
pub const BRANCH_CHANCE: f64 = 0.3;
pub const FORK_CHANCE: f64 = 0.15;
pub const SEGMENT_LIFESPAN: Duration = Duration::from_millis(800);

const BRANCH_SPREAD: i32 = 2;
const FORK_SPREAD: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub row: u16,
    pub col: u16,
    pub born: Instant,
}

impl Segment {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.born)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.age(now) > SEGMENT_LIFESPAN
    }

    pub fn norm_age(&self, now: Instant) -> f32 {
        self.age(now).as_secs_f32() / SEGMENT_LIFESPAN.as_secs_f32()
    }
}

#[derive(Clone, Debug)]
pub struct Bolt {
    segments: Vec<Segment>,
    target_len: usize,
    last_growth: Instant,
    growing: bool,
    width: u16,
    height: u16,
}

fn clamp_to(v: i32, len: u16) -> u16 {
    v.clamp(0, len as i32 - 1) as u16
}

impl Bolt {
    pub fn new(
        row: u16,
        col: u16,
        width: u16,
        height: u16,
        target_len: usize,
        now: Instant,
    ) -> Self {
        let seed = Segment {
            row: row.min(height.saturating_sub(1)),
            col: col.min(width.saturating_sub(1)),
            born: now,
        };
        Self {
            segments: vec![seed],
            target_len: target_len.max(1),
            last_growth: now,
            growing: true,
            width,
            height,
        }
    }

    // Target length drawn from [height/3, height-2], both ends floored so
    // the range is never empty.
    pub fn random_target_len<R: Rng + ?Sized>(rng: &mut R, height: u16) -> usize {
        let min_len = (height as usize / 3).max(1);
        let mut max_len = (height as usize).saturating_sub(2);
        if max_len <= min_len {
            max_len = min_len + 1;
        }
        rng.random_range(min_len..=max_len)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[allow(dead_code)]
    pub fn is_growing(&self) -> bool {
        self.growing
    }

    pub fn is_alive(&self, now: Instant) -> bool {
        self.growing || self.segments.iter().any(|s| !s.is_expired(now))
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) -> bool {
        if self.growing && now.saturating_duration_since(self.last_growth) >= GROWTH_DELAY {
            self.grow(rng, now);
        }
        self.is_alive(now)
    }

    pub fn grow<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) {
        self.last_growth = now;
        let Some(last) = self.segments.last().copied() else {
            self.growing = false;
            return;
        };
        if self.width == 0 || self.height == 0 {
            self.growing = false;
            return;
        }

        let bottom = self.height.saturating_sub(1);
        let mut fresh: Vec<Segment> = Vec::with_capacity(3);

        if self.segments.len() < self.target_len && last.row < bottom {
            let row = (last.row + 1).min(bottom);
            let branches = if rng.random::<f64>() < BRANCH_CHANCE { 2 } else { 1 };

            let mut col = last.col;
            let mut primary_col = col;
            for i in 0..branches {
                let offset = rng.random_range(-BRANCH_SPREAD..=BRANCH_SPREAD);
                col = clamp_to(col as i32 + offset, self.width);
                if i == 0 {
                    primary_col = col;
                }
                fresh.push(Segment { row, col, born: now });
            }

            if rng.random::<f64>() < FORK_CHANCE {
                let mut offset = rng.random_range(-FORK_SPREAD..=FORK_SPREAD);
                if offset == 0 {
                    offset = if rng.random::<f64>() < 0.5 { -1 } else { 1 };
                }
                let fork_col = clamp_to(last.col as i32 + offset, self.width);
                if fork_col != primary_col {
                    fresh.push(Segment {
                        row,
                        col: fork_col,
                        born: now,
                    });
                }
            }
        }

        // Same-step segments landing on one cell collapse into the first.
        let added = !fresh.is_empty();
        let first_new = self.segments.len();
        for seg in fresh {
            let dup = self.segments[first_new..]
                .iter()
                .any(|s| s.row == seg.row && s.col == seg.col);
            if !dup {
                self.segments.push(seg);
            }
        }

        let at_bottom = self.segments.last().is_some_and(|s| s.row >= bottom);
        if !added || self.segments.len() >= self.target_len || at_bottom {
            self.growing = false;
        }
    }
}

#[derive(Debug, Default)]
pub struct LightningSystem {
    bolts: Vec<Bolt>,
}

impl LightningSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn len(&self) -> usize {
        self.bolts.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.bolts.is_empty()
    }

    pub fn clear(&mut self) {
        self.bolts.clear();
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: Instant,
        width: u16,
        height: u16,
        thunderstorm: bool,
    ) {
        if !thunderstorm {
            self.bolts.clear();
            return;
        }

        if self.bolts.len() < MAX_ACTIVE_BOLTS
            && rng.random::<f64>() < LIGHTNING_CHANCE
            && width > 0
            && height > 0
        {
            self.strike(rng, now, width, height);
        }

        let before = self.bolts.len();
        self.bolts.retain_mut(|b| b.update(rng, now));
        if self.bolts.len() < before {
            debug!(
                expired = before - self.bolts.len(),
                active = self.bolts.len(),
                "lightning faded"
            );
        }
    }

    pub fn strike<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant, width: u16, height: u16) {
        let col = match width / 2 {
            0 => width / 4,
            half => rng.random_range(0..half) + width / 4,
        };
        let row = match height / 5 {
            0 => 0,
            fifth => rng.random_range(0..fifth),
        };
        let target_len = Bolt::random_target_len(rng, height);
        debug!(row, col, target_len, "lightning strike");
        self.bolts.push(Bolt::new(row, col, width, height, target_len, now));
    }
}
