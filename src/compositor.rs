// Copyright (c) 2026 rezky_nightky

use std::time::Instant;

use crate::cell::Cell;
use crate::frame::Frame;
use crate::lightning::{LightningSystem, Segment, LIGHTNING_GLYPHS};
use crate::palette::Palette;
use crate::rain::RainSystem;

pub fn segment_glyph(seg: &Segment, now: Instant) -> char {
    let age = seg.norm_age(now);
    let idx: usize = if age < 0.33 {
        2
    } else if age < 0.66 {
        1
    } else {
        0
    };
    LIGHTNING_GLYPHS[idx.min(LIGHTNING_GLYPHS.len() - 1)]
}

pub fn compose(
    frame: &mut Frame,
    rain: &RainSystem,
    lightning: &LightningSystem,
    palette: &Palette,
    thunderstorm: bool,
    now: Instant,
) {
    frame.clear();
    if frame.is_empty() {
        return;
    }

    let rain_style = palette.rain.bold(thunderstorm);
    for d in rain.drops() {
        frame.set(d.x, d.row(), Cell::styled(d.ch, rain_style));
    }

    for bolt in lightning.bolts() {
        for seg in bolt.segments() {
            if seg.is_expired(now) {
                continue;
            }
            let ch = segment_glyph(seg, now);
            frame.set(seg.col, seg.row, Cell::styled(ch, palette.lightning));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::lightning::SEGMENT_LIFESPAN;
    use crate::palette::{build_palette, NamedColor};
    use crate::rain::Intensity;
    use crate::runtime::ColorMode;
    use crate::testutil::ConstRng;

    fn palette() -> Palette {
        build_palette(NamedColor::Cyan, NamedColor::Yellow, ColorMode::Ansi8)
    }

    fn seg_aged(now: Instant, ms: u64) -> Segment {
        Segment {
            row: 0,
            col: 0,
            born: now - Duration::from_millis(ms),
        }
    }

    #[test]
    fn glyph_dims_with_age() {
        let now = Instant::now() + SEGMENT_LIFESPAN;
        assert_eq!(segment_glyph(&seg_aged(now, 0), now), '#');
        assert_eq!(segment_glyph(&seg_aged(now, 200), now), '#');
        assert_eq!(segment_glyph(&seg_aged(now, 400), now), '+');
        assert_eq!(segment_glyph(&seg_aged(now, 700), now), '*');
        assert_eq!(segment_glyph(&seg_aged(now, 800), now), '*');
    }

    #[test]
    fn rain_is_bold_only_in_thunderstorm() {
        let mut rain = RainSystem::new(10, 5);
        rain.spawn(&mut ConstRng::low(), Intensity::DRIZZLE);
        let lightning = LightningSystem::new();
        let mut frame = Frame::new(10, 5);
        let now = Instant::now();

        compose(&mut frame, &rain, &lightning, &palette(), false, now);
        let cell = *frame.get(0, 0).unwrap();
        assert_eq!(cell.ch, '|');
        assert!(!cell.bold);
        assert_eq!(cell.fg, palette().rain.fg);

        compose(&mut frame, &rain, &lightning, &palette(), true, now);
        assert!(frame.get(0, 0).unwrap().bold);
    }

    #[test]
    fn lightning_wins_over_rain_and_expired_segments_vanish() {
        let now = Instant::now();
        let mut rain = RainSystem::new(10, 5);
        rain.spawn(&mut ConstRng::low(), Intensity::DRIZZLE);

        let mut lightning = LightningSystem::new();
        // ConstRng::low() strikes at row 0, col width/4.
        lightning.strike(&mut ConstRng::low(), now, 10, 5);
        let mut frame = Frame::new(10, 5);
        compose(&mut frame, &rain, &lightning, &palette(), true, now);
        assert_eq!(frame.get(2, 0).unwrap().ch, '#');
        assert!(frame.get(2, 0).unwrap().bold);
        assert_eq!(frame.get(0, 0).unwrap().ch, '|');

        let mut covering = LightningSystem::new();
        covering.strike(&mut ConstRng::low(), now, 1, 5);
        compose(&mut frame, &rain, &covering, &palette(), true, now);
        assert_eq!(frame.get(0, 0).unwrap().ch, '#');

        let later = now + SEGMENT_LIFESPAN + Duration::from_millis(1);
        compose(&mut frame, &RainSystem::new(10, 5), &lightning, &palette(), true, later);
        assert!(frame.cells.iter().all(|c| *c == Cell::BLANK));
    }

    #[test]
    fn stale_cells_do_not_carry_over() {
        let now = Instant::now();
        let mut frame = Frame::new(4, 4);
        let lightning = LightningSystem::new();
        let mut rain = RainSystem::new(4, 4);
        rain.spawn(&mut ConstRng::low(), Intensity::DRIZZLE);
        compose(&mut frame, &rain, &lightning, &palette(), false, now);
        assert_ne!(frame.to_text().trim(), "");

        rain.reset(4, 4);
        compose(&mut frame, &rain, &lightning, &palette(), false, now);
        assert_eq!(frame.to_text(), "    \n    \n    \n    ");
    }
}
