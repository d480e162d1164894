// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::Cell;
use crate::frame::Frame;

struct Painted {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

#[derive(Default)]
struct Pen {
    fg: Option<Color>,
    bold: bool,
    pos: Option<(u16, u16)>,
}

fn set_pen<W: Write>(out: &mut W, pen: &mut Pen, fg: Option<Color>, bold: bool) -> Result<()> {
    if fg != pen.fg {
        out.queue(SetForegroundColor(fg.unwrap_or(Color::Reset)))?;
        pen.fg = fg;
    }
    if bold != pen.bold {
        out.queue(SetAttribute(if bold {
            Attribute::Bold
        } else {
            Attribute::NormalIntensity
        }))?;
        pen.bold = bold;
    }
    Ok(())
}

// Repaints only the runs that differ from what is already on screen.
#[derive(Default)]
pub struct Painter {
    painted: Option<Painted>,
    run_buf: String,
}

impl Painter {
    pub fn paint<W: Write>(&mut self, out: &mut W, frame: &Frame) -> Result<()> {
        if frame.is_empty() {
            // Wipe once when the grid collapses, then stay idle.
            if self.painted.take().is_some() {
                out.queue(terminal::Clear(terminal::ClearType::All))?;
                out.flush()?;
            }
            return Ok(());
        }

        let resized = self
            .painted
            .as_ref()
            .map(|p| p.width != frame.width || p.height != frame.height)
            .unwrap_or(true);

        let mut painted = match self.painted.take() {
            Some(p) if !resized => p,
            _ => {
                out.queue(terminal::Clear(terminal::ClearType::All))?;
                Painted {
                    width: frame.width,
                    height: frame.height,
                    // Unprintable sentinel so the first pass paints every cell.
                    cells: vec![
                        Cell {
                            ch: '\0',
                            fg: None,
                            bold: false,
                        };
                        frame.cells.len()
                    ],
                }
            }
        };

        let mut pen = Pen::default();
        let width = frame.width as usize;

        for (y, row) in frame.rows().enumerate() {
            let y = y as u16;
            let base = y as usize * width;
            let mut x = 0usize;
            while x < row.len() {
                let cell0 = row[x];
                if painted.cells[base + x] == cell0 {
                    x += 1;
                    continue;
                }

                let x0 = x;
                self.run_buf.clear();
                while x < row.len() {
                    let cell = row[x];
                    if painted.cells[base + x] == cell
                        || cell.fg != cell0.fg
                        || cell.bold != cell0.bold
                    {
                        break;
                    }
                    self.run_buf.push(cell.ch);
                    painted.cells[base + x] = cell;
                    x += 1;
                }

                let x0 = x0 as u16;
                if pen.pos != Some((x0, y)) {
                    out.queue(cursor::MoveTo(x0, y))?;
                }
                set_pen(out, &mut pen, cell0.fg, cell0.bold)?;
                out.queue(Print(self.run_buf.as_str()))?;

                let next_x = x as u16;
                pen.pos = (next_x < frame.width).then_some((next_x, y));
            }
        }

        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(ResetColor)?;
        out.flush()?;
        self.painted = Some(painted);
        Ok(())
    }
}

pub struct Terminal {
    stdout: Stdout,
    painter: Painter,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore(&mut out);
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            painter: Painter::default(),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.painter.paint(&mut self.stdout, frame)
    }
}

fn restore(out: &mut Stdout) {
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore(&mut self.stdout);
    }
}

pub fn restore_terminal_best_effort() {
    restore(&mut stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR_ALL: &str = "\x1b[2J";

    fn paint(painter: &mut Painter, frame: &Frame) -> String {
        let mut out = Vec::new();
        painter.paint(&mut out, frame).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn marked(width: u16, height: u16) -> Frame {
        let mut f = Frame::new(width, height);
        f.set(
            1,
            0,
            Cell {
                ch: '#',
                fg: None,
                bold: true,
            },
        );
        f
    }

    #[test]
    fn first_paint_clears_and_writes_every_cell() {
        let mut painter = Painter::default();
        let out = paint(&mut painter, &marked(3, 2));
        assert!(out.contains(CLEAR_ALL));
        assert!(out.contains('#'));
    }

    #[test]
    fn unchanged_frame_writes_no_cells() {
        let mut painter = Painter::default();
        let frame = marked(3, 2);
        paint(&mut painter, &frame);
        let out = paint(&mut painter, &frame);
        assert!(!out.contains('#'));
        assert!(!out.contains(CLEAR_ALL));
    }

    #[test]
    fn collapsing_to_zero_area_clears_the_screen_once() {
        let mut painter = Painter::default();
        paint(&mut painter, &marked(3, 2));

        let out = paint(&mut painter, &Frame::new(0, 0));
        assert_eq!(out, CLEAR_ALL);
        assert!(painter.painted.is_none());
        assert_eq!(paint(&mut painter, &Frame::new(0, 0)), "");

        let out = paint(&mut painter, &marked(3, 2));
        assert!(out.contains(CLEAR_ALL));
        assert!(out.contains('#'));
    }
}
