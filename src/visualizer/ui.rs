//! Terminal drawing surface for the bar visualization.
//!
//! The fixed logical canvas is scaled onto whatever area the terminal offers.
//! Each cell shows two vertical pixels using an upper half block, the top pixel
//! as foreground and the bottom pixel as background.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{buffer::Buffer, layout::Rect, prelude::*, style::Color, widgets::Widget};
use std::io::{self, stdout, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::frame::{ColoredRect, Rgb};
use super::surface::Surface;
use crate::config::VisualizerConfig;
use crate::constants::WINDOW_TITLE;

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Full-screen terminal surface.
///
/// Quits on `q`, `Escape`, `Ctrl+C`, or when the shared signal flag is set.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    canvas_width: u32,
    canvas_height: u32,
    background: Rgb,
    rects: Vec<ColoredRect>,
    quit_signal: Arc<AtomicBool>,
    restored: bool,
}

impl TerminalSurface {
    /// Enters raw mode and the alternate screen and sets the terminal title.
    ///
    /// Raw mode is switched off again if any later step fails.
    ///
    /// # Errors
    /// - If raw mode cannot be enabled
    /// - If the alternate screen cannot be entered
    /// - If the terminal cannot be initialized
    pub fn new(config: &VisualizerConfig, quit_signal: Arc<AtomicBool>) -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let terminal = setup_or_restore(
            || {
                let mut stdout = stdout();
                enter_screen(&mut stdout)?;
                let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
                terminal.hide_cursor()?;

                let size = terminal.size()?;
                tracing::debug!(
                    "Terminal {}x{} cells for a {}x{} canvas",
                    size.width,
                    size.height,
                    config.display.width,
                    config.display.height
                );
                Ok(terminal)
            },
            || {
                let _ = execute!(stdout(), LeaveAlternateScreen);
                if let Err(e) = disable_raw_mode() {
                    tracing::warn!("Could not disable raw mode: {e}");
                }
            },
        )?;

        Ok(TerminalSurface {
            terminal,
            canvas_width: config.display.width,
            canvas_height: config.display.height,
            background: config.colors.background,
            rects: Vec::new(),
            quit_signal,
            restored: false,
        })
    }

    /// Leaves the alternate screen and restores the cursor.
    ///
    /// # Errors
    /// - If terminal mode cannot be disabled
    /// - If the cursor cannot be shown
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

/// Switches `out` to the alternate screen and titles the window.
fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, SetTitle(WINDOW_TITLE))
}

/// Runs `setup`, calling `restore` before handing back its error.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> anyhow::Result<T>,
    restore: impl FnOnce(),
) -> anyhow::Result<T> {
    setup().inspect_err(|_| restore())
}

impl Surface for TerminalSurface {
    fn poll_quit(&mut self) -> anyhow::Result<bool> {
        let mut quit = self.quit_signal.load(Ordering::Relaxed);
        if quit {
            tracing::debug!("Termination signal received");
        }

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        tracing::debug!("Escape or 'q' pressed: quitting");
                        quit = true;
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        tracing::debug!("Ctrl+C pressed: quitting");
                        quit = true;
                    }
                    _ => {}
                }
            }
        }

        Ok(quit)
    }

    fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.rects.clear();
    }

    fn fill_rect(&mut self, rect: &ColoredRect) {
        self.rects.push(*rect);
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let canvas = BarCanvas {
            rects: &self.rects,
            background: self.background,
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
        };
        self.terminal.draw(|frame| {
            frame.render_widget(canvas, frame.area());
        })?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Widget that rasterizes canvas rectangles into half-block cells.
pub struct BarCanvas<'a> {
    pub rects: &'a [ColoredRect],
    pub background: Rgb,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Widget for BarCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let cols = area.width as usize;
        let rows = area.height as usize * 2;
        let pixels = rasterize(
            self.rects,
            self.background,
            (self.canvas_width, self.canvas_height),
            (cols, rows),
        );

        for cy in 0..area.height {
            for cx in 0..area.width {
                let top = pixels[(cy as usize * 2) * cols + cx as usize];
                let bottom = pixels[(cy as usize * 2 + 1) * cols + cx as usize];
                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_symbol("▀")
                        .set_fg(top.into())
                        .set_bg(bottom.into());
                }
            }
        }
    }
}

/// Scales canvas rectangles onto a `grid` of pixels, row-major.
///
/// A grid pixel takes a rectangle's colour when its centre lies inside the
/// rectangle. Parts of rectangles outside the canvas are cut off and later
/// rectangles paint over earlier ones.
pub fn rasterize(
    rects: &[ColoredRect],
    background: Rgb,
    canvas: (u32, u32),
    grid: (usize, usize),
) -> Vec<Rgb> {
    let (canvas_width, canvas_height) = canvas;
    let (cols, rows) = grid;
    let mut pixels = vec![background; cols * rows];

    if canvas_width == 0 || canvas_height == 0 {
        return pixels;
    }

    let scale_x = cols as f32 / canvas_width as f32;
    let scale_y = rows as f32 / canvas_height as f32;

    for rect in rects.iter().filter(|r| !r.is_degenerate()) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.x.saturating_add(rect.width).min(canvas_width as i32);
        let y1 = rect.y.saturating_add(rect.height).min(canvas_height as i32);
        if x0 >= x1 || y0 >= y1 {
            continue;
        }

        let (c0, c1) = (
            grid_index(x0, scale_x, cols),
            grid_index(x1, scale_x, cols),
        );
        let (r0, r1) = (
            grid_index(y0, scale_y, rows),
            grid_index(y1, scale_y, rows),
        );

        for row in r0..r1 {
            pixels[row * cols + c0..row * cols + c1].fill(rect.color);
        }
    }

    pixels
}

/// First grid index whose centre is at or past canvas coordinate `coord`.
fn grid_index(coord: i32, scale: f32, len: usize) -> usize {
    ((coord as f32 * scale) - 0.5).ceil().clamp(0.0, len as f32) as usize
}
