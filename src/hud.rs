//! Status panel drawn with `embedded-graphics`.
//!
//! Each field is cleared and redrawn on its own, so the round loop only pays
//! for what changed.

use core::fmt::Write as _;

use embedded_graphics::{
    mono_font::{
        MonoFont,
        MonoTextStyle,
        ascii::FONT_6X10,
        iso_8859_1::FONT_10X20,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        PrimitiveStyle,
        Rectangle,
    },
    text::{
        Baseline,
        Text,
    },
};

use crate::game::Presentation;

const BACKGROUND: Rgb565 = Rgb565::new(0, 0, 4);
const LABEL: Rgb565 = Rgb565::CSS_LIGHT_GRAY;
const BANNER: Rgb565 = Rgb565::CSS_ORANGE;
const ALERT: Rgb565 = Rgb565::RED;

/// Where each HUD element goes on the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HudLayout {
    /// Area owned by the HUD. Cleared at round start.
    pub panel: Rectangle,
    /// Top-left of the `Paused` / `Fire!!` banner.
    pub banner: Point,
    pub score: Point,
    pub health: Point,
    /// Top-left of splash and game-over text.
    pub notice: Point,
}

impl HudLayout {
    /// Right-hand status column on the badge's 320x170 panel.
    pub const BADGE: Self = Self {
        panel: Rectangle::new(Point::new(120, 0), Size::new(200, 170)),
        banner: Point::new(140, 12),
        score: Point::new(140, 56),
        health: Point::new(140, 76),
        notice: Point::new(130, 104),
    };
}

impl Default for HudLayout {
    fn default() -> Self {
        Self::BADGE
    }
}

/// Fixed-capacity text line for formatting without an allocator.
struct Line {
    buf: [u8; 32],
    len: usize,
}

impl Line {
    const fn new() -> Self {
        Self {
            buf: [0; 32],
            len: 0,
        }
    }

    fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl core::fmt::Write for Line {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let end = self.len + s.len();
        if end > self.buf.len() {
            return Err(core::fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// HUD presenter over any RGB565 draw target.
pub struct Hud<D> {
    target: D,
    layout: HudLayout,
}

impl<D> Hud<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self::with_layout(target, HudLayout::BADGE)
    }

    pub const fn with_layout(target: D, layout: HudLayout) -> Self {
        Self { target, layout }
    }

    pub const fn target(&self) -> &D {
        &self.target
    }

    pub const fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn clear(&mut self, area: Rectangle) -> Result<(), D::Error> {
        area.into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(&mut self.target)
    }

    /// Clear one text row of `width` characters and draw `text` in it.
    fn field(
        &mut self,
        at: Point,
        font: &MonoFont<'_>,
        color: Rgb565,
        width: u32,
        text: &str,
    ) -> Result<(), D::Error> {
        let cell = font.character_size;
        self.clear(Rectangle::new(
            at,
            Size::new(cell.width * width, cell.height),
        ))?;
        Text::with_baseline(text, at, MonoTextStyle::new(font, color), Baseline::Top)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn labelled(&mut self, at: Point, label: &str, value: u32, width: usize) {
        let mut line = Line::new();
        if write!(line, "{label}: {value:>width$}").is_err() {
            warn!("hud value too wide");
            return;
        }
        let text = line.as_str();
        if self
            .field(at, &FONT_6X10, LABEL, text.len() as u32, text)
            .is_err()
        {
            warn!("hud draw failed");
        }
    }

    fn banner(&mut self, text: &str, color: Rgb565) {
        if self
            .field(self.layout.banner, &FONT_10X20, color, 6, text)
            .is_err()
        {
            warn!("hud banner draw failed");
        }
    }

    fn notice(&mut self, lines: &[(&str, &MonoFont<'_>, Rgb565)]) -> Result<(), D::Error> {
        let mut at = self.layout.notice;
        for &(text, font, color) in lines {
            Text::with_baseline(text, at, MonoTextStyle::new(font, color), Baseline::Top)
                .draw(&mut self.target)?;
            at.y += font.character_size.height as i32 + 4;
        }
        Ok(())
    }
}

impl<D> Presentation for Hud<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn refresh_score(&mut self, score: u32) {
        self.labelled(self.layout.score, "Score", score, 5);
    }

    fn refresh_health(&mut self, health: u32) {
        self.labelled(self.layout.health, "Life", health, 6);
    }

    fn show_paused(&mut self) {
        self.banner("Paused", ALERT);
    }

    fn show_resumed(&mut self) {
        self.banner("Fire!!", BANNER);
    }

    fn show_splash(&mut self) {
        let drawn = self.clear(self.layout.panel).and_then(|()| {
            self.notice(&[
                ("ASTEROIDS", &FONT_10X20, BANNER),
                ("Press any button", &FONT_6X10, LABEL),
            ])
        });
        if drawn.is_err() {
            warn!("splash draw failed");
        }
    }

    fn show_round_start(&mut self) {
        if self.clear(self.layout.panel).is_err() {
            warn!("hud clear failed");
        }
        self.show_resumed();
    }

    fn show_game_over(&mut self, score: u32) {
        let mut line = Line::new();
        if write!(line, "Score: {score}").is_err() {
            warn!("game over score too wide");
        }
        let drawn = self.notice(&[
            ("GAME OVER", &FONT_10X20, ALERT),
            (line.as_str(), &FONT_6X10, BANNER),
            ("Press a button to", &FONT_6X10, LABEL),
            ("start again", &FONT_6X10, LABEL),
        ]);
        if drawn.is_err() {
            warn!("game over draw failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;

    fn layout() -> HudLayout {
        HudLayout {
            panel: Rectangle::new(Point::zero(), Size::new(64, 64)),
            banner: Point::new(0, 0),
            score: Point::new(0, 24),
            health: Point::new(0, 36),
            notice: Point::new(0, 48),
        }
    }

    fn hud() -> Hud<MockDisplay<Rgb565>> {
        let mut display = MockDisplay::new();
        display.set_allow_out_of_bounds_drawing(true);
        display.set_allow_overdraw(true);
        Hud::with_layout(display, layout())
    }

    fn count(display: &MockDisplay<Rgb565>, rows: core::ops::Range<i32>, color: Rgb565) -> usize {
        rows.flat_map(|y| (0..64).map(move |x| Point::new(x, y)))
            .filter(|p| display.get_pixel(*p) == Some(color))
            .count()
    }

    #[test]
    fn line_formats_like_the_terminal_fields() {
        let mut line = Line::new();
        write!(line, "Score: {:>5}", 42).unwrap();
        assert_eq!(line.as_str(), "Score:    42");

        let mut line = Line::new();
        write!(line, "Life: {:>6}", 3).unwrap();
        assert_eq!(line.as_str(), "Life:      3");
    }

    #[test]
    fn line_rejects_overflow() {
        let mut line = Line::new();
        assert!(write!(line, "{}", "x".repeat(40)).is_err());
    }

    #[test]
    fn score_field_draws_only_its_row() {
        let mut hud = hud();
        hud.refresh_score(7);
        let display = hud.target();
        assert!(count(display, 24..34, LABEL) > 0);
        assert_eq!(count(display, 0..24, LABEL), 0);
        assert_eq!(count(display, 36..64, LABEL), 0);
    }

    #[test]
    fn health_field_draws_in_its_row() {
        let mut hud = hud();
        hud.refresh_health(3);
        assert!(count(hud.target(), 36..46, LABEL) > 0);
        assert_eq!(count(hud.target(), 0..36, LABEL), 0);
    }

    #[test]
    fn game_over_prints_the_score_under_the_title() {
        let mut hud = Hud::with_layout(
            {
                let mut display = MockDisplay::new();
                display.set_allow_out_of_bounds_drawing(true);
                display.set_allow_overdraw(true);
                display
            },
            HudLayout {
                notice: Point::zero(),
                ..layout()
            },
        );
        hud.show_game_over(12345);
        assert!(count(hud.target(), 0..20, ALERT) > 0);
        assert!(count(hud.target(), 24..34, BANNER) > 0);
    }

    #[test]
    fn resume_replaces_paused_banner() {
        let mut hud = hud();
        hud.show_paused();
        assert!(count(hud.target(), 0..20, ALERT) > 0);
        hud.show_resumed();
        assert_eq!(count(hud.target(), 0..20, ALERT), 0);
        assert!(count(hud.target(), 0..20, BANNER) > 0);
    }
}
