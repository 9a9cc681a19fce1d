//! Info panel text
//!
//! The panel occupies the bottom-right third of the window. Each configured
//! line is drawn in one color and underlined. Text is rasterised on the CPU
//! with fontdue into an RGBA image that the overlay pipeline uploads.

use std::fs;
use std::io;
use std::path::Path;

use image::{Rgba, RgbaImage};

/// A pixel rectangle in window coordinates (origin top-left)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The bottom-right third of a `width` x `height` window
pub fn panel_rect(width: u32, height: u32) -> PanelRect {
    let x = 2 * width / 3;
    let y = 2 * height / 3;
    PanelRect {
        x,
        y,
        width: width - x,
        height: height - y,
    }
}

/// Text placement inside the panel, as fractions of the panel size
#[derive(Clone, Debug, PartialEq)]
pub struct PanelLayout {
    /// Left edge of every line
    pub left: f32,
    /// Baseline of the first line
    pub first_baseline: f32,
    /// Baseline distance between lines
    pub line_spacing: f32,
    /// Glyph size
    pub font_size: f32,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            left: 0.35,
            first_baseline: 0.7,
            line_spacing: 0.05,
            font_size: 0.045,
        }
    }
}

impl PanelLayout {
    /// Baseline y of each line in pixels
    pub fn baselines(&self, height: u32, count: usize) -> Vec<f32> {
        let h = height as f32;
        (0..count)
            .map(|i| (self.first_baseline + self.line_spacing * i as f32) * h)
            .collect()
    }

    pub fn font_px(&self, height: u32) -> f32 {
        (self.font_size * height as f32).max(1.0)
    }

    pub fn left_px(&self, width: u32) -> f32 {
        self.left * width as f32
    }
}

/// Error loading the panel font
#[derive(Debug)]
pub enum OverlayError {
    /// IO error reading the font file
    Io(io::Error),
    /// The file is not a usable font
    Font(String),
}

impl std::fmt::Display for OverlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayError::Io(e) => write!(f, "IO error: {}", e),
            OverlayError::Font(msg) => write!(f, "Font error: {}", msg),
        }
    }
}

impl std::error::Error for OverlayError {}

impl From<io::Error> for OverlayError {
    fn from(e: io::Error) -> Self {
        OverlayError::Io(e)
    }
}

/// Load a TrueType/OpenType font
pub fn load_font(path: &Path) -> Result<fontdue::Font, OverlayError> {
    let bytes = fs::read(path)?;
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| OverlayError::Font(e.to_string()))
}

/// The text lines of the info panel
pub struct TextPanel {
    font: Option<fontdue::Font>,
    lines: Vec<String>,
    color: [u8; 4],
    layout: PanelLayout,
}

impl TextPanel {
    pub fn new(font: Option<fontdue::Font>, lines: Vec<String>, color: [u8; 4]) -> Self {
        Self {
            font,
            lines,
            color,
            layout: PanelLayout::default(),
        }
    }

    /// Build a panel from a font file; a font that fails to load disables the panel
    pub fn from_font_file(path: &Path, lines: Vec<String>, color: [u8; 4]) -> Self {
        let font = match load_font(path) {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("Overlay disabled, cannot load font {}: {}", path.display(), e);
                None
            }
        };
        Self::new(font, lines, color)
    }

    pub fn is_enabled(&self) -> bool {
        self.font.is_some() && !self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Rasterise the panel at `width` x `height` pixels
    ///
    /// Returns `None` when the panel is disabled or the size is zero.
    pub fn rasterize(&self, width: u32, height: u32) -> Option<RgbaImage> {
        let font = self.font.as_ref()?;
        if self.lines.is_empty() || width == 0 || height == 0 {
            return None;
        }

        let mut image = RgbaImage::new(width, height);
        let px = self.layout.font_px(height);
        let left = self.layout.left_px(width);
        let thickness = (px / 14.0).ceil().max(1.0) as u32;

        for (line, baseline) in self.lines.iter().zip(self.layout.baselines(height, self.lines.len())) {
            let mut pen = left;
            for c in line.chars() {
                let (metrics, coverage) = font.rasterize(c, px);
                let glyph_left = (pen + metrics.xmin as f32).round() as i64;
                let glyph_top = (baseline - (metrics.height as i32 + metrics.ymin) as f32).round() as i64;
                for gy in 0..metrics.height {
                    for gx in 0..metrics.width {
                        let value = coverage[gy * metrics.width + gx];
                        stamp(&mut image, glyph_left + gx as i64, glyph_top + gy as i64, value, self.color);
                    }
                }
                pen += metrics.advance_width;
            }

            let underline_y = (baseline + thickness as f32 + 1.0).round() as i64;
            draw_underline(&mut image, left.round() as i64, pen.round() as i64, underline_y, thickness, self.color);
        }

        Some(image)
    }
}

/// Blend one coverage sample of `color` into the image; out-of-bounds is clipped
pub fn stamp(image: &mut RgbaImage, x: i64, y: i64, coverage: u8, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 || coverage == 0 {
        return;
    }
    let alpha = (coverage as u16 * color[3] as u16 / 255) as u8;
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    if alpha > pixel[3] {
        *pixel = Rgba([color[0], color[1], color[2], alpha]);
    }
}

/// Fill a horizontal bar from `x0` to `x1` (exclusive) starting at row `y`
pub fn draw_underline(image: &mut RgbaImage, x0: i64, x1: i64, y: i64, thickness: u32, color: [u8; 4]) {
    for row in y..y + thickness as i64 {
        for x in x0..x1 {
            stamp(image, x, row, 255, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];

    #[test]
    fn test_panel_rect_is_bottom_right_third() {
        let rect = panel_rect(900, 600);
        assert_eq!(
            rect,
            PanelRect {
                x: 600,
                y: 400,
                width: 300,
                height: 200,
            }
        );
    }

    #[test]
    fn test_panel_rect_rounding_covers_edge() {
        let rect = panel_rect(1000, 700);
        assert_eq!(rect.x + rect.width, 1000);
        assert_eq!(rect.y + rect.height, 700);
    }

    #[test]
    fn test_baselines_step_down() {
        let layout = PanelLayout::default();
        let baselines = layout.baselines(200, 4);
        assert_eq!(baselines.len(), 4);
        assert!((baselines[0] - 140.0).abs() < 1e-3);
        assert!((baselines[3] - 170.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_font_disables_panel() {
        let panel = TextPanel::new(None, vec!["Course".to_string()], RED);
        assert!(!panel.is_enabled());
        assert!(panel.rasterize(300, 200).is_none());
    }

    #[test]
    fn test_missing_font_file_disables_panel() {
        let panel = TextPanel::from_font_file(Path::new("/no/such/font.ttf"), vec!["x".to_string()], RED);
        assert!(!panel.is_enabled());
    }

    #[test]
    fn test_load_font_rejects_garbage() {
        let dir = std::env::temp_dir().join("runway_overlay_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("garbage.ttf");
        fs::write(&path, b"not a font").unwrap();
        assert!(matches!(load_font(&path), Err(OverlayError::Font(_))));
    }

    #[test]
    fn test_stamp_clips_and_keeps_strongest_alpha() {
        let mut image = RgbaImage::new(4, 4);
        stamp(&mut image, -1, 0, 255, RED);
        stamp(&mut image, 4, 0, 255, RED);
        stamp(&mut image, 1, 1, 128, RED);
        stamp(&mut image, 1, 1, 64, RED);
        assert_eq!(image.get_pixel(1, 1), &Rgba([255, 0, 0, 128]));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_underline_fills_span() {
        let mut image = RgbaImage::new(10, 10);
        draw_underline(&mut image, 2, 6, 5, 2, RED);
        let filled = image.pixels().filter(|p| p[3] == 255).count();
        assert_eq!(filled, 4 * 2);
        assert_eq!(image.get_pixel(2, 5)[0], 255);
        assert_eq!(image.get_pixel(6, 5)[3], 0);
    }
}
