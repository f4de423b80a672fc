use std::io::{self, Stdout, Write};
use std::ops::Range;

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetForegroundColor};

use crate::color::Color;
use crate::error::Result;

/// A fixed length run of pixels that effects draw into.
///
/// Indices and ranges past `len()` are a caller bug and panic like slice indexing.
pub trait PixelBuffer {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set(&mut self, index: usize, color: Color);

    fn fill_range(&mut self, range: Range<usize>, color: Color);

    fn write_range(&mut self, start: usize, colors: &[Color]);

    fn fill(&mut self, color: Color) {
        let len = self.len();
        self.fill_range(0..len, color);
    }

    /// Pushes the current contents to wherever the pixels end up.
    fn show(&mut self) -> Result<()>;
}

pub struct PixelStrip {
    pixels: Vec<Color>,
    preview: Option<TerminalPreview>,
    frames_shown: u64,
}

impl PixelStrip {
    pub fn new(pixel_count: usize) -> PixelStrip {
        PixelStrip {
            pixels: vec![Color::new(0, 0, 0); pixel_count],
            preview: None,
            frames_shown: 0,
        }
    }

    pub fn with_preview(pixel_count: usize) -> PixelStrip {
        PixelStrip {
            preview: Some(TerminalPreview::new()),
            ..PixelStrip::new(pixel_count)
        }
    }

    #[cfg(test)]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn frames_shown(&self) -> u64 {
        self.frames_shown
    }
}

impl PixelBuffer for PixelStrip {
    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set(&mut self, index: usize, color: Color) {
        self.pixels[index] = color;
    }

    fn fill_range(&mut self, range: Range<usize>, color: Color) {
        self.pixels[range].fill(color);
    }

    fn write_range(&mut self, start: usize, colors: &[Color]) {
        self.pixels[start..start + colors.len()].copy_from_slice(colors);
    }

    fn show(&mut self) -> Result<()> {
        self.frames_shown += 1;
        if let Some(preview) = &mut self.preview {
            preview.render(&self.pixels)?;
        }
        Ok(())
    }
}

/// Paints the strip as a single line of truecolor blocks, redrawn in place.
pub struct TerminalPreview {
    out: Stdout,
}

impl Default for TerminalPreview {
    fn default() -> Self {
        TerminalPreview::new()
    }
}

impl TerminalPreview {
    pub fn new() -> TerminalPreview {
        TerminalPreview { out: io::stdout() }
    }

    fn render(&mut self, pixels: &[Color]) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0))?;
        for pixel in pixels {
            queue!(
                self.out,
                SetForegroundColor(crossterm::style::Color::Rgb {
                    r: pixel.red,
                    g: pixel.green,
                    b: pixel.blue,
                }),
                Print("██")
            )?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}
