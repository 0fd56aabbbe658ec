//! Text shape with wrap/truncate layout.

use kurbo::{BezPath, Point, Rect, Shape as _, Size};

use crate::geometry::{FlexDim, FlexSize};
use crate::style::{Style, TextOverflow};
use crate::surface::TextMeasurer;

/// A block of text laid out inside a flex box.
///
/// Layout is cached in `lines`; it is recomputed when the content, the flex
/// box, or a font-affecting style key changes. An auto width measures the
/// first line, an auto height counts lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub flex: FlexSize,
    lines: Vec<String>,
    size: Size,
}

impl Text {
    pub fn new(content: impl Into<String>, flex: FlexSize) -> Self {
        Self {
            content: content.into(),
            flex,
            lines: Vec::new(),
            size: Size::ZERO,
        }
    }

    /// The laid-out lines, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn bounds(&self, origin: Point) -> Rect {
        Rect::from_origin_size(origin, self.size)
    }

    /// Hit-test path: the layout bounding box. Text cannot supply a glyph
    /// outline, so it also cannot serve as a clip source.
    pub(crate) fn build_path(&self, origin: Point) -> BezPath {
        self.bounds(origin).to_path(0.1)
    }

    pub(crate) fn relayout(&mut self, style: &Style, measurer: &dyn TextMeasurer) {
        self.lines = self.layout_lines(style, measurer);
        let font = style.font();
        let first = self.lines.first().map(String::as_str).unwrap_or("");
        let width = match self.flex.width {
            FlexDim::Fixed(w) => w,
            FlexDim::Auto => measurer.text_width(first, &font),
        };
        let height = match self.flex.height {
            FlexDim::Fixed(h) => h,
            FlexDim::Auto => style.line_height() * self.lines.len() as f64,
        };
        self.size = Size::new(width, height);
    }

    fn layout_lines(&self, style: &Style, measurer: &dyn TextMeasurer) -> Vec<String> {
        let font = style.font();
        let FlexDim::Fixed(max_width) = self.flex.width else {
            return vec![self.content.clone()];
        };
        match style.text_overflow {
            TextOverflow::NoWrap => vec![self.content.clone()],
            TextOverflow::Truncate => {
                let reserve = measurer.text_width("...", &font);
                let mut line = String::new();
                let mut truncated = false;
                for ch in self.content.chars() {
                    let mut candidate = line.clone();
                    candidate.push(ch);
                    if measurer.text_width(&candidate, &font) > max_width - reserve {
                        truncated = true;
                        break;
                    }
                    line = candidate;
                }
                if truncated {
                    line = line.trim_end().to_string();
                    line.push_str("...");
                }
                vec![line]
            }
            TextOverflow::Wrap => {
                let line_height = style.line_height();
                let mut lines = Vec::new();
                'paragraphs: for paragraph in self.content.split('\n') {
                    let mut line = String::new();
                    for word in paragraph.split_whitespace() {
                        let candidate = if line.is_empty() {
                            word.to_string()
                        } else {
                            format!("{line} {word}")
                        };
                        if !line.is_empty()
                            && measurer.text_width(&candidate, &font) > max_width
                        {
                            lines.push(std::mem::take(&mut line));
                            if self.height_exceeded(&lines, line_height) {
                                break 'paragraphs;
                            }
                            line = word.to_string();
                        } else {
                            line = candidate;
                        }
                    }
                    lines.push(line);
                    if self.height_exceeded(&lines, line_height) {
                        break;
                    }
                }
                lines
            }
        }
    }

    fn height_exceeded(&self, lines: &[String], line_height: f64) -> bool {
        match self.flex.height {
            FlexDim::Fixed(h) => (lines.len() + 1) as f64 * line_height > h,
            FlexDim::Auto => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::GlyphEstimate;

    // GlyphEstimate at 16px: 9.6 units per glyph.
    fn style() -> Style {
        Style::default()
    }

    #[test]
    fn test_nowrap_single_line() {
        let mut text = Text::new("hello world", FlexSize::auto());
        text.relayout(&style(), &GlyphEstimate::default());
        assert_eq!(text.lines(), ["hello world"]);
        // 11 glyphs * 9.6, one line of 16 + 5.
        assert!((text.size().width - 105.6).abs() < 1e-9);
        assert!((text.size().height - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let mut style = style();
        style.text_overflow = TextOverflow::Wrap;
        let mut text = Text::new("aa bb cc", FlexSize::fixed_width(50.0));
        text.relayout(&style, &GlyphEstimate::default());
        // "aa bb" measures 48, adding " cc" exceeds 50.
        assert_eq!(text.lines(), ["aa bb", "cc"]);
        assert!((text.size().height - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_respects_fixed_height() {
        let mut style = style();
        style.text_overflow = TextOverflow::Wrap;
        let mut text = Text::new(
            "one two three four five six",
            FlexSize {
                width: FlexDim::Fixed(40.0),
                height: FlexDim::Fixed(50.0),
            },
        );
        text.relayout(&style, &GlyphEstimate::default());
        // Two 21px lines fit in 50px; a third would not.
        assert_eq!(text.lines().len(), 2);
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        let mut style = style();
        style.text_overflow = TextOverflow::Truncate;
        let mut text = Text::new("abcdefghij", FlexSize::fixed_width(60.0));
        text.relayout(&style, &GlyphEstimate::default());
        let line = &text.lines()[0];
        assert!(line.ends_with("..."));
        assert!(line.len() < "abcdefghij".len() + 3);
    }

    #[test]
    fn test_font_size_change_reflows() {
        let mut style = style();
        let mut text = Text::new("hi", FlexSize::auto());
        text.relayout(&style, &GlyphEstimate::default());
        let before = text.size();
        style.font_size = 32.0;
        text.relayout(&style, &GlyphEstimate::default());
        assert!(text.size().width > before.width);
        assert!(text.size().height > before.height);
    }
}
