//! Image shape.

use kurbo::{BezPath, Point, Rect, Size};

use super::rect::rounded_rect_path;
use crate::geometry::{FlexDim, FlexSize};
use crate::style::Style;
use crate::surface::ImageSource;

/// How an image is fitted when the requested size differs from its natural
/// aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// Shrink the destination to preserve the aspect; nothing is cropped.
    #[default]
    Contain,
    /// Fill the destination, cropping from the trailing edge.
    CoverStart,
    /// Fill the destination, cropping evenly from both edges.
    CoverCenter,
    /// Fill the destination, cropping from the leading edge.
    CoverEnd,
}

/// A raster image drawn at the shape position.
///
/// The backend owns the pixels; the shape only tracks the source handle,
/// the requested flex size, and the crop/destination geometry derived from
/// the scale mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub source: ImageSource,
    pub flex: Option<FlexSize>,
    pub mode: ScaleMode,
    resolved: Size,
    crop: Rect,
}

impl Image {
    pub fn new(source: ImageSource) -> Self {
        let mut image = Self {
            source,
            flex: None,
            mode: ScaleMode::default(),
            resolved: source.natural,
            crop: Rect::from_origin_size(Point::ZERO, source.natural),
        };
        image.resolve();
        image
    }

    pub fn with_flex(source: ImageSource, flex: FlexSize, mode: ScaleMode) -> Self {
        let mut image = Self::new(source);
        image.flex = Some(flex);
        image.mode = mode;
        image.resolve();
        image
    }

    /// The drawn size after flex and scale-mode resolution.
    pub fn resolved_size(&self) -> Size {
        self.resolved
    }

    /// The source region blitted from the natural image.
    pub fn crop(&self) -> Rect {
        self.crop
    }

    /// Recompute the destination size and crop region.
    pub(crate) fn resolve(&mut self) {
        let natural = self.source.natural;
        self.crop = Rect::from_origin_size(Point::ZERO, natural);
        if natural.width <= 0.0 || natural.height <= 0.0 {
            self.resolved = natural;
            return;
        }

        let mut size = match self.flex {
            None => natural,
            Some(flex) => match (flex.width, flex.height) {
                (FlexDim::Auto, FlexDim::Auto) => natural,
                (FlexDim::Fixed(w), FlexDim::Auto) => {
                    Size::new(w, natural.height / natural.width * w)
                }
                (FlexDim::Auto, FlexDim::Fixed(h)) => {
                    Size::new(natural.width / natural.height * h, h)
                }
                (FlexDim::Fixed(w), FlexDim::Fixed(h)) => Size::new(w, h),
            },
        };

        if size != natural && size.width > 0.0 && size.height > 0.0 {
            match self.mode {
                ScaleMode::Contain => {
                    // Preserve aspect inside the requested box.
                    if natural.width / size.width > natural.height / size.height {
                        size.height = size.width / natural.width * natural.height;
                    } else {
                        size.width = size.height / natural.height * natural.width;
                    }
                }
                ScaleMode::CoverStart | ScaleMode::CoverCenter | ScaleMode::CoverEnd => {
                    let dest_aspect = size.width / size.height;
                    let natural_aspect = natural.width / natural.height;
                    if natural_aspect > dest_aspect {
                        // Wider than the destination: crop horizontally.
                        let crop_width = natural.height * dest_aspect;
                        let x = match self.mode {
                            ScaleMode::CoverStart => 0.0,
                            ScaleMode::CoverEnd => natural.width - crop_width,
                            _ => (natural.width - crop_width) / 2.0,
                        };
                        self.crop = Rect::new(x, 0.0, x + crop_width, natural.height);
                    } else {
                        let crop_height = natural.width / dest_aspect;
                        let y = match self.mode {
                            ScaleMode::CoverStart => 0.0,
                            ScaleMode::CoverEnd => natural.height - crop_height,
                            _ => (natural.height - crop_height) / 2.0,
                        };
                        self.crop = Rect::new(0.0, y, natural.width, y + crop_height);
                    }
                }
            }
        }

        self.resolved = size;
    }

    pub(crate) fn bounds(&self, origin: Point) -> Rect {
        Rect::from_origin_size(origin, self.resolved)
    }

    pub(crate) fn build_path(&self, origin: Point, style: &Style) -> BezPath {
        rounded_rect_path(self.bounds(origin), style.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ImageHandle;

    fn source(width: f64, height: f64) -> ImageSource {
        ImageSource::new(ImageHandle(1), Size::new(width, height))
    }

    #[test]
    fn test_natural_size_without_flex() {
        let image = Image::new(source(200.0, 100.0));
        assert_eq!(image.resolved_size(), Size::new(200.0, 100.0));
        assert_eq!(image.crop(), Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_auto_height_follows_aspect() {
        let image = Image::with_flex(
            source(200.0, 100.0),
            FlexSize::fixed_width(100.0),
            ScaleMode::Contain,
        );
        assert_eq!(image.resolved_size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn test_contain_shrinks_to_aspect() {
        let image = Image::with_flex(
            source(200.0, 100.0),
            FlexSize::fixed(100.0, 100.0),
            ScaleMode::Contain,
        );
        // Width-bound: the destination height shrinks.
        assert_eq!(image.resolved_size(), Size::new(100.0, 50.0));
        assert_eq!(image.crop(), Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_cover_center_crops_symmetrically() {
        let image = Image::with_flex(
            source(200.0, 100.0),
            FlexSize::fixed(100.0, 100.0),
            ScaleMode::CoverCenter,
        );
        assert_eq!(image.resolved_size(), Size::new(100.0, 100.0));
        // Square destination from a 2:1 image: crop 100px wide, centered.
        assert_eq!(image.crop(), Rect::new(50.0, 0.0, 150.0, 100.0));
    }

    #[test]
    fn test_cover_end_crops_leading_edge() {
        let image = Image::with_flex(
            source(200.0, 100.0),
            FlexSize::fixed(100.0, 100.0),
            ScaleMode::CoverEnd,
        );
        assert_eq!(image.crop(), Rect::new(100.0, 0.0, 200.0, 100.0));
    }
}
