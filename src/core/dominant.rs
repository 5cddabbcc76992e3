//! Dominant color extraction from pixel buffers

use image::imageops::FilterType;
use image::RgbaImage;
use palette::Srgb;
use tracing::{debug, warn};

use super::colorlib::{ColorLib, NamedColor};
use crate::imaging::{ImageLoader, ImageSource};

/// Default number of colors reported per image
pub const DEFAULT_MAX_COLORS: usize = 2;

/// How an image is sampled before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingOptions {
    /// Longest edge after downscaling
    pub max_edge: u32,
    /// Classify one pixel out of every `stride`
    pub stride: usize,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            max_edge: 300,
            stride: 10,
        }
    }
}

/// Most frequent color buckets in an image, most frequent first.
///
/// Near-white and near-black pixels are ignored. When nothing qualifies the
/// result is `[Multi]`.
pub fn extract_dominant_colors(
    img: &RgbaImage,
    max_colors: usize,
    options: SamplingOptions,
) -> Vec<NamedColor> {
    let scaled = downscale(img, options.max_edge);
    let img = scaled.as_ref().unwrap_or(img);

    // insertion order is kept so equal counts rank by first appearance
    let mut counts: Vec<(NamedColor, usize)> = Vec::new();

    for pixel in img.pixels().step_by(options.stride.max(1)) {
        let [r, g, b, _] = pixel.0;

        if is_background(r, g, b) {
            continue;
        }

        let color = ColorLib::nearest_color(Srgb::new(r, g, b));
        match counts.iter_mut().find(|(c, _)| *c == color) {
            Some((_, count)) => *count += 1,
            None => counts.push((color, 1)),
        }
    }

    // stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let colors: Vec<NamedColor> = counts
        .into_iter()
        .take(max_colors)
        .map(|(color, _)| color)
        .collect();

    if colors.is_empty() {
        vec![NamedColor::Multi]
    } else {
        colors
    }
}

/// Load an image and extract its dominant colors.
///
/// Load and decode failures are logged and reported as `[Multi]`.
pub async fn extract_dominant_colors_from(
    loader: &dyn ImageLoader,
    source: &ImageSource,
    max_colors: usize,
    options: SamplingOptions,
) -> Vec<NamedColor> {
    let loaded = match loader.load(source).await {
        Ok(loaded) => loaded,
        Err(e) => {
            warn!("Failed to load image for color extraction: {}", e);
            return vec![NamedColor::Multi];
        }
    };

    let task = tokio::task::spawn_blocking(move || {
        loaded
            .into_rgba()
            .map(|img| extract_dominant_colors(&img, max_colors, options))
    });

    match task.await {
        Ok(Ok(colors)) => {
            debug!("Dominant colors: {:?}", colors);
            colors
        }
        Ok(Err(e)) => {
            warn!("Failed to decode image for color extraction: {}", e);
            vec![NamedColor::Multi]
        }
        Err(e) => {
            warn!("Color extraction task failed: {}", e);
            vec![NamedColor::Multi]
        }
    }
}

fn is_background(r: u8, g: u8, b: u8) -> bool {
    let near_white = r > 240 && g > 240 && b > 240;
    let near_black = r < 20 && g < 20 && b < 20;
    near_white || near_black
}

/// Shrink so the longer edge fits `max_edge`, keeping the aspect ratio.
/// Returns `None` when the image is already small enough.
fn downscale(img: &RgbaImage, max_edge: u32) -> Option<RgbaImage> {
    let (width, height) = img.dimensions();
    let longest = width.max(height);

    if max_edge == 0 || longest <= max_edge {
        return None;
    }

    let scale = max_edge as f64 / longest as f64;
    let new_width = ((width as f64 * scale).round() as u32).max(1);
    let new_height = ((height as f64 * scale).round() as u32).max(1);

    Some(image::imageops::resize(
        img,
        new_width,
        new_height,
        FilterType::Triangle,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{encode_png, DecodeError, LoadedImage};
    use async_trait::async_trait;
    use image::Rgba;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
    }

    #[test]
    fn test_solid_reference_color() {
        for color in [NamedColor::Red, NamedColor::Blue, NamedColor::Pink] {
            let rgb = color.reference();
            let img = solid(50, 40, [rgb.red, rgb.green, rgb.blue]);
            let colors = extract_dominant_colors(&img, 2, SamplingOptions::default());
            assert_eq!(colors, vec![color]);
        }
    }

    #[test]
    fn test_background_only_falls_back_to_multi() {
        let white = solid(30, 30, [250, 250, 250]);
        assert_eq!(
            extract_dominant_colors(&white, 2, SamplingOptions::default()),
            vec![NamedColor::Multi]
        );

        let black = solid(30, 30, [5, 5, 5]);
        assert_eq!(
            extract_dominant_colors(&black, 2, SamplingOptions::default()),
            vec![NamedColor::Multi]
        );
    }

    #[test]
    fn test_frequency_order_and_limit() {
        // top 70 rows red, next 20 blue, last 10 green
        let mut img = solid(10, 100, [255, 0, 0]);
        for y in 70..90 {
            for x in 0..10 {
                img.put_pixel(x, y, Rgba([0, 0, 255, 255]));
            }
        }
        for y in 90..100 {
            for x in 0..10 {
                img.put_pixel(x, y, Rgba([0, 128, 0, 255]));
            }
        }

        let options = SamplingOptions {
            max_edge: 300,
            stride: 1,
        };
        assert_eq!(
            extract_dominant_colors(&img, 2, options),
            vec![NamedColor::Red, NamedColor::Blue]
        );
        assert_eq!(
            extract_dominant_colors(&img, 5, options),
            vec![NamedColor::Red, NamedColor::Blue, NamedColor::Green]
        );
    }

    #[test]
    fn test_zero_max_colors_falls_back_to_multi() {
        let img = solid(10, 10, [255, 0, 0]);
        assert_eq!(
            extract_dominant_colors(&img, 0, SamplingOptions::default()),
            vec![NamedColor::Multi]
        );
    }

    #[test]
    fn test_downscale_keeps_aspect_ratio() {
        let img = solid(1200, 600, [255, 0, 0]);
        let scaled = downscale(&img, 300).unwrap();
        assert_eq!(scaled.dimensions(), (300, 150));

        let small = solid(200, 100, [255, 0, 0]);
        assert!(downscale(&small, 300).is_none());
    }

    struct StaticLoader(Result<Vec<u8>, ()>);

    #[async_trait]
    impl ImageLoader for StaticLoader {
        async fn load(&self, _source: &ImageSource) -> Result<LoadedImage, DecodeError> {
            match &self.0 {
                Ok(data) => Ok(LoadedImage::Encoded(data.clone())),
                Err(()) => Err(DecodeError::Empty),
            }
        }
    }

    #[tokio::test]
    async fn test_extract_from_loader() {
        let png = encode_png(&solid(20, 20, [0, 0, 255]));
        let loader = StaticLoader(Ok(png));
        let source = ImageSource::parse("/products/blue.png");

        let colors = extract_dominant_colors_from(&loader, &source, 2, SamplingOptions::default())
            .await;
        assert_eq!(colors, vec![NamedColor::Blue]);
    }

    #[tokio::test]
    async fn test_decode_failures_fall_back_to_multi() {
        let source = ImageSource::parse("/products/missing.png");

        let failing = StaticLoader(Err(()));
        let colors =
            extract_dominant_colors_from(&failing, &source, 2, SamplingOptions::default()).await;
        assert_eq!(colors, vec![NamedColor::Multi]);

        let garbage = StaticLoader(Ok(b"not an image".to_vec()));
        let colors =
            extract_dominant_colors_from(&garbage, &source, 2, SamplingOptions::default()).await;
        assert_eq!(colors, vec![NamedColor::Multi]);
    }
}
