use crate::style::{Assets, KeyStyle};
use crate::Error;
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fs;
use std::path::Path;

/// Free space around the icon, leaving a band at the bottom for the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

pub const KEY_MARGINS: Margins = Margins {
    top: 0,
    right: 0,
    bottom: 20,
    left: 0,
};

pub const LABEL_SIZE: f32 = 26.0;

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LABEL_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub fn load_icon(path: &Path) -> Result<DynamicImage, Error> {
    image::open(path).map_err(|source| Error::Image {
        path: path.to_owned(),
        source,
    })
}

pub fn load_font(path: &Path) -> Result<FontVec, Error> {
    let data = fs::read(path)?;
    FontVec::try_from_vec(data).map_err(|source| Error::Font {
        path: path.to_owned(),
        source,
    })
}

/// Places `icon` centered inside `margins` on a black key-sized canvas.
/// Icons larger than the free area shrink to fit, keeping their aspect
/// ratio; smaller ones keep their pixel size.
pub fn scaled_image(size: (u32, u32), icon: &DynamicImage, margins: Margins) -> RgbaImage {
    let (width, height) = size;
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

    let free_width = width.saturating_sub(margins.left + margins.right);
    let free_height = height.saturating_sub(margins.top + margins.bottom);
    if free_width == 0 || free_height == 0 || icon.width() == 0 || icon.height() == 0 {
        return canvas;
    }

    let scaled = if icon.width() > free_width || icon.height() > free_height {
        icon.resize(free_width, free_height, FilterType::Lanczos3)
            .to_rgba8()
    } else {
        icon.to_rgba8()
    };
    let x = margins.left + (free_width - scaled.width()) / 2;
    let y = margins.top + (free_height - scaled.height()) / 2;
    imageops::overlay(&mut canvas, &scaled, x.into(), y.into());
    canvas
}

/// Draws `text` centered horizontally with its first baseline at half the
/// image height. Each `\n` starts a new line one line-height lower.
pub fn draw_label<F: Font>(image: &mut RgbaImage, font: &F, text: &str) {
    let scale = PxScale::from(LABEL_SIZE);
    let scaled = font.as_scaled(scale);
    let center = image.width() as f32 / 2.0;
    let mut baseline = image.height() as f32 / 2.0;

    for line in text.split('\n') {
        let (line_width, _) = text_size(scale, font, line);
        let x = (center - line_width as f32 / 2.0).round() as i32;
        let y = (baseline - scaled.ascent()).round() as i32;
        draw_text_mut(image, LABEL_COLOR, x, y, scale, font, line);
        baseline += scaled.height() + scaled.line_gap();
    }
}

/// Builds the image for one key from its style, reading the assets fresh.
pub fn render_key_image(
    assets: &Assets,
    style: &KeyStyle,
    size: (u32, u32),
) -> Result<DynamicImage, Error> {
    let icon = load_icon(&assets.icon_path(style))?;
    let mut image = scaled_image(size, &icon, KEY_MARGINS);

    if !style.label.is_empty() {
        let font = load_font(&assets.font_path(style))?;
        draw_label(&mut image, &font, &style.label);
    }

    Ok(DynamicImage::ImageRgba8(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{key_style, KeyState};
    use image::RgbImage;

    const TEST_FONT: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSans.ttf");

    /// Bounding box `(min_x, min_y, max_x, max_y)` of the white pixels.
    fn lit_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        image
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] > 128 && p[1] > 128 && p[2] > 128)
            .fold(None, |bounds, (x, y, _)| match bounds {
                None => Some((x, y, x, y)),
                Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
            })
    }

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb(color)))
    }

    fn is_red(pixel: &Rgba<u8>) -> bool {
        pixel[0] > 200 && pixel[1] < 50 && pixel[2] < 50
    }

    #[test]
    fn small_icon_keeps_its_size() {
        let image = scaled_image((72, 72), &solid(10, 10, [255, 0, 0]), KEY_MARGINS);
        assert_eq!(image.dimensions(), (72, 72));
        // 10x10 at (31, 21), centered in the 72x52 area above the band.
        assert!(is_red(image.get_pixel(31, 21)));
        assert!(is_red(image.get_pixel(40, 30)));
        assert_eq!(*image.get_pixel(30, 26), BACKGROUND);
        assert_eq!(*image.get_pixel(41, 26), BACKGROUND);
        assert_eq!(*image.get_pixel(36, 20), BACKGROUND);
        assert_eq!(*image.get_pixel(36, 31), BACKGROUND);
        assert_eq!(*image.get_pixel(36, 65), BACKGROUND);
    }

    #[test]
    fn large_icon_shrinks_above_band() {
        let image = scaled_image((72, 72), &solid(144, 144, [255, 0, 0]), KEY_MARGINS);
        // 52x52 at (10, 0).
        assert!(is_red(image.get_pixel(36, 26)));
        assert!(is_red(image.get_pixel(12, 2)));
        assert_eq!(*image.get_pixel(5, 26), BACKGROUND);
        assert_eq!(*image.get_pixel(66, 26), BACKGROUND);
        assert_eq!(*image.get_pixel(36, 60), BACKGROUND);
    }

    #[test]
    fn speed_label_is_centered_low_on_the_key() {
        let font = load_font(Path::new(TEST_FONT)).unwrap();
        let mut image = RgbaImage::from_pixel(72, 72, BACKGROUND);
        draw_label(&mut image, &font, " 007\nkm/h");

        let (min_x, min_y, max_x, max_y) = lit_bounds(&image).expect("label drawn");
        assert!((min_x + max_x).abs_diff(72) <= 8, "x {}..{}", min_x, max_x);
        // First line starts below the top quarter, second line ends in the band.
        assert!(min_y >= 15, "y starts at {}", min_y);
        assert!((52..72).contains(&max_y), "y ends at {}", max_y);
    }

    #[test]
    fn long_label_is_clipped() {
        let font = load_font(Path::new(TEST_FONT)).unwrap();
        let mut image = RgbaImage::from_pixel(72, 72, BACKGROUND);
        draw_label(&mut image, &font, " 123456789\nkm/h");

        let (min_x, _, max_x, _) = lit_bounds(&image).expect("label drawn");
        assert!(min_x <= 2, "x starts at {}", min_x);
        assert!(max_x >= 69, "x ends at {}", max_x);
    }

    #[test]
    fn renders_speed_key_with_font() {
        let dir = tempfile::tempdir().unwrap();
        solid(8, 8, [0, 0, 0])
            .save(dir.path().join("null.png"))
            .unwrap();
        fs::copy(TEST_FONT, dir.path().join("Roboto-Regular.ttf")).unwrap();
        let assets = Assets::new(dir.path());

        let style = key_style(12, KeyState::Value(7));
        let image = render_key_image(&assets, &style, (72, 72)).unwrap();
        let (_, _, _, max_y) = lit_bounds(&image.to_rgba8()).expect("label drawn");
        assert!(max_y >= 52);
    }

    #[test]
    fn wide_icon_keeps_aspect() {
        let image = scaled_image((96, 96), &solid(200, 50, [255, 0, 0]), KEY_MARGINS);
        // 96x24 icon centered vertically in the 76px free area.
        assert!(is_red(image.get_pixel(48, 38)));
        assert_eq!(*image.get_pixel(48, 10), BACKGROUND);
        assert_eq!(*image.get_pixel(48, 70), BACKGROUND);
    }

    #[test]
    fn key_smaller_than_margins_is_blank() {
        let image = scaled_image((16, 16), &solid(4, 4, [255, 0, 0]), KEY_MARGINS);
        assert!(image.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn renders_from_asset_directory() {
        let dir = tempfile::tempdir().unwrap();
        solid(8, 8, [255, 0, 0])
            .save(dir.path().join("55_on.png"))
            .unwrap();
        let assets = Assets::new(dir.path());

        let style = key_style(1, KeyState::Flag(true));
        let image = render_key_image(&assets, &style, (72, 72)).unwrap();
        assert_eq!((image.width(), image.height()), (72, 72));
        assert!(is_red(image.to_rgba8().get_pixel(36, 26)));
    }

    #[test]
    fn missing_icon_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let assets = Assets::new(dir.path());
        let style = key_style(2, KeyState::Flag(false));
        match render_key_image(&assets, &style, (72, 72)) {
            Err(Error::Image { path, .. }) => assert!(path.ends_with("70_off.png")),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_font_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        solid(8, 8, [0, 0, 0])
            .save(dir.path().join("null.png"))
            .unwrap();
        let assets = Assets::new(dir.path());
        let style = key_style(12, KeyState::Value(7));
        assert!(matches!(
            render_key_image(&assets, &style, (72, 72)),
            Err(Error::Io(_))
        ));
    }
}
