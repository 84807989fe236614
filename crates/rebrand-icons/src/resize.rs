//! Resampling to target icon sizes.

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::{Error, Result};

/// Resizes to exactly `width`×`height`, ignoring aspect ratio.
pub fn resize_exact(image: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage> {
    check_size(width, height)?;
    Ok(imageops::resize(image, width, height, FilterType::Lanczos3))
}

/// Fits the image inside `width`×`height` and centres it on a transparent
/// canvas of exactly that size. Never upscales.
pub fn fit_centered(image: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage> {
    check_size(width, height)?;
    let (src_w, src_h) = image.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(Error::validation("source image is empty"));
    }

    let scale = f64::min(
        1.0,
        f64::min(
            f64::from(width) / f64::from(src_w),
            f64::from(height) / f64::from(src_h),
        ),
    );
    let fit_w = scaled(src_w, scale, width);
    let fit_h = scaled(src_h, scale, height);

    let inner = if (fit_w, fit_h) == (src_w, src_h) {
        image.clone()
    } else {
        imageops::resize(image, fit_w, fit_h, FilterType::Lanczos3)
    };

    let mut canvas = RgbaImage::new(width, height);
    let x = i64::from((width - fit_w) / 2);
    let y = i64::from((height - fit_h) / 2);
    imageops::replace(&mut canvas, &inner, x, y);
    Ok(canvas)
}

fn scaled(len: u32, scale: f64, max: u32) -> u32 {
    let v = (f64::from(len) * scale).round() as u32;
    v.clamp(1, max)
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::validation(format!(
            "target size must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_resize_exact_dimensions() {
        let img = RgbaImage::from_pixel(64, 32, RED);
        let out = resize_exact(&img, 70, 70).unwrap();
        assert_eq!(out.dimensions(), (70, 70));
        assert_eq!(out.get_pixel(35, 35), &RED);
    }

    #[test]
    fn test_resize_rejects_zero() {
        let img = RgbaImage::from_pixel(4, 4, RED);
        assert!(resize_exact(&img, 0, 4).is_err());
        assert!(fit_centered(&img, 4, 0).is_err());
    }

    #[test]
    fn test_fit_centered_wide_source() {
        let img = RgbaImage::from_pixel(200, 100, RED);
        let out = fit_centered(&img, 100, 100).unwrap();

        assert_eq!(out.dimensions(), (100, 100));
        // 100x50 band centred vertically
        assert_eq!(out.get_pixel(50, 50), &RED);
        assert_eq!(out.get_pixel(50, 10)[3], 0);
        assert_eq!(out.get_pixel(50, 90)[3], 0);
    }

    #[test]
    fn test_fit_centered_never_upscales() {
        let img = RgbaImage::from_pixel(10, 10, RED);
        let out = fit_centered(&img, 128, 128).unwrap();

        assert_eq!(out.dimensions(), (128, 128));
        assert_eq!(out.get_pixel(64, 64), &RED);
        assert_eq!(out.get_pixel(60, 60), &RED);
        assert_eq!(out.get_pixel(58, 58)[3], 0);
        assert_eq!(out.get_pixel(69, 69)[3], 0);
    }
}
