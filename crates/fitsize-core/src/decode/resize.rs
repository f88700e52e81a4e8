//! Downscaling to a maximum edge length.

use image::DynamicImage;

use super::FilterType;

/// Resize an image so its longest edge is at most `max_edge`, preserving the
/// aspect ratio. Images that already fit are returned unchanged; nothing is
/// ever upscaled. A `max_edge` of zero leaves the image untouched.
pub fn resize_to_fit(image: DynamicImage, max_edge: u32, filter: FilterType) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if max_edge == 0 || (width <= max_edge && height <= max_edge) {
        return image;
    }

    let (new_width, new_height) = fit_dimensions(width, height, max_edge);
    image.resize_exact(new_width, new_height, filter.to_image_filter())
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
pub fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        // Landscape or square: constrain by width
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}
