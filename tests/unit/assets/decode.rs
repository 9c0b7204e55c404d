use std::io::Cursor;

use super::*;

fn encode(img: image::RgbaImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    let dyn_img = match format {
        image::ImageFormat::Jpeg => {
            image::DynamicImage::ImageRgb8(image::DynamicImage::ImageRgba8(img).to_rgb8())
        }
        _ => image::DynamicImage::ImageRgba8(img),
    };
    dyn_img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let src = decode_image(&encode(img, image::ImageFormat::Png)).unwrap();
    assert_eq!(src.width, 1);
    assert_eq!(src.height, 1);
    assert_eq!(src.rgba8.as_slice(), &[100, 50, 200, 128]);
    assert_eq!(src.encoding, SourceEncoding::Lossless);
}

#[test]
fn decode_jpeg_is_flagged_lossy() {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([10, 20, 30, 255]));
    let src = decode_image(&encode(img, image::ImageFormat::Jpeg)).unwrap();
    assert_eq!((src.width, src.height), (8, 8));
    assert_eq!(src.encoding, SourceEncoding::Lossy);
}

#[test]
fn decode_garbage_fails() {
    assert!(decode_image(b"definitely not an image").is_err());
}
