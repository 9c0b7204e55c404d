use super::*;

#[test]
fn upscale_constant_image_stays_constant() {
    let src = SourceImage::solid(2, [10, 20, 30, 40]);
    let out = upscale_bilinear(&src, 8).unwrap();
    assert_eq!((out.width, out.height), (8, 8));
    assert!(out.rgba8.chunks_exact(4).all(|px| px == [10, 20, 30, 40]));
}

#[test]
fn upscale_makes_non_square_sources_square() {
    let src = SourceImage::from_rgba8(4, 2, vec![50; 32]).unwrap();
    let out = upscale_bilinear(&src, 16).unwrap();
    assert_eq!((out.width, out.height), (16, 16));
    assert_eq!(out.rgba8.len(), 16 * 16 * 4);
}

#[test]
fn upscale_interpolates_between_texels() {
    let src = SourceImage::from_rgba8(
        2,
        1,
        vec![
            0, 0, 0, 255, //
            200, 0, 0, 255,
        ],
    )
    .unwrap();
    let out = upscale_bilinear(&src, 4).unwrap();
    let row: Vec<u8> = (0..4).map(|x| out.pixel(x, 0)[0]).collect();
    assert_eq!(row[0], 0);
    assert_eq!(row[3], 200);
    assert!(row[1] > 0 && row[1] < row[2] && row[2] < 200, "{row:?}");
}

#[test]
fn upscale_rejects_zero_side() {
    let src = SourceImage::solid(2, [0; 4]);
    assert!(upscale_bilinear(&src, 0).is_err());
}
