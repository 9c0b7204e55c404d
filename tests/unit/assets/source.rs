use super::*;

fn checker_4x4() -> SourceImage {
    let mut px = Vec::new();
    for y in 0..4u8 {
        for x in 0..4u8 {
            px.extend_from_slice(&[x * 60, y * 60, (x + y) * 20, 255]);
        }
    }
    SourceImage::from_rgba8(4, 4, px).unwrap()
}

#[test]
fn from_rgba8_rejects_wrong_length() {
    assert!(SourceImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(SourceImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn level_zero_is_normalized_source() {
    let img = checker_4x4();
    let mip = img.mip_level(0).unwrap();
    assert_eq!(mip.side, 4);
    assert_eq!(mip.texels.len(), 16);
    let [r, g, b, a] = mip.texels[6];
    assert!((r - 120.0 / 255.0).abs() < 1e-6);
    assert!((g - 60.0 / 255.0).abs() < 1e-6);
    assert!((b - 60.0 / 255.0).abs() < 1e-6);
    assert!((a - 1.0).abs() < 1e-6);
}

#[test]
fn level_one_matches_2x2_box_average() {
    let img = checker_4x4();
    let mip = img.mip_level(1).unwrap();
    assert_eq!(mip.side, 2);
    for oy in 0..2u32 {
        for ox in 0..2u32 {
            let mut expect = [0f32; 4];
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                let p = img.pixel(ox * 2 + dx, oy * 2 + dy);
                for c in 0..4 {
                    expect[c] += f32::from(p[c]) / 255.0 / 4.0;
                }
            }
            let got = mip.texels[(oy * 2 + ox) as usize];
            for c in 0..4 {
                assert!((got[c] - expect[c]).abs() < 1e-5, "({ox},{oy}) c{c}");
            }
        }
    }
}

#[test]
fn box_filter_is_not_nearest_neighbor() {
    let img = SourceImage::from_rgba8(
        2,
        2,
        vec![
            255, 0, 0, 255, 0, 0, 0, 255, //
            0, 0, 0, 255, 0, 0, 0, 255,
        ],
    )
    .unwrap();
    let mip = img.mip_level(1).unwrap();
    assert_eq!(mip.texels.len(), 1);
    assert!((mip.texels[0][0] - 0.25).abs() < 1e-6);
}

#[test]
fn mip_level_rejects_non_square_and_overflowing_levels() {
    let wide = SourceImage::from_rgba8(4, 2, vec![0; 32]).unwrap();
    assert!(matches!(
        wide.mip_level(0),
        Err(PackError::AspectRatio {
            width: 4,
            height: 2
        })
    ));
    assert!(checker_4x4().mip_level(3).is_err());
}

#[test]
fn check_buffer_catches_hand_built_images() {
    let img = SourceImage {
        width: 4,
        height: 4,
        rgba8: Arc::new(vec![0; 8]),
        encoding: SourceEncoding::Lossless,
    };
    assert!(img.check_buffer().is_err());
    assert!(img.mip_level(0).is_err());
    assert!(checker_4x4().check_buffer().is_ok());
}

#[test]
#[should_panic]
fn pixel_outside_image_panics() {
    checker_4x4().pixel(0, 4);
}
