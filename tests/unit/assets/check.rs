use super::*;

struct FakeTexture {
    readable: bool,
    uncompressed: bool,
    size: (u32, u32),
}

impl SourceCapabilities for FakeTexture {
    fn is_readable(&self) -> bool {
        self.readable
    }

    fn is_uncompressed(&self) -> bool {
        self.uncompressed
    }

    fn side_length(&self) -> (u32, u32) {
        self.size
    }
}

#[test]
fn conforming_source_has_no_issues() {
    let src = SourceImage::solid(256, [0, 0, 0, 255]);
    assert!(check_source(&src, 128).is_empty());
    assert!(check_source(&src, 256).is_empty());
}

#[test]
fn reports_every_host_side_problem() {
    let tex = FakeTexture {
        readable: false,
        uncompressed: false,
        size: (64, 64),
    };
    assert_eq!(
        check_source(&tex, 128),
        vec![
            SourceIssue::NotReadable,
            SourceIssue::Compressed,
            SourceIssue::TooSmall {
                side: 64,
                required: 128
            },
        ]
    );
}

#[test]
fn reports_shape_problems() {
    let wide = FakeTexture {
        readable: true,
        uncompressed: true,
        size: (512, 256),
    };
    assert_eq!(
        check_source(&wide, 256),
        vec![SourceIssue::NotSquare {
            width: 512,
            height: 256
        }]
    );

    let odd = FakeTexture {
        readable: true,
        uncompressed: true,
        size: (300, 300),
    };
    assert_eq!(
        check_source(&odd, 128),
        vec![SourceIssue::NotPowerOfTwo { side: 300 }]
    );
}

#[test]
fn lossy_sources_are_flagged_compressed() {
    let src = SourceImage::solid(128, [1, 2, 3, 4]).with_encoding(SourceEncoding::Lossy);
    assert_eq!(check_source(&src, 128), vec![SourceIssue::Compressed]);
    assert!(!SourceIssue::Compressed.fixable_by_upscale());
    assert!(
        SourceIssue::TooSmall {
            side: 1,
            required: 2
        }
        .fixable_by_upscale()
    );
}
