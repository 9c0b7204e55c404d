use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PackError::SizeMismatch {
            expected: 16,
            actual: 4
        }
        .to_string()
        .contains("size mismatch:")
    );
    assert!(
        PackError::AspectRatio {
            width: 4,
            height: 2
        }
        .to_string()
        .contains("aspect ratio error:")
    );
    assert!(
        PackError::NotPowerOfTwo { side: 300 }
            .to_string()
            .contains("not a power of two:")
    );
    assert!(
        PackError::DegenerateWeights
            .to_string()
            .contains("degenerate weights:")
    );
    assert!(
        PackError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PackError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PackError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
