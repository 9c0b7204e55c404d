use super::*;

#[test]
fn size_tiers_cover_128_through_8192() {
    let sides: Vec<u32> = (0..SizeTier::TIERS)
        .map(|i| SizeTier::new(i).unwrap().side())
        .collect();
    assert_eq!(sides, vec![128, 256, 512, 1024, 2048, 4096, 8192]);
    assert_eq!(SizeTier::default().side(), 2048);
    assert!(SizeTier::new(7).is_err());
}

#[test]
fn size_tier_from_side_roundtrips() {
    assert_eq!(SizeTier::from_side(512).unwrap().index(), 2);
    assert!(SizeTier::from_side(300).is_err());
    assert!(SizeTier::from_side(64).is_err());
}

#[test]
fn size_tier_serde_rejects_out_of_range() {
    let t: SizeTier = serde_json::from_str("3").unwrap();
    assert_eq!(t.side(), 1024);
    assert!(serde_json::from_str::<SizeTier>("9").is_err());
    assert_eq!(serde_json::to_string(&t).unwrap(), "3");
}

#[test]
fn unit_to_u8_rounds_to_nearest_and_clamps() {
    assert_eq!(unit_to_u8(0.0), 0);
    assert_eq!(unit_to_u8(1.0), 255);
    assert_eq!(unit_to_u8(128.0 / 255.0), 128);
    assert_eq!(unit_to_u8(0.6 / 255.0), 1);
    assert_eq!(unit_to_u8(-0.5), 0);
    assert_eq!(unit_to_u8(2.0), 255);
}

#[test]
fn mip_level_requires_exact_power_of_two_ratio() {
    assert_eq!(mip_level_for(128, 128), Some(0));
    assert_eq!(mip_level_for(256, 128), Some(1));
    assert_eq!(mip_level_for(1024, 128), Some(3));
    assert_eq!(mip_level_for(64, 128), None);
    assert_eq!(mip_level_for(384, 128), None);
    assert_eq!(mip_level_for(128, 0), None);
}
