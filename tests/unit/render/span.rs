use super::*;

fn argb_row(px: &[u32]) -> Vec<u8> {
    px.iter().flat_map(|p| p.to_ne_bytes()).collect()
}

fn argb_at(row: &[u8], i: usize) -> u32 {
    u32::from_ne_bytes([row[4 * i], row[4 * i + 1], row[4 * i + 2], row[4 * i + 3]])
}

#[test]
fn opaque_over_replaces_destination() {
    assert_eq!(over(0xffff_0000, 0x8011_2233), 0xffff_0000);
    assert_eq!(over(0xff12_3456, 0xffff_ffff), 0xff12_3456);
}

#[test]
fn transparent_over_keeps_destination() {
    assert_eq!(over(0, 0x8011_2233), 0x8011_2233);
}

#[test]
fn over_rounds_to_nearest() {
    // 255 * 127 / 255 = 127 exactly; 0x80 + 127 = 255
    assert_eq!(over(0x8000_0000, 0xffff_ffff), 0xff7f_7f7f);
    // 0x22 * 127 / 255 = 16.93.. -> 17
    assert_eq!(channel(over(0x8000_0000, 0xff22_2222), 0), 17);
}

#[test]
fn in_alpha_scales_all_channels() {
    assert_eq!(in_alpha(0xffff_0000, 128), 0x8080_0000);
    assert_eq!(in_alpha(0xffff_ffff, 0), 0);
    assert_eq!(in_alpha(0x1234_5678, 255), 0x1234_5678);
}

#[test]
fn source_copies_argb_rows() {
    let src = argb_row(&[0x0102_0304, 0xa0b0_c0d0]);
    let mut dst = argb_row(&[0xffff_ffff; 3]);
    COMP2[1][2][2](&mut dst, Span::Row(&src), 2);
    assert_eq!(argb_at(&dst, 0), 0x0102_0304);
    assert_eq!(argb_at(&dst, 1), 0xa0b0_c0d0);
    // only `width` pixels are written
    assert_eq!(argb_at(&dst, 2), 0xffff_ffff);
}

#[test]
fn solid_over_rgb16_packs_colour() {
    let mut dst = vec![0u8; 4];
    COMP2[0][3][1](&mut dst, Span::Solid(0xffff_0000), 2);
    assert_eq!(u16::from_ne_bytes([dst[0], dst[1]]), 0xf800);
    assert_eq!(u16::from_ne_bytes([dst[2], dst[3]]), 0xf800);
}

#[test]
fn a8_source_is_black_with_alpha() {
    let src = [0xffu8, 0x00];
    let mut dst = argb_row(&[0xffff_ffff, 0xffff_ffff]);
    COMP2[0][0][2](&mut dst, Span::Row(&src), 2);
    assert_eq!(argb_at(&dst, 0), 0xff00_0000);
    assert_eq!(argb_at(&dst, 1), 0xffff_ffff);
}

#[test]
fn solid_into_a8_keeps_alpha() {
    let mut dst = [0x10u8, 0x10];
    COMP2[1][3][0](&mut dst, Span::Solid(0x7f00_0000), 2);
    assert_eq!(dst, [0x7f, 0x7f]);
}

#[test]
fn mask_attenuates_source() {
    let msk = [0x80u8, 0x00, 0xff];
    let mut dst = argb_row(&[0x1111_1111; 3]);
    COMP3[1][3][0][2](&mut dst, Span::Solid(0xffff_ffff), Span::Row(&msk), 3);
    assert_eq!(argb_at(&dst, 0), 0x8080_8080);
    assert_eq!(argb_at(&dst, 1), 0);
    assert_eq!(argb_at(&dst, 2), 0xffff_ffff);
}

#[test]
fn masked_over_blends_with_destination() {
    let msk = [0x00u8];
    let mut dst = argb_row(&[0x8011_2233]);
    COMP3[0][3][0][2](&mut dst, Span::Solid(0xffff_0000), Span::Row(&msk), 1);
    assert_eq!(argb_at(&dst, 0), 0x8011_2233);
}
