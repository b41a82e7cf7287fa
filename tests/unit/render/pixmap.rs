use super::*;
use std::cell::RefCell;

#[test]
fn descriptors_are_validated() {
    let mut buf = vec![0u8; 16];
    assert!(Pixmap::new(Format::Argb32, 2, 2, 8, &mut buf).is_ok());
    assert!(matches!(
        Pixmap::new(Format::Argb32, 2, 2, 4, &mut buf),
        Err(PaintError::Validation(_))
    ));
    assert!(matches!(
        Pixmap::new(Format::Argb32, 2, 3, 8, &mut buf),
        Err(PaintError::Validation(_))
    ));
    assert!(Pixmap::new(Format::A8, 0, 0, 0, &mut []).is_ok());
}

#[test]
fn typed_pixels_round_trip() {
    let mut buf = vec![0u8; 2 * 2 * 2];
    let mut pm = Pixmap::packed(Format::Rgb16, 2, 2, &mut buf).unwrap();
    assert!(pm.set_pixel(1, 1, Pixel::Rgb16(0x07e0)).unwrap());
    assert_eq!(pm.pixel(1, 1), Some(Pixel::Rgb16(0x07e0)));
    assert_eq!(pm.pixel(2, 0), None);
    assert!(pm.set_pixel(0, 0, Pixel::A8(1)).is_err());
}

#[test]
fn writes_outside_clip_are_ignored() {
    let mut buf = vec![0u8; 4];
    let mut pm = Pixmap::packed(Format::A8, 2, 2, &mut buf).unwrap();
    pm.clip_to(Rect::new(0, 0, 1, 1));
    assert!(!pm.set_pixel(1, 1, Pixel::A8(9)).unwrap());
    assert!(pm.set_pixel(0, 0, Pixel::A8(9)).unwrap());
    assert_eq!(pm.pixel(1, 1), Some(Pixel::A8(0)));
}

#[test]
fn clip_is_relative_to_origin_and_intersects() {
    let mut buf = vec![0u8; 100];
    let mut pm = Pixmap::packed(Format::A8, 10, 10, &mut buf).unwrap();
    pm.set_origin(2, 3);
    pm.clip_to(Rect::new(0, 0, 4, 4));
    assert_eq!(pm.clip(), Rect::new(2, 3, 6, 7));
    let saved = pm.current_clip();

    pm.clip_to(Rect::new(2, 2, 20, 20));
    assert_eq!(pm.clip(), Rect::new(4, 5, 6, 7));

    pm.restore_clip(saved);
    assert_eq!(pm.clip(), Rect::new(2, 3, 6, 7));

    pm.restore_clip(Rect::new(-5, -5, 50, 50));
    assert_eq!(pm.clip(), pm.bounds());

    pm.clip_to(Rect::new(100, 100, 200, 200));
    assert!(pm.clip().is_empty());
    pm.reset_clip();
    assert_eq!(pm.clip(), Rect::new(0, 0, 10, 10));
}

#[test]
fn origin_can_follow_clip() {
    let mut buf = vec![0u8; 16];
    let mut pm = Pixmap::packed(Format::A8, 4, 4, &mut buf).unwrap();
    pm.clip_to(Rect::new(1, 2, 3, 4));
    pm.origin_to_clip();
    assert_eq!(pm.origin(), (1, 2));
}

#[test]
fn transparency_by_format() {
    let mut buf = 0x0012_3456u32.to_ne_bytes().to_vec();
    let pm = Pixmap::packed(Format::Argb32, 1, 1, &mut buf).unwrap();
    assert!(pm.is_transparent(0, 0));
    assert!(pm.is_transparent(5, 5));

    let mut buf = vec![0u8; 2];
    let pm = Pixmap::packed(Format::Rgb16, 1, 1, &mut buf).unwrap();
    assert!(!pm.is_transparent(0, 0));
}

#[test]
fn damage_hook_sees_non_empty_rects() {
    let seen = RefCell::new(Vec::new());
    let mut buf = vec![0u8; 4];
    let mut pm = Pixmap::packed(Format::A8, 2, 2, &mut buf)
        .unwrap()
        .with_damage_hook(|r| seen.borrow_mut().push(r));
    pm.damage(Rect::new(0, 0, 1, 1));
    pm.damage(Rect::empty());
    drop(pm);
    assert_eq!(seen.into_inner(), vec![Rect::new(0, 0, 1, 1)]);
}

#[test]
fn pixel_widening() {
    assert_eq!(Pixel::A8(0x80).to_argb32(), 0x8000_0000);
    assert_eq!(Pixel::Rgb16(0xffff).to_argb32(), 0xffff_ffff);
    assert_eq!(Pixel::from_argb32(Format::A8, 0x8012_3456), Pixel::A8(0x80));
    assert_eq!(Pixel::from_argb32(Format::Rgb16, 0xffff_0000), Pixel::Rgb16(0xf800));
}

#[test]
fn operand_indices() {
    let mut buf = vec![0u8; 2];
    let mut pm = Pixmap::packed(Format::Rgb16, 1, 1, &mut buf).unwrap();
    assert!(!Operand::Pixmap(&pm).is_transformed());
    assert_eq!(Operand::Pixmap(&pm).index(), 1);
    assert_eq!(Operand::Pixmap(&pm).xindex(), 2);
    pm.set_transform(Matrix::scaling(
        crate::foundation::fixed::Fixed::from_int(2),
        crate::foundation::fixed::Fixed::ONE,
    ));
    assert!(Operand::Pixmap(&pm).is_transformed());
    assert_eq!(Operand::Solid(0).index(), SOLID_INDEX);
}
