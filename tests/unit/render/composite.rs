use super::*;
use crate::foundation::fixed::Fixed;
use crate::geometry::matrix::Matrix;
use crate::render::pixmap::Pixel;
use std::cell::RefCell;

fn argb_buf(px: &[u32]) -> Vec<u8> {
    px.iter().flat_map(|p| p.to_ne_bytes()).collect()
}

fn argb(pm: &Pixmap<'_>, x: i32, y: i32) -> u32 {
    match pm.pixel(x, y) {
        Some(Pixel::Argb32(v)) => v,
        other => panic!("unexpected pixel {other:?}"),
    }
}

#[test]
fn opaque_over_hits_only_the_requested_pixel() {
    let damage = RefCell::new(Vec::new());
    let mut buf = argb_buf(&[0x8011_2233; 4]);
    let mut dst = Pixmap::packed(Format::Argb32, 2, 2, &mut buf)
        .unwrap()
        .with_damage_hook(|r| damage.borrow_mut().push(r));
    composite(&mut dst, &Composite::new(Operand::Solid(0xffff_0000), 1, 1)).unwrap();

    assert_eq!(argb(&dst, 0, 0), 0xffff_0000);
    assert_eq!(argb(&dst, 1, 0), 0x8011_2233);
    assert_eq!(argb(&dst, 0, 1), 0x8011_2233);
    assert_eq!(argb(&dst, 1, 1), 0x8011_2233);
    drop(dst);
    assert_eq!(damage.into_inner(), vec![Rect::new(0, 0, 1, 1)]);
}

#[test]
fn source_operator_ignores_destination() {
    let mut buf = argb_buf(&[0xffff_ffff; 2]);
    let mut dst = Pixmap::packed(Format::Argb32, 2, 1, &mut buf).unwrap();
    let req = Composite::new(Operand::Solid(0x4010_2030), 2, 1).operator(Operator::Source);
    composite(&mut dst, &req).unwrap();
    assert_eq!(argb(&dst, 0, 0), 0x4010_2030);
    assert_eq!(argb(&dst, 1, 0), 0x4010_2030);
}

#[test]
fn clipped_away_request_is_a_no_op() {
    let damage = RefCell::new(Vec::new());
    let mut buf = argb_buf(&[0x1234_5678; 4]);
    let before = buf.clone();
    let mut dst = Pixmap::packed(Format::Argb32, 2, 2, &mut buf)
        .unwrap()
        .with_damage_hook(|r| damage.borrow_mut().push(r));
    let req = Composite::new(Operand::Solid(0xffff_ffff), 2, 2).at(5, 5);
    composite(&mut dst, &req).unwrap();
    drop(dst);
    assert_eq!(buf, before);
    assert!(damage.into_inner().is_empty());
}

#[test]
fn pixmap_source_is_offset() {
    let mut src_buf = argb_buf(&[0xff00_0001, 0xff00_0002, 0xff00_0003, 0xff00_0004]);
    let src = Pixmap::packed(Format::Argb32, 2, 2, &mut src_buf).unwrap();
    let mut buf = argb_buf(&[0; 9]);
    let mut dst = Pixmap::packed(Format::Argb32, 3, 3, &mut buf).unwrap();
    let req = Composite::new(Operand::Pixmap(&src), 1, 2).at(2, 1).src_offset(1, 0);
    composite(&mut dst, &req).unwrap();
    assert_eq!(argb(&dst, 2, 1), 0xff00_0002);
    assert_eq!(argb(&dst, 2, 2), 0xff00_0004);
    assert_eq!(argb(&dst, 1, 1), 0);
}

#[test]
fn reads_outside_source_clip_are_transparent() {
    let mut src_buf = argb_buf(&[0xffff_ffff; 4]);
    let mut src = Pixmap::packed(Format::Argb32, 2, 2, &mut src_buf).unwrap();
    src.clip_to(Rect::new(0, 0, 1, 2));
    let mut buf = argb_buf(&[0x1111_1111; 4]);
    let mut dst = Pixmap::packed(Format::Argb32, 2, 2, &mut buf).unwrap();
    let req = Composite::new(Operand::Pixmap(&src), 2, 2).operator(Operator::Source);
    composite(&mut dst, &req).unwrap();
    assert_eq!(argb(&dst, 0, 0), 0xffff_ffff);
    assert_eq!(argb(&dst, 1, 0), 0);
    assert_eq!(argb(&dst, 1, 1), 0);
}

#[test]
fn rgb16_reads_outside_source_clip_are_transparent() {
    let mut src_buf: Vec<u8> = [0xf800u16; 4].iter().flat_map(|p| p.to_ne_bytes()).collect();
    let mut src = Pixmap::packed(Format::Rgb16, 2, 2, &mut src_buf).unwrap();
    src.clip_to(Rect::new(0, 0, 1, 2));
    let mut buf = argb_buf(&[0x8011_2233; 4]);
    let mut dst = Pixmap::packed(Format::Argb32, 2, 2, &mut buf).unwrap();
    composite(&mut dst, &Composite::new(Operand::Pixmap(&src), 2, 2)).unwrap();
    assert_eq!(argb(&dst, 0, 0), 0xffff_0000);
    assert_eq!(argb(&dst, 0, 1), 0xffff_0000);
    assert_eq!(argb(&dst, 1, 0), 0x8011_2233);
    assert_eq!(argb(&dst, 1, 1), 0x8011_2233);
}

#[test]
fn rgb16_mask_outside_its_clip_blocks_source() {
    let mut msk_buf: Vec<u8> = [0xffffu16; 2].iter().flat_map(|p| p.to_ne_bytes()).collect();
    let mut msk = Pixmap::packed(Format::Rgb16, 2, 1, &mut msk_buf).unwrap();
    msk.clip_to(Rect::new(1, 0, 2, 1));
    let mut buf = argb_buf(&[0; 2]);
    let mut dst = Pixmap::packed(Format::Argb32, 2, 1, &mut buf).unwrap();
    let req = Composite::new(Operand::Solid(0xff00_ff00), 2, 1).mask(Operand::Pixmap(&msk), 0, 0);
    composite(&mut dst, &req).unwrap();
    assert_eq!(argb(&dst, 0, 0), 0);
    assert_eq!(argb(&dst, 1, 0), 0xff00_ff00);
}

#[test]
fn far_source_offset_reads_nothing() {
    let mut src_buf = argb_buf(&[0xffff_ffff; 4]);
    let src = Pixmap::packed(Format::Argb32, 2, 2, &mut src_buf).unwrap();
    let mut buf = argb_buf(&[0x1111_1111; 4]);
    let mut dst = Pixmap::packed(Format::Argb32, 2, 2, &mut buf).unwrap();
    let req = Composite::new(Operand::Pixmap(&src), 2, 2)
        .src_offset(i32::MAX - 1, i32::MIN)
        .operator(Operator::Source);
    composite(&mut dst, &req).unwrap();
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        assert_eq!(argb(&dst, x, y), 0);
    }
}

#[test]
fn a8_mask_attenuates_solid() {
    let mut msk_buf = vec![0xff, 0x80];
    let msk = Pixmap::packed(Format::A8, 2, 1, &mut msk_buf).unwrap();
    let mut buf = argb_buf(&[0; 2]);
    let mut dst = Pixmap::packed(Format::Argb32, 2, 1, &mut buf).unwrap();
    let req = Composite::new(Operand::Solid(0xffff_ffff), 2, 1).mask(Operand::Pixmap(&msk), 0, 0);
    composite(&mut dst, &req).unwrap();
    assert_eq!(argb(&dst, 0, 0), 0xffff_ffff);
    assert_eq!(argb(&dst, 1, 0), 0x8080_8080);
}

#[test]
fn transformed_source_is_resampled() {
    let mut src_buf = vec![0u8, 200];
    let mut src = Pixmap::packed(Format::A8, 2, 1, &mut src_buf).unwrap();
    src.set_transform(Matrix::scaling(Fixed::HALF, Fixed::HALF));
    let mut buf = vec![0u8; 3];
    let mut dst = Pixmap::packed(Format::A8, 3, 1, &mut buf).unwrap();
    let req = Composite::new(Operand::Pixmap(&src), 3, 1).operator(Operator::Source);
    composite(&mut dst, &req).unwrap();
    drop(dst);
    assert_eq!(buf, vec![0, 100, 200]);
}

#[test]
fn clipping_does_not_shift_resampled_source() {
    let mut src_buf = vec![10u8, 20, 30, 40];
    let mut src = Pixmap::packed(Format::A8, 4, 1, &mut src_buf).unwrap();
    // non-identity, so the resampling path runs; sampled rows still land on whole pixels
    src.set_transform(Matrix::scaling(Fixed::ONE, Fixed::HALF));
    let mut buf = vec![0u8; 4];
    let mut dst = Pixmap::packed(Format::A8, 4, 1, &mut buf).unwrap();
    dst.clip_to(Rect::new(2, 0, 4, 1));
    let req = Composite::new(Operand::Pixmap(&src), 4, 1).operator(Operator::Source);
    composite(&mut dst, &req).unwrap();
    drop(dst);
    assert_eq!(buf, vec![0, 0, 30, 40]);
}

#[test]
fn fill_reports_clipped_damage() {
    let damage = RefCell::new(Vec::new());
    let mut buf = vec![0u8; 16];
    let mut dst = Pixmap::packed(Format::A8, 4, 4, &mut buf)
        .unwrap()
        .with_damage_hook(|r| damage.borrow_mut().push(r));
    dst.clip_to(Rect::new(1, 1, 3, 3));
    fill(&mut dst, 0xff00_0000, Operator::Source, Rect::new(0, 0, 2, 4));
    fill(&mut dst, 0xff00_0000, Operator::Source, Rect::new(3, 3, 4, 4));
    drop(dst);
    assert_eq!(damage.into_inner(), vec![Rect::new(1, 1, 2, 3)]);
    let filled: Vec<usize> = buf
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == 0xff)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(filled, vec![5, 9]);
}

#[test]
fn fill_respects_origin() {
    let mut buf = vec![0u8; 4];
    let mut dst = Pixmap::packed(Format::A8, 2, 2, &mut buf).unwrap();
    dst.set_origin(1, 1);
    fill(&mut dst, 0xff00_0000, Operator::Over, Rect::new(0, 0, 1, 1));
    drop(dst);
    assert_eq!(buf, vec![0, 0, 0, 0xff]);
}

#[test]
fn fill_of_the_widest_rect_covers_the_clip() {
    let mut buf = vec![0u8; 4];
    let mut dst = Pixmap::packed(Format::A8, 2, 2, &mut buf).unwrap();
    fill(&mut dst, 0xff00_0000, Operator::Source, Rect::new(i32::MIN, 0, i32::MAX, 1));
    drop(dst);
    assert_eq!(buf, vec![0xff, 0xff, 0, 0]);
}

#[test]
fn unclipped_fill_covers_everything() {
    let damage = RefCell::new(Vec::new());
    let mut buf = vec![0u8; 4];
    let mut dst = Pixmap::packed(Format::A8, 2, 2, &mut buf)
        .unwrap()
        .with_damage_hook(|r| damage.borrow_mut().push(r));
    dst.clip_to(Rect::new(0, 0, 1, 1));
    fill_unclipped(&mut dst, 0x4000_0000, Operator::Source, Rect::new(0, 0, 1, 1));
    drop(dst);
    assert_eq!(buf, vec![0x40; 4]);
    assert_eq!(damage.into_inner(), vec![Rect::new(0, 0, 2, 2)]);
}

#[test]
fn rgb16_destination_is_repacked() {
    let mut buf = vec![0u8; 2];
    let mut dst = Pixmap::packed(Format::Rgb16, 1, 1, &mut buf).unwrap();
    fill(&mut dst, 0xff00_ff00, Operator::Over, Rect::new(0, 0, 1, 1));
    assert_eq!(dst.pixel(0, 0), Some(Pixel::Rgb16(0x07e0)));
}

#[test]
fn premultiply_scales_colour_once() {
    let mut buf = argb_buf(&[0x00ff_ffff, 0xff12_3456, 0x80ff_0080]);
    let mut pm = Pixmap::packed(Format::Argb32, 3, 1, &mut buf).unwrap();
    premultiply(&mut pm);
    assert_eq!(argb(&pm, 0, 0), 0);
    assert_eq!(argb(&pm, 1, 0), 0xff12_3456);
    assert_eq!(argb(&pm, 2, 0), 0x8080_0040);
    premultiply(&mut pm);
    assert_eq!(argb(&pm, 2, 0), 0x8040_0020);
}

#[test]
fn premultiply_skips_other_formats() {
    let mut buf = vec![0x12u8, 0x34];
    let mut pm = Pixmap::packed(Format::Rgb16, 1, 1, &mut buf).unwrap();
    premultiply(&mut pm);
    drop(pm);
    assert_eq!(buf, vec![0x12, 0x34]);
}
