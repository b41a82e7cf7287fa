use super::*;
use crate::foundation::core::Rect;
use crate::foundation::fixed::SFixed;

fn raw(x: i32, y: i32) -> SPoint {
    SPoint::new(SFixed(x), SFixed(y))
}

/// Octagon of radius 2 pixels around the origin.
fn octagon() -> Path {
    let mut pen = Path::new();
    for (x, y) in [
        (32, 0),
        (22, 22),
        (0, 32),
        (-22, 22),
        (-32, 0),
        (-22, -22),
        (0, -32),
        (22, -22),
    ] {
        pen.sdraw(raw(x, y));
    }
    pen
}

fn line(points: &[(i32, i32)]) -> Path {
    let mut p = Path::new();
    for &(x, y) in points {
        p.sdraw(SPoint::from_ints(x, y));
    }
    p
}

fn stroke_with(cap: CapStyle, stroke: &Path, pen: &Path) -> Path {
    let mut dest = Path::new();
    dest.set_cap_style(cap);
    convolve(&mut dest, stroke, pen).unwrap();
    dest
}

fn ints(points: &[SPoint]) -> Vec<(i32, i32)> {
    points.iter().map(|p| (p.x.to_int(), p.y.to_int())).collect()
}

#[test]
fn butt_cap_outline_is_offset_by_radius() {
    let out = stroke_with(CapStyle::Butt, &line(&[(10, 10), (20, 10)]), &octagon());
    assert_eq!(
        ints(out.points()),
        vec![(10, 8), (20, 8), (20, 12), (10, 12), (10, 8)]
    );
    assert_eq!(out.sublen(), &[5]);
}

#[test]
fn projecting_cap_extends_past_the_ends() {
    let out = stroke_with(CapStyle::Projecting, &line(&[(10, 10), (20, 10)]), &octagon());
    assert_eq!(
        ints(out.points()),
        vec![(8, 8), (22, 8), (22, 12), (8, 12), (8, 8)]
    );
}

#[test]
fn round_cap_follows_the_pen() {
    let out = stroke_with(CapStyle::Round, &line(&[(10, 10), (20, 10)]), &octagon());
    assert_eq!(out.len(), 11);
    assert_eq!(out.bounds(), Rect::new(8, 8, 22, 12));
    // straight sections sit exactly one radius from the centre line
    assert_eq!(out.points()[0], SPoint::from_ints(10, 8));
    assert_eq!(out.points()[1], SPoint::from_ints(20, 8));
    assert_eq!(out.points()[5], SPoint::from_ints(20, 12));
    assert_eq!(out.points()[6], SPoint::from_ints(10, 12));
}

#[test]
fn cap_styles_differ() {
    let stroke = line(&[(10, 10), (20, 10)]);
    let pen = octagon();
    let round = stroke_with(CapStyle::Round, &stroke, &pen);
    let butt = stroke_with(CapStyle::Butt, &stroke, &pen);
    let projecting = stroke_with(CapStyle::Projecting, &stroke, &pen);
    assert_ne!(round.points(), butt.points());
    assert_ne!(butt.points(), projecting.points());
    assert_ne!(round.points(), projecting.points());
}

#[test]
fn corner_is_walked_around() {
    let out = stroke_with(
        CapStyle::Butt,
        &line(&[(0, 0), (10, 0), (10, 10)]),
        &octagon(),
    );
    assert_eq!(out.sublen(), &[out.len()]);
    assert_eq!(out.bounds(), Rect::new(0, -2, 12, 10));
    assert!(out.points().contains(&SPoint::from_ints(12, 0)));
}

#[test]
fn short_subpaths_are_skipped() {
    let mut stroke = Path::new();
    stroke.sdraw(SPoint::from_ints(5, 5));
    stroke.finish();
    stroke.sdraw(SPoint::from_ints(0, 0));
    stroke.sdraw(SPoint::from_ints(10, 0));
    stroke.finish();
    stroke.sdraw(SPoint::from_ints(7, 7));

    let out = stroke_with(CapStyle::Butt, &stroke, &octagon());
    assert_eq!(out.subpaths().count(), 1);
    assert_eq!(out.bounds(), Rect::new(0, -2, 10, 2));
}

#[test]
fn subpaths_become_separate_contours() {
    let mut stroke = line(&[(0, 0), (10, 0)]);
    stroke.smove(SPoint::from_ints(0, 20));
    stroke.sdraw(SPoint::from_ints(10, 20));

    let out = stroke_with(CapStyle::Round, &stroke, &octagon());
    assert_eq!(out.sublen().len(), 2);
}

#[test]
fn degenerate_pens() {
    let stroke = line(&[(0, 0), (10, 0)]);
    let out = stroke_with(CapStyle::Round, &stroke, &Path::new());
    assert!(out.is_empty());

    let mut dot = Path::new();
    dot.sdraw(SPoint::default());
    let out = stroke_with(CapStyle::Round, &stroke, &dot);
    assert_eq!(ints(out.points()), vec![(0, 0), (10, 0), (0, 0)]);
}
