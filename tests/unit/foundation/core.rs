use super::*;

#[test]
fn rect_intersection_and_emptiness() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(5, -5, 20, 3);
    assert_eq!(a.intersect(b), Rect::new(5, 0, 10, 3));
    assert!(a.intersect(Rect::new(10, 0, 20, 10)).is_empty());
    assert_eq!(Rect::new(4, 4, 2, 9).width(), 0);
}

#[test]
fn rect_union_ignores_empty() {
    let a = Rect::new(1, 1, 3, 3);
    assert_eq!(a.union(Rect::empty()), a);
    assert_eq!(Rect::empty().union(a), a);
    assert_eq!(a.union(Rect::new(5, 0, 6, 2)), Rect::new(1, 0, 6, 3));
}

#[test]
fn rect_contains_is_half_open() {
    let r = Rect::new(0, 0, 2, 2);
    assert!(r.contains(0, 0));
    assert!(r.contains(1, 1));
    assert!(!r.contains(2, 1));
    assert!(!r.contains(1, 2));
}

#[test]
fn extreme_rects_saturate() {
    let wide = Rect::new(i32::MIN, 0, i32::MAX, 1);
    assert_eq!(wide.width(), i32::MAX);
    assert_eq!(wide.height(), 1);
    assert_eq!(
        Rect::new(0, 0, 4, 4).translate(i32::MAX - 1, i32::MIN),
        Rect::new(i32::MAX - 1, i32::MIN, i32::MAX, i32::MIN)
    );
}

#[test]
fn format_sizes() {
    assert_eq!(Format::A8.bytes_per_pixel(), 1);
    assert_eq!(Format::Rgb16.bytes_per_pixel(), 2);
    assert_eq!(Format::Argb32.bytes_per_pixel(), 4);
}

#[test]
fn enums_use_snake_case_names() {
    assert_eq!(serde_json::to_string(&Format::Argb32).unwrap(), "\"argb32\"");
    assert_eq!(serde_json::to_string(&Operator::Source).unwrap(), "\"source\"");
}
