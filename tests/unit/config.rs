use super::*;

#[test]
fn defaults_fill_missing_fields() {
    let opts = PathOpts::from_json("{}").unwrap();
    assert_eq!(opts, PathOpts::default());
    assert_eq!(opts.tolerance, SFixed(4));
}

#[test]
fn fields_are_parsed() {
    let opts =
        PathOpts::from_json(r#"{"tolerance": 8, "cap_style": "butt", "max_curve_segments": 16}"#)
            .unwrap();
    assert_eq!(opts.tolerance, SFixed(8));
    assert_eq!(opts.cap_style, CapStyle::Butt);
    assert_eq!(opts.max_curve_segments, 16);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(
        PathOpts::from_json(r#"{"tolerance": 0}"#),
        Err(PaintError::Validation(_))
    ));
    assert!(matches!(
        PathOpts::from_json(r#"{"max_curve_segments": 0}"#),
        Err(PaintError::Validation(_))
    ));
    assert!(PathOpts::from_json(r#"{"bogus": 1}"#).is_err());
    assert!(PathOpts::from_json("not json").is_err());
}
