use rail_alignment::alignment::HorizontalAlignment;
use rail_alignment::error::AlignmentError;
use rail_alignment::geometry::Point;
use rail_alignment::horizontal::{HorizontalSegment, HorizontalSegmentType};

#[test]
fn clothoid_geometry() {
    let spiral = HorizontalSegment::new(
        Point::new(0.0, 0.0),
        0.0,
        50.0,
        f64::INFINITY,
        100.0,
        HorizontalSegmentType::Clothoid,
    );
    let end = spiral.end_point();
    assert!((end.x - 49.6884029).abs() < 1e-6);
    assert!((end.y - 4.1481024).abs() < 1e-6);
    let dir = spiral.direction_at(50.0).unwrap();
    assert!((dir.0 - 0.9689124).abs() < 1e-6);
    assert!((dir.1 - 0.2474039).abs() < 1e-6);
}

#[test]
fn clothoid_between_two_radii() {
    // Curvature ramps linearly, so the end heading is the mean curvature
    // times the length.
    let spiral = HorizontalSegment::new(
        Point::new(0.0, 0.0),
        0.0,
        100.0,
        1000.0,
        300.0,
        HorizontalSegmentType::Clothoid,
    );
    let expected = 0.5 * (1.0 / 1000.0 + 1.0 / 300.0) * 100.0;
    assert!((spiral.end_direction() - expected).abs() < 1e-12);
}

#[test]
fn transition_profiles_share_total_heading_change() {
    // Every symmetric profile integrates to half the curvature change, so
    // the end heading is the same for all of them.
    let kinds = [
        HorizontalSegmentType::Clothoid,
        HorizontalSegmentType::HelmertCurve,
        HorizontalSegmentType::BlossCurve,
        HorizontalSegmentType::CosineCurve,
        HorizontalSegmentType::SineCurve,
        HorizontalSegmentType::VienneseBend,
    ];
    let expected = 0.5 * (1.0 / 300.0) * 100.0;
    for kind in kinds {
        let seg = HorizontalSegment::new(
            Point::new(0.0, 0.0),
            0.0,
            100.0,
            f64::INFINITY,
            300.0,
            kind,
        );
        assert!((seg.end_direction() - expected).abs() < 1e-12, "{kind:?}");
    }
}

#[test]
fn transition_positions_stay_near_the_clothoid() {
    // Over the same radii and length the profiles land within a meter of
    // the clothoid end point, and all of them lag it laterally since their
    // curvature build-up starts slower than the linear ramp.
    let clothoid = HorizontalSegment::new(
        Point::new(0.0, 0.0),
        0.0,
        100.0,
        f64::INFINITY,
        300.0,
        HorizontalSegmentType::Clothoid,
    );
    let reference = clothoid.end_point();
    for kind in [
        HorizontalSegmentType::HelmertCurve,
        HorizontalSegmentType::BlossCurve,
        HorizontalSegmentType::CosineCurve,
        HorizontalSegmentType::SineCurve,
        HorizontalSegmentType::VienneseBend,
    ] {
        let seg = HorizontalSegment::new(
            Point::new(0.0, 0.0),
            0.0,
            100.0,
            f64::INFINITY,
            300.0,
            kind,
        );
        let end = seg.end_point();
        let dx = end.x - reference.x;
        let dy = end.y - reference.y;
        assert!((dx * dx + dy * dy).sqrt() < 1.5, "{kind:?}");
        assert!(end.y < reference.y, "{kind:?}");
    }
}

#[test]
fn chained_segments_are_continuous() {
    // Tangent, entry clothoid and circular arc chained by construction:
    // the global end of each segment must equal the start of the next.
    let tangent = HorizontalSegment::new(
        Point::new(0.0, 0.0),
        0.0,
        100.0,
        f64::INFINITY,
        f64::INFINITY,
        HorizontalSegmentType::Line,
    );
    let clothoid = HorizontalSegment::new(
        tangent.end_point(),
        tangent.end_direction(),
        60.0,
        f64::INFINITY,
        300.0,
        HorizontalSegmentType::Clothoid,
    );
    let arc = HorizontalSegment::new(
        clothoid.end_point(),
        clothoid.end_direction(),
        120.0,
        300.0,
        300.0,
        HorizontalSegmentType::CircularArc,
    );
    let alignment = HorizontalAlignment::new(vec![tangent, clothoid, arc]).unwrap();
    assert!((alignment.length() - 280.0).abs() < 1e-12);

    for boundary in [100.0, 160.0] {
        let before = alignment.point_at(boundary - 1e-9).unwrap();
        let after = alignment.point_at(boundary + 1e-9).unwrap();
        let gap = ((after.x - before.x).powi(2) + (after.y - before.y).powi(2)).sqrt();
        assert!(gap < 1e-6, "gap {gap} at station {boundary}");
    }

    // Curvature ramps from zero to 1/300 across the clothoid.
    assert!(alignment.curvature_at(100.0).unwrap().abs() < 1e-12);
    assert!((alignment.curvature_at(160.0).unwrap() - 1.0 / 300.0).abs() < 1e-12);
    assert!((alignment.curvature_at(200.0).unwrap() - 1.0 / 300.0).abs() < 1e-12);
}

#[test]
fn right_hand_chain_mirrors_left_hand_chain() {
    let left = HorizontalSegment::new(
        Point::new(0.0, 0.0),
        0.0,
        80.0,
        f64::INFINITY,
        500.0,
        HorizontalSegmentType::BlossCurve,
    );
    let right = HorizontalSegment::new(
        Point::new(0.0, 0.0),
        0.0,
        80.0,
        f64::INFINITY,
        -500.0,
        HorizontalSegmentType::BlossCurve,
    );
    for u in [20.0, 40.0, 80.0] {
        let l = left.point_at(u).unwrap();
        let r = right.point_at(u).unwrap();
        assert!((l.x - r.x).abs() < 1e-12);
        assert!((l.y + r.y).abs() < 1e-12);
    }
}

#[test]
fn out_of_range_station_fails() {
    let alignment = HorizontalAlignment::new(vec![HorizontalSegment::new(
        Point::new(0.0, 0.0),
        0.0,
        100.0,
        f64::INFINITY,
        f64::INFINITY,
        HorizontalSegmentType::Line,
    )])
    .unwrap();
    assert!(matches!(
        alignment.locate(100.0001),
        Err(AlignmentError::OutOfRange { .. })
    ));
    assert!(matches!(
        alignment.direction_at(-5.0),
        Err(AlignmentError::OutOfRange { .. })
    ));
}
