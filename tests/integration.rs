use chronoframe::{
    transitive_closure, CalendarReferenceSystem, ConversionEngine, Era, OrdinalReferenceSystem,
    PositionReferenceSystem, TemporalCoordinate, TemporalExtent, TemporalUnit, TrsRegistry,
    UnitKind,
};
use proptest::prelude::*;

fn coord(y: f64, mo: f64, d: f64, h: f64, mi: f64, s: f64) -> TemporalCoordinate {
    TemporalCoordinate::new(y, mo, d, h, mi, s).unwrap()
}

fn thirty_day_calendar() -> CalendarReferenceSystem {
    CalendarReferenceSystem::builder("thirty")
        .months(vec![30; 12])
        .build()
        .unwrap()
}

fn raw_coordinate() -> impl Strategy<Value = TemporalCoordinate> {
    (
        1600u32..2400,
        0u32..40,
        0u32..400,
        0u32..100,
        0u32..200,
        0.0f64..10_000.0,
    )
        .prop_map(|(y, mo, d, h, mi, s)| {
            coord(
                f64::from(y),
                f64::from(mo),
                f64::from(d),
                f64::from(h),
                f64::from(mi),
                s,
            )
        })
}

fn valid_coordinate() -> impl Strategy<Value = TemporalCoordinate> {
    (1700u32..2300, 1u32..13, 1u32..29, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, mo, d, h, mi, s)| {
            coord(
                f64::from(y),
                f64::from(mo),
                f64::from(d),
                f64::from(h),
                f64::from(mi),
                f64::from(s),
            )
        },
    )
}

// ── concrete scenarios ────────────────────────────────────────────────────

#[test]
fn unix_epoch_maps_to_origin() {
    let engine = ConversionEngine::default();
    let c = engine
        .position_to_coordinate(0.0, &PositionReferenceSystem::unix_time())
        .unwrap();
    assert_eq!(c, coord(1970.0, 1.0, 1.0, 0.0, 0.0, 0.0));
}

#[test]
fn gregorian_and_julian_disagree_on_1900() {
    let gregorian = CalendarReferenceSystem::gregorian();
    let julian = CalendarReferenceSystem::julian();
    assert_eq!(gregorian.days_in_month(2000, 2).unwrap(), 29);
    assert_eq!(gregorian.days_in_month(1900, 2).unwrap(), 28);
    assert_eq!(julian.days_in_month(1900, 2).unwrap(), 29);

    let g = ConversionEngine::new(gregorian);
    let j = ConversionEngine::new(julian);
    let feb29 = coord(1900.0, 2.0, 29.0, 0.0, 0.0, 0.0);
    assert_eq!(
        g.normalize_coordinate(&feb29).unwrap(),
        coord(1900.0, 3.0, 1.0, 0.0, 0.0, 0.0)
    );
    assert_eq!(j.normalize_coordinate(&feb29).unwrap(), feb29);
}

#[test]
fn month_overflow_carries_into_year() {
    let engine = ConversionEngine::default();
    assert_eq!(
        engine
            .normalize_coordinate(&coord(2023.0, 13.0, 1.0, 0.0, 0.0, 0.0))
            .unwrap(),
        coord(2024.0, 1.0, 1.0, 0.0, 0.0, 0.0)
    );
}

#[test]
fn tick_forward_respects_leap_day() {
    let engine = ConversionEngine::default();
    assert_eq!(
        engine
            .tick_forward(&coord(2024.0, 2.0, 28.0, 23.0, 59.0, 0.0), 120.0)
            .unwrap(),
        coord(2024.0, 2.0, 29.0, 0.0, 1.0, 0.0)
    );
    assert_eq!(
        engine
            .tick_forward(&coord(2023.0, 2.0, 28.0, 23.0, 59.0, 0.0), 120.0)
            .unwrap(),
        coord(2023.0, 3.0, 1.0, 0.0, 1.0, 0.0)
    );
}

#[test]
fn geologic_positions_are_year_granular() {
    let engine = ConversionEngine::default();
    let geo = PositionReferenceSystem::geologic_time();
    let kt_boundary = engine.position_to_coordinate(66.0, &geo).unwrap();
    assert!(kt_boundary.is_year_only());
    assert_eq!(kt_boundary.year(), Some(-65_998_050.0));
    assert_eq!(kt_boundary.metadata().unit, Some(UnitKind::Year));
}

#[test]
fn mars_calendar_end_to_end() {
    let darian = CalendarReferenceSystem::builder("darian")
        .seconds_per_minute(60)
        .minutes_per_hour(60)
        .hours_per_day(24)
        .months(vec![28; 24])
        .build()
        .unwrap();
    assert!(darian.has_exact_metric());
    let engine = ConversionEngine::new(&darian);

    let e = engine.duration_to_extent(700.0, TemporalUnit::DAY).unwrap();
    assert_eq!(e.years(), Some(1.0));
    assert_eq!(e.months(), Some(1.0));
    assert_eq!(e.days(), Some(0.0));

    let n = engine
        .normalize_coordinate(&coord(200.0, 25.0, 29.0, 0.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(n, coord(201.0, 2.0, 1.0, 0.0, 0.0, 0.0));
}

#[test]
fn registry_drives_conversions() {
    let registry = TrsRegistry::with_builtins();
    let calendar = registry.calendar("julian").unwrap();
    let unix = registry.position("unix-time").unwrap();
    let engine = ConversionEngine::new(&calendar);
    let c = engine.position_to_coordinate(86_400.0, &unix).unwrap();
    assert_eq!(c, coord(1970.0, 1.0, 2.0, 0.0, 0.0, 0.0));
    assert!(registry.unit("mars-sol").is_some());
}

#[test]
fn era_hierarchy_and_lookup() {
    let engine = ConversionEngine::default();
    let geo = PositionReferenceSystem::geologic_time();
    let at = |ma: f64| Some(engine.position_to_coordinate(ma, &geo).unwrap());

    let mut ors = OrdinalReferenceSystem::new("geologic");
    ors.add_era(Era::new("phanerozoic", at(538.8), None));
    ors.add_era(Era::new("mesozoic", at(251.9), at(66.0)));
    ors.add_era(Era::new("jurassic", at(201.4), at(145.0)));
    ors.add_member("phanerozoic", "mesozoic").unwrap();
    ors.add_member("mesozoic", "jurassic").unwrap();

    let subs: Vec<_> = ors
        .sub_eras("phanerozoic", true)
        .unwrap()
        .into_iter()
        .map(|e| e.name.clone())
        .collect();
    assert_eq!(subs, ["mesozoic", "jurassic"]);

    let hits: Vec<_> = ors
        .eras_containing(&at(150.0).unwrap())
        .into_iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(hits, ["jurassic", "mesozoic", "phanerozoic"]);
}

#[test]
fn closure_over_plain_adjacency() {
    let edges = [(0, 1), (1, 2), (2, 0), (2, 3)];
    let reached = transitive_closure(
        &0,
        |&n| edges.iter().filter(move |&&(a, _)| a == n).map(|&(_, b)| b),
        true,
    );
    assert_eq!(reached, vec![1, 2, 0, 3]);
}

// ── properties ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(c in raw_coordinate()) {
        for calendar in [CalendarReferenceSystem::gregorian(), CalendarReferenceSystem::julian()] {
            let engine = ConversionEngine::new(calendar);
            let once = engine.normalize_coordinate(&c).unwrap();
            let twice = engine.normalize_coordinate(&once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn prop_little_scale_position_roundtrip(p in -3.0e9f64..3.0e9) {
        let engine = ConversionEngine::default();
        let unix = PositionReferenceSystem::unix_time();
        let c = engine.position_to_coordinate(p, &unix).unwrap();
        let back = engine.coordinate_to_position(&c, &unix).unwrap();
        prop_assert!((back - p).abs() < 1e-3, "{} -> {} -> {}", p, c, back);
    }

    #[test]
    fn prop_large_scale_position_roundtrip(p in -4_000.0f64..4_000.0) {
        let engine = ConversionEngine::default();
        let geo = PositionReferenceSystem::geologic_time();
        let c = engine.position_to_coordinate(p, &geo).unwrap();
        let back = engine.coordinate_to_position(&c, &geo).unwrap();
        // positions are truncated to whole years
        prop_assert!((back - p).abs() <= 1e-6 + 1e-12 * p.abs(), "{} -> {}", p, back);
    }

    #[test]
    fn prop_extent_between_is_symmetric_and_non_negative(
        a in valid_coordinate(),
        b in valid_coordinate(),
    ) {
        let engine = ConversionEngine::default();
        let ab = engine.extent_between_coordinates(&a, &b).unwrap();
        let ba = engine.extent_between_coordinates(&b, &a).unwrap();
        prop_assert_eq!(&ab, &ba);
        prop_assert!(ab.components().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn prop_tick_backward_undoes_forward(
        c in valid_coordinate(),
        seconds in 0u32..2_000_000_000,
    ) {
        let engine = ConversionEngine::default();
        let seconds = f64::from(seconds);
        let later = engine.tick_forward(&c, seconds).unwrap();
        prop_assert!(later >= c);
        let back = engine.tick_backward(&later, seconds).unwrap();
        prop_assert_eq!(back, c);
    }

    #[test]
    fn prop_exact_calendar_extent_canonicalization(
        parts in (0u32..5, 0u32..30, 0u32..10, 0u32..100, 0u32..48, 0u32..120, 0u32..500),
    ) {
        let calendar = thirty_day_calendar();
        let engine = ConversionEngine::new(&calendar);
        let (y, mo, w, d, h, mi, s) = parts;
        let e = TemporalExtent::new(
            f64::from(y),
            f64::from(mo),
            f64::from(w),
            f64::from(d),
            f64::from(h),
            f64::from(mi),
            f64::from(s),
        )
        .unwrap();
        let duration = engine.extent_to_duration(&e, TemporalUnit::SECOND).unwrap();
        let rebuilt = engine.duration_to_extent(duration, TemporalUnit::SECOND).unwrap();
        prop_assert_eq!(
            engine.normalize_extent(&rebuilt).unwrap(),
            engine.normalize_extent(&e).unwrap()
        );
    }
}

// ── serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
mod serde_roundtrip {
    use super::*;

    #[test]
    fn coordinate_survives_json() {
        let c = coord(2024.0, 2.0, 29.0, 12.0, 0.0, 0.5).with_trs("unix-time");
        let json = serde_json::to_string(&c).unwrap();
        let back: TemporalCoordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
        assert_eq!(back.metadata(), c.metadata());
    }

    #[test]
    fn partial_coordinate_keeps_absent_fields() {
        let c = TemporalCoordinate::from_year(1950.0).unwrap();
        let back: TemporalCoordinate =
            serde_json::from_str(&serde_json::to_string(&c).unwrap()).unwrap();
        assert!(back.is_year_only());
    }

    #[test]
    fn extent_and_unit_survive_json() {
        let e = TemporalExtent::EMPTY.with_days(3.0).unwrap().with_trs("gregorian");
        let back: TemporalExtent =
            serde_json::from_str(&serde_json::to_string(&e).unwrap()).unwrap();
        assert_eq!(back, e);
        assert_eq!(back.trs(), Some("gregorian"));

        let json = serde_json::to_string(&TemporalUnit::MILLION_YEARS_AGO).unwrap();
        let unit: TemporalUnit = serde_json::from_str(&json).unwrap();
        assert_eq!(unit, TemporalUnit::MILLION_YEARS_AGO);
        assert!(json.contains("\"year\""));
    }

    #[test]
    fn negative_components_are_rejected_on_read() {
        let json = r#"{"year":2024.0,"month":-5.0,"day":1.0,"hour":null}"#;
        let err = serde_json::from_str::<TemporalCoordinate>(json).unwrap_err();
        assert!(err.to_string().contains("`month`"), "{err}");

        let err = serde_json::from_str::<TemporalExtent>(r#"{"days":-1.0}"#).unwrap_err();
        assert!(err.to_string().contains("`days`"), "{err}");
    }

    #[test]
    fn geologic_year_survives_json() {
        let engine = ConversionEngine::default();
        let c = engine
            .position_to_coordinate(66.0, &PositionReferenceSystem::geologic_time())
            .unwrap();
        let back: TemporalCoordinate =
            serde_json::from_str(&serde_json::to_string(&c).unwrap()).unwrap();
        assert_eq!(back.year(), Some(-65_998_050.0));
        assert_eq!(back.metadata(), c.metadata());
    }
}
