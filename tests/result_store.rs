mod common;

use common::{png, scenario_result, FakeService, SCENARIO_JSON};
use palette_check::{
    config::Config,
    engine::decode_result,
    error::PaletteError,
    model::RULE_60_30_10,
    query::QuerySession,
    results::ResultStore,
};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn successful_query_is_stored_under_test_id() {
    let cfg = Config::default();
    let mut session = QuerySession::new(&cfg, FakeService::new(vec![Ok(scenario_result())]));
    assert!(session.store().get(RULE_60_30_10).is_none());

    let got = session.submit(Some(png("a.png"))).unwrap();
    assert_eq!(got, scenario_result());
    assert_eq!(session.store().get("603010"), Some(&scenario_result()));
    assert_eq!(session.service().last_test_id.borrow().as_deref(), Some("603010"));
}

#[test]
fn scenario_body_decodes_to_exact_value() {
    let decoded = decode_result(SCENARIO_JSON.as_bytes()).unwrap();
    assert_eq!(decoded, scenario_result());
}

#[test]
fn missing_image_sends_nothing() {
    let cfg = Config::default();
    let mut session = QuerySession::new(&cfg, FakeService::new(vec![Ok(scenario_result())]));

    let err = session.submit(None).unwrap_err();
    assert!(matches!(err, PaletteError::MissingInput));
    let err = session
        .submit(Some(palette_check::engine::ImagePayload::new("empty.png", vec![])))
        .unwrap_err();
    assert!(matches!(err, PaletteError::MissingInput));

    assert_eq!(session.service().calls.get(), 0);
    assert!(session.current().is_none());
}

#[test]
fn failed_query_keeps_previous_result() {
    let cfg = Config::default();
    let service = FakeService::new(vec![Ok(scenario_result()), Err("HTTP 500".into())]);
    let mut session = QuerySession::new(&cfg, service);

    session.submit(Some(png("first.png"))).unwrap();
    let err = session.submit(Some(png("second.png"))).unwrap_err();
    assert!(matches!(err, PaletteError::AnalysisFailed(_)));
    assert_eq!(session.current(), Some(&scenario_result()));
}

#[test]
fn oversized_image_is_refused_locally() {
    let mut cfg = Config::default();
    cfg.limits.max_image_bytes = 4;
    let mut session = QuerySession::new(&cfg, FakeService::new(vec![Ok(scenario_result())]));

    let err = session.submit(Some(png("big.png"))).unwrap_err();
    assert!(matches!(err, PaletteError::ImageTooLarge { size: 7, max: 4 }));
    assert_eq!(session.service().calls.get(), 0);
}

#[test]
fn rule_followed_is_propagated_not_recomputed() {
    let mut inconsistent = scenario_result();
    inconsistent.details.accent_ok = false;
    assert!(!inconsistent.is_consistent());

    let cfg = Config::default();
    let mut session = QuerySession::new(&cfg, FakeService::new(vec![Ok(inconsistent)]));
    session.submit(Some(png("a.png"))).unwrap();

    let stored = session.current().unwrap();
    assert!(stored.rule_followed);
    assert!(!stored.details.accent_ok);
}

#[test]
fn set_replaces_and_notifies_observers() {
    let seen: Rc<RefCell<Vec<(String, bool)>>> = Rc::default();
    let mut store = ResultStore::new();
    let sink = Rc::clone(&seen);
    store.subscribe(move |id, r| sink.borrow_mut().push((id.to_string(), r.rule_followed)));

    let first = scenario_result();
    let mut second = scenario_result();
    second.rule_followed = false;
    second.details.primary_ok = false;

    store.set("603010", first);
    store.set("603010", second);

    assert_eq!(store.get("603010"), Some(&second));
    assert_eq!(store.test_ids().count(), 1);
    assert_eq!(
        *seen.borrow(),
        vec![("603010".to_string(), true), ("603010".to_string(), false)]
    );

    assert_eq!(store.clear("603010"), Some(second));
    assert!(store.is_empty());
}

#[test]
fn all_zero_result_is_distinct_from_absent() {
    let zero = r#"{
      "primary_color": {"color": [0, 0, 0], "percentage": 0},
      "secondary_color": {"color": [0, 0, 0], "percentage": 0},
      "accent_color": {"color": [0, 0, 0], "percentage": 0},
      "rule_followed": false,
      "details": {"primary_ok": false, "secondary_ok": false, "accent_ok": false}
    }"#;
    let mut store = ResultStore::new();
    assert!(store.get("603010").is_none());
    store.set("603010", decode_result(zero.as_bytes()).unwrap());
    assert!(store.get("603010").is_some());
}

#[test]
fn malformed_bodies_are_analysis_failures() {
    let cases = [
        SCENARIO_JSON.replace("[10, 20, 30]", "[10, 20, 300]"),
        SCENARIO_JSON.replace("[10, 20, 30]", "[10, 20]"),
        SCENARIO_JSON.replace("55.5", "155.5"),
        SCENARIO_JSON.replace("14.5", "-1"),
        SCENARIO_JSON.replace("\"rule_followed\": true,", ""),
        r#"{"detail": "Internal Server Error"}"#.to_string(),
        "not json".to_string(),
    ];
    for body in cases {
        let err = decode_result(body.as_bytes()).unwrap_err();
        assert!(
            matches!(err, PaletteError::AnalysisFailed(_)),
            "body {body} gave {err:?}"
        );
    }
}

#[test]
fn decoded_values_stay_in_range() {
    let r = decode_result(SCENARIO_JSON.as_bytes()).unwrap();
    for role in palette_check::model::Role::ALL {
        let share = r.share(role);
        assert!((0.0..=100.0).contains(&share.percentage));
    }
    assert!(r.validate().is_ok());
}

#[test]
fn session_observers_fire_only_on_success() {
    let cfg = Config::default();
    let service = FakeService::new(vec![Err("timeout".into()), Ok(scenario_result())]);
    let mut session = QuerySession::new(&cfg, service);
    let hits = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&hits);
    session.subscribe(move |_, _| *sink.borrow_mut() += 1);

    assert!(session.submit(Some(png("a.png"))).is_err());
    assert_eq!(*hits.borrow(), 0);
    session.submit(Some(png("a.png"))).unwrap();
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn each_submission_resolves_before_the_next_starts() {
    let cfg = Config::default();
    let service = FakeService::new(vec![Err("HTTP 502".into()), Ok(scenario_result())]);
    let mut session = QuerySession::new(&cfg, service);

    assert!(session.submit(Some(png("a.png"))).is_err());
    assert_eq!(session.service().calls.get(), 1);
    assert!(session.current().is_none());

    session.submit(Some(png("a.png"))).unwrap();
    assert_eq!(session.service().calls.get(), 2);
    assert_eq!(session.current(), Some(&scenario_result()));
}
