//! Integration tests for the parameter tree as seen through `AppService`.

use serde_json::{Value, json};

use ledtherm::Error;

use crate::mock_hw::{MockBoard, started};

#[test]
fn root_lists_every_branch() {
    let (svc, _clock) = started(MockBoard::new());
    let root = svc.get("").unwrap();
    let keys: Vec<&str> = root.as_object().unwrap().keys().map(String::as_str).collect();
    for key in ["version", "server_uptime", "led_task", "leds", "temperature"] {
        assert!(keys.contains(&key), "missing {key}");
    }
    assert_eq!(root["version"], json!(env!("CARGO_PKG_VERSION")));
}

#[test]
fn subtree_shapes() {
    let (svc, _clock) = started(MockBoard::new());
    let led_task = svc.get("led_task").unwrap();
    assert_eq!(
        led_task,
        json!({
            "rave_count": 0,
            "traffic_count": 0,
            "traffic_phase": 0,
            "enable": true,
            "task_mode": "command",
            "interval": 0.25,
        })
    );
    assert_eq!(
        svc.get("temperature").unwrap(),
        json!({
            "temperature": null,
            "rolling_avg": 0.0,
            "temps_counted": 0,
            "task_enable": true,
            "temp_bounds": {"lower": 21.5, "upper": 22.0},
        })
    );
}

#[test]
fn unknown_paths_are_not_found() {
    let (mut svc, _clock) = started(MockBoard::new());
    let err = svc.get("leds/blue").unwrap_err();
    assert_eq!(err, Error::NotFound("leds/blue".into()));
    assert_eq!(err.to_string(), "Invalid path: leds/blue");

    assert!(matches!(svc.get("bogus"), Err(Error::NotFound(_))));
    assert!(matches!(
        svc.set("bogus/deeper", &json!(1)),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn read_only_leaves_refuse_writes() {
    let (mut svc, _clock) = started(MockBoard::new());
    for path in [
        "version",
        "server_uptime",
        "led_task/rave_count",
        "led_task/traffic_count",
        "led_task/traffic_phase",
        "temperature/temperature",
        "temperature/rolling_avg",
        "temperature/temps_counted",
        "temperature/task_enable",
    ] {
        let err = svc.set(path, &json!(1)).unwrap_err();
        assert_eq!(err, Error::ReadOnly(path.into()));
        assert_eq!(err.to_string(), format!("Parameter {path} is read-only"));
    }
}

#[test]
fn leaf_write_accepts_wrapped_value() {
    let (mut svc, _clock) = started(MockBoard::new());
    svc.set("leds/red", &json!({"red": 1})).unwrap();
    assert_eq!(svc.get("leds/red").unwrap(), json!(1));
    svc.set("leds/red", &json!(false)).unwrap();
    assert_eq!(svc.get("leds/red").unwrap(), json!(0));
}

#[test]
fn branch_write_sets_several_leaves() {
    let (mut svc, _clock) = started(MockBoard::new());
    svc.set("leds", &json!({"red": 1, "green": true})).unwrap();
    assert_eq!(svc.get("leds").unwrap(), json!({"red": 1, "yellow": 0, "green": 1}));

    svc.set(
        "",
        &json!({"led_task": {"task_mode": "rave"}, "temperature": {"temp_bounds": {"lower": 18}}}),
    )
    .unwrap();
    assert_eq!(svc.get("led_task/task_mode").unwrap(), json!("rave"));
    assert_eq!(svc.get("temperature/temp_bounds/lower").unwrap(), json!(18.0));
}

#[test]
fn rejected_branch_write_changes_nothing() {
    let (mut svc, _clock) = started(MockBoard::new());
    let err = svc
        .set("leds", &json!({"red": 1, "blue": 1}))
        .unwrap_err();
    assert_eq!(err, Error::NotFound("leds/blue".into()));

    let err = svc
        .set("led_task", &json!({"task_mode": "rave", "rave_count": 10}))
        .unwrap_err();
    assert_eq!(err, Error::ReadOnly("led_task/rave_count".into()));

    assert!(svc.hardware().writes.is_empty());
    assert_eq!(svc.get("led_task/task_mode").unwrap(), json!("command"));
}

#[test]
fn branch_needs_an_object() {
    let (mut svc, _clock) = started(MockBoard::new());
    assert!(matches!(
        svc.set("leds", &json!(1)),
        Err(Error::InvalidValue { .. })
    ));
}

#[test]
fn value_type_errors_name_the_leaf() {
    let (mut svc, _clock) = started(MockBoard::new());
    let err = svc.set("leds/yellow", &json!("on")).unwrap_err();
    assert!(matches!(&err, Error::InvalidValue { path, .. } if path == "leds/yellow"));

    let err = svc.set("led_task/task_mode", &json!(3)).unwrap_err();
    assert!(matches!(&err, Error::InvalidValue { path, .. } if path == "led_task/task_mode"));

    let err = svc.set("temperature/temp_bounds/upper", &Value::Null).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));
}

#[test]
fn bounds_accept_inverted_band() {
    let (mut svc, _clock) = started(MockBoard::new());
    svc.set("temperature/temp_bounds", &json!({"lower": 30, "upper": 10}))
        .unwrap();
    assert_eq!(
        svc.get("temperature/temp_bounds").unwrap(),
        json!({"lower": 30.0, "upper": 10.0})
    );
}

#[test]
fn paths_tolerate_extra_slashes() {
    let (svc, _clock) = started(MockBoard::new());
    assert_eq!(svc.get("/leds/red/").unwrap(), json!(0));
    assert_eq!(svc.get("led_task//enable").unwrap(), json!(true));
}
