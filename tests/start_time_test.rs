use chrono::{DateTime, TimeDelta, Utc};
use node_diag::{DurationField, start_time};

struct Case {
    name: &'static str,
    uptime: TimeDelta,
    lookback: &'static str,
    delay: &'static str,
    expected: Option<TimeDelta>,
}

fn now() -> DateTime<Utc> {
    "2024-03-01T12:00:00.123456789Z".parse().unwrap()
}

fn secs(n: i64) -> TimeDelta {
    TimeDelta::seconds(n)
}

#[test]
fn test_start_time_cases() {
    let cases = [
        Case {
            name: "node is just up, no lookback and delay",
            uptime: secs(0),
            lookback: "",
            delay: "",
            expected: Some(secs(0)),
        },
        Case {
            name: "no delay, lookback > uptime",
            uptime: secs(5),
            lookback: "7s",
            delay: "",
            expected: Some(secs(-5)),
        },
        Case {
            name: "no delay, lookback < uptime",
            uptime: secs(5),
            lookback: "3s",
            delay: "",
            expected: Some(secs(-3)),
        },
        Case {
            name: "no lookback, delay > uptime",
            uptime: secs(5),
            lookback: "",
            delay: "7s",
            expected: Some(secs(2)),
        },
        Case {
            name: "no lookback, delay < uptime",
            uptime: secs(5),
            lookback: "",
            delay: "3s",
            expected: Some(secs(0)),
        },
        Case {
            name: "uptime < delay",
            uptime: secs(10),
            lookback: "6s",
            delay: "12s",
            expected: Some(secs(2)),
        },
        Case {
            name: "uptime > delay, uptime < lookback",
            uptime: secs(10),
            lookback: "12s",
            delay: "7s",
            expected: Some(secs(-3)),
        },
        Case {
            name: "uptime > delay, uptime > lookback, lookback > uptime - delay",
            uptime: secs(10),
            lookback: "6s",
            delay: "7s",
            expected: Some(secs(-3)),
        },
        Case {
            name: "uptime > delay, uptime > lookback, lookback < uptime - delay",
            uptime: secs(10),
            lookback: "2s",
            delay: "7s",
            expected: Some(secs(-2)),
        },
        Case {
            name: "bad lookback value",
            uptime: secs(0),
            lookback: "abc",
            delay: "",
            expected: None,
        },
        Case {
            name: "bad delay value",
            uptime: secs(0),
            lookback: "",
            delay: "abc",
            expected: None,
        },
    ];

    for case in cases {
        let result = start_time(now(), case.uptime, case.lookback, case.delay);
        match case.expected {
            Some(offset) => {
                let got = result.unwrap_or_else(|e| panic!("{}: unexpected error {}", case.name, e));
                assert_eq!(got, now() + offset, "{}", case.name);
            }
            None => assert!(result.is_err(), "{}: expected an error", case.name),
        }
    }
}

#[test]
fn test_lookback_clamps_to_boot_time() {
    let uptime = TimeDelta::hours(1);
    let start = start_time(now(), uptime, "24h", "").unwrap();
    assert_eq!(start, now() - uptime);
}

#[test]
fn test_compound_and_fractional_flags() {
    let uptime = TimeDelta::hours(3);
    let start = start_time(now(), uptime, "1h30m", "").unwrap();
    assert_eq!(start, now() - TimeDelta::minutes(90));

    let start = start_time(now(), uptime, "3h", "2.5h").unwrap();
    assert_eq!(start, now() - TimeDelta::minutes(30));
}

#[test]
fn test_zero_lookback_starts_now() {
    let start = start_time(now(), TimeDelta::minutes(5), "0", "").unwrap();
    assert_eq!(start, now());
}

#[test]
fn test_invalid_duration_error_message() {
    let err = start_time(now(), TimeDelta::zero(), "5 minutes", "").unwrap_err();
    assert_eq!(err.duration_field(), Some(DurationField::Lookback));
    let message = err.to_string();
    assert!(message.contains("lookback"), "{}", message);
    assert!(message.contains("5 minutes"), "{}", message);
}
