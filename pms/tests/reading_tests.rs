use pms::reading::*;

// Values equal to their threshold are a risk:
#[test]
fn boundary_is_risk() {
    let health = Reading::new(10, 15, 45).classify(&Thresholds::default());
    assert_eq!(
        health,
        Health {
            pm1_0: Level::Risk,
            pm2_5: Level::Risk,
            pm10: Level::Risk,
        }
    );
    assert!(!health.is_safe());
}

// Values one below their threshold are safe:
#[test]
fn below_boundary_is_safe() {
    let health = Reading::new(9, 14, 44).classify(&Thresholds::default());
    assert!(health.is_safe());
}

// Each channel is classified independently:
#[test]
fn mixed() {
    let health = Reading::new(0, 100, 44).classify(&Thresholds::default());
    assert_eq!(health.get(Channel::Pm1_0), Level::Safe);
    assert_eq!(health.get(Channel::Pm2_5), Level::Risk);
    assert_eq!(health.get(Channel::Pm10), Level::Safe);
}

#[test]
fn custom_thresholds() {
    let thresholds = Thresholds {
        pm1_0: 0,
        pm2_5: 1000,
        pm10: 50,
    };
    assert_eq!(thresholds.level(Channel::Pm1_0, 0), Level::Risk);
    assert_eq!(thresholds.level(Channel::Pm2_5, 999), Level::Safe);
    assert_eq!(thresholds.level(Channel::Pm10, 50), Level::Risk);
}

#[test]
fn channel_values() {
    let reading = Reading::new(1, 2, 3);
    let values: Vec<u16> = Channel::ALL.iter().map(|c| reading.get(*c)).collect();
    assert_eq!(values, vec![1, 2, 3]);
    assert_eq!(Thresholds::default().limit(Channel::Pm2_5), 15);
}

#[test]
fn log_line() {
    assert_eq!(
        Reading::new(10, 15, 45).to_string(),
        "PM1.0: 10 | PM 2.5: 15 | PM 10: 45 || Unit: ug/m3"
    );
}

#[test]
fn labels() {
    let labels: Vec<String> = Channel::ALL.iter().map(|c| c.to_string()).collect();
    assert_eq!(labels, vec!["PM 1.0", "PM 2.5", "PM 10"]);
    assert_eq!(Level::Safe.to_string(), "SAFE");
    assert_eq!(Level::Risk.to_string(), "RISK");
}
