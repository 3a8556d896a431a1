//! Las utilidades de test se exponen a los tests de integración mediante el
//! feature `test-support`, que activa la dev-dependency sobre el propio crate.

use chrono::{Duration, TimeZone, Utc};
use mockable::Clock;
use pretty_assertions::assert_eq;

use fleet_drivers::test_support::MutableClock;

#[test]
fn test_mutable_clock_is_available_with_test_support_feature() {
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let clock = MutableClock::new(start);
    assert_eq!(clock.utc(), start);

    clock.advance_seconds(90);
    assert_eq!(clock.utc(), start + Duration::seconds(90));

    let later = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    clock.set(later);
    assert_eq!(clock.utc(), later);
    assert_eq!(clock.local(), later.with_timezone(&chrono::Local));
}
