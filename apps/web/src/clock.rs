use std::time::Duration;

/// Time since `started_ms`, both in milliseconds from `Date.now()`.
///
/// The wall clock can step backwards; that reads as no time passing.
pub fn elapsed_since(started_ms: f64, now_ms: f64) -> Duration {
    let elapsed = now_ms - started_ms;
    if elapsed.is_finite() && elapsed > 0.0 {
        Duration::from_secs_f64(elapsed / 1000.0)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::elapsed_since;
    use std::time::Duration;

    #[test]
    fn converts_milliseconds() {
        assert_eq!(elapsed_since(1_000.0, 1_300.0), Duration::from_millis(300));
        assert_eq!(elapsed_since(0.0, 2_500.0), Duration::from_millis(2_500));
    }

    #[test]
    fn clock_going_backwards_is_zero() {
        assert_eq!(elapsed_since(5_000.0, 4_000.0), Duration::ZERO);
        assert_eq!(elapsed_since(5_000.0, f64::NAN), Duration::ZERO);
    }
}
