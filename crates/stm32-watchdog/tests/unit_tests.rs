//! Unit tests for the public API surface.

#![cfg(test)]

use stm32_watchdog::prelude::*;
use stm32_watchdog::timeout::{max_timeout_ms, period_us, ticks_for};

type TestResult = Result<(), Box<dyn std::error::Error>>;

mod prescaler_tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_finest_first() {
        let divisors: Vec<u32> = Prescaler::ALL.iter().map(|p| p.divisor()).collect();
        assert_eq!(divisors, vec![4, 8, 16, 32, 64, 128, 256]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Prescaler::Div64.to_string(), "/64");
    }
}

mod timeout_math_tests {
    use super::*;

    #[test]
    fn test_ticks_for_known_values() {
        assert_eq!(ticks_for(1000, 40_000, Prescaler::Div256), 156);
        assert_eq!(ticks_for(1000, 32_000, Prescaler::Div256), 125);
        assert_eq!(ticks_for(100, 40_000, Prescaler::Div4), 1000);
        assert_eq!(ticks_for(100, 0, Prescaler::Div4), 0);
    }

    #[test]
    fn test_ticks_for_does_not_overflow() {
        let ticks = ticks_for(u32::MAX, u32::MAX, Prescaler::Div4);
        assert_eq!(ticks, u64::from(u32::MAX) * u64::from(u32::MAX) / 4000);
    }

    #[test]
    fn test_period_us() {
        assert_eq!(period_us(156, Prescaler::Div256, 40_000), 998_400);
        assert_eq!(period_us(1, Prescaler::Div4, 40_000), 100);
    }

    #[test]
    fn test_max_timeout_ms() {
        assert_eq!(max_timeout_ms(Prescaler::Div256, 40_000), 26_208);
        assert_eq!(max_timeout_ms(Prescaler::Div256, 32_000), 32_760);
        assert_eq!(max_timeout_ms(Prescaler::Div4, 40_000), 409);
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_with_config_rejects_zero_frequency() {
        let config = IwdgConfig {
            input_frequency_hz: 0,
            ..IwdgConfig::default()
        };
        let result = IndependentWatchdog::with_config(RecordingRegisters::new(), config);
        assert!(matches!(result, Err(WatchdogError::ZeroInputFrequency)));
    }

    #[test]
    fn test_set_config_takes_effect_on_next_timeout() -> TestResult {
        let mut watchdog = IndependentWatchdog::new(RecordingRegisters::new());
        watchdog.set_config(IwdgConfig::fixed_max_prescaler())?;

        let applied = watchdog.set_timeout(100)?;
        assert_eq!(applied.prescaler, Prescaler::Div256);
        assert_eq!(watchdog.config().prescaler, PrescalerPolicy::Fixed(Prescaler::Div256));
        Ok(())
    }

    #[test]
    fn test_zero_floor_allows_zero_reload() -> TestResult {
        let config = IwdgConfig::builder()
            .reload_floor(ReloadFloor::Zero)
            .build()?;
        let mut watchdog = IndependentWatchdog::with_config(RecordingRegisters::new(), config)?;

        let applied = watchdog.set_timeout(0)?;
        assert_eq!(applied.reload, 0);
        assert_eq!(watchdog.registers().reload(), 0);
        Ok(())
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_errors_are_std_errors() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<WatchdogError>();
    }

    #[test]
    fn test_too_short_display() {
        let err = WatchdogError::TimeoutTooShort {
            requested_ms: 0,
            min_ms: 1,
        };
        assert_eq!(err.to_string(), "Timeout of 0 ms is below the minimum of 1 ms");
    }
}

#[test]
fn test_version_matches_package() {
    assert_eq!(stm32_watchdog::VERSION, env!("CARGO_PKG_VERSION"));
}
