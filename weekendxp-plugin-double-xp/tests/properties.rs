use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;
use weekendxp_plugin_double_xp::{
    clock::FixedClock,
    config::WeekendXpConfig,
    rates::{effective_rate, is_event_active, ExperienceEvent, PlayerOverride, RateCalculator},
};
use weekendxp_plugins::{
    player::{PlayerGuid, XpSource},
    settings::MemoryPlayerSettings,
};

fn date(days_from_epoch: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Days::new(days_from_epoch as u64)
}

fn source() -> impl Strategy<Value = XpSource> {
    prop_oneof![
        Just(XpSource::Kill),
        Just(XpSource::Quest),
        Just(XpSource::Exploration),
        Just(XpSource::Other),
    ]
}

fn any_config() -> impl Strategy<Value = WeekendXpConfig> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0u32..=100,
        any::<f32>(),
        any::<bool>(),
        prop_oneof![0.1f32..10.0, Just(f32::INFINITY)],
        any::<bool>(),
    )
        .prop_map(
            |(
                enabled,
                always_enabled,
                quest_only,
                max_level,
                xp_amount,
                individual_xp_enabled,
                max_allowed_rate,
                announce,
            )| WeekendXpConfig {
                enabled,
                always_enabled,
                quest_only,
                max_level,
                xp_amount,
                individual_xp_enabled,
                max_allowed_rate,
                announce,
            },
        )
}

fn any_override() -> impl Strategy<Value = PlayerOverride> {
    (proptest::option::of(any::<f32>()), any::<bool>())
        .prop_map(|(rate, disabled)| PlayerOverride { rate, disabled })
}

proptest! {
    #[test]
    fn at_or_above_max_level_is_never_scaled(
        config in any_config(),
        player in any_override(),
        days in 0i64..3650,
        amount in any::<u32>(),
        source in source(),
        above in 0u8..20,
    ) {
        let level = config.max_level.saturating_add(u32::from(above));
        prop_assume!(level <= u32::from(u8::MAX));

        let calculator = RateCalculator::new(FixedClock(date(days).and_hms_opt(12, 0, 0).unwrap()));
        let event = ExperienceEvent { amount, source, player_level: level as u8 };

        prop_assert_eq!(calculator.apply_to_award(&event, &config, &player), amount);
    }

    #[test]
    fn quest_only_never_scales_other_sources(
        mut config in any_config(),
        player in any_override(),
        days in 0i64..3650,
        amount in any::<u32>(),
        level in any::<u8>(),
        source in source(),
    ) {
        prop_assume!(!source.is_quest());
        config.quest_only = true;

        let calculator = RateCalculator::new(FixedClock(date(days).and_hms_opt(12, 0, 0).unwrap()));
        let event = ExperienceEvent { amount, source, player_level: level };

        prop_assert_eq!(calculator.apply_to_award(&event, &config, &player), amount);
    }

    #[test]
    fn effective_rate_is_positive(config in any_config(), player in any_override()) {
        let rate = effective_rate(&config, &player);
        prop_assert!(rate > 0.0);
        prop_assert!(rate.is_finite());
    }

    #[test]
    fn set_rate_accepts_exactly_the_valid_range(
        mut config in any_config(),
        requested in prop_oneof![
            8 => -20.0f32..20.0,
            1 => Just(f32::INFINITY),
            1 => Just(f32::NEG_INFINITY),
            1 => Just(f32::NAN),
        ],
    ) {
        config.individual_xp_enabled = true;
        let calculator = RateCalculator::new(FixedClock(date(0).and_hms_opt(0, 0, 0).unwrap()));
        let mut settings = MemoryPlayerSettings::new();
        let guid = PlayerGuid(1);

        let result = calculator.set_player_rate(&mut settings, guid, requested, &config);
        let valid = requested.is_finite() && requested > 0.0 && requested <= config.max_allowed_rate;
        prop_assert_eq!(result.is_ok(), valid);

        if valid {
            let player = PlayerOverride::load(&settings, guid);
            prop_assert_eq!(effective_rate(&config, &player), requested);
        }
    }

    #[test]
    fn event_window(days in 0i64..3650, enabled in any::<bool>(), always in any::<bool>()) {
        let day = date(days);
        let config = WeekendXpConfig {
            enabled,
            always_enabled: always,
            ..WeekendXpConfig::default()
        };
        let weekend = matches!(day.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun);

        let expected = always || (enabled && weekend);
        prop_assert_eq!(is_event_active(&day, &config), expected);
    }
}
