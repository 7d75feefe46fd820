mod common;

mod tests {
    use super::common::*;
    use myrtio_status_indicator::color::{BLACK, BLUE, GREEN, RED};
    use myrtio_status_indicator::{
        Duration, Indicator, IndicatorConfig, IndicatorScheduler, Notification,
        NotificationChannel, StripError,
    };

    fn indicator(strip: MockStrip) -> Indicator<MockStrip, 1> {
        Indicator::new(strip, &IndicatorConfig::default())
    }

    #[test]
    fn test_idle_tick_sleeps_idle_interval() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let mut scheduler =
            IndicatorScheduler::new(indicator(MockStrip::new()), channel.receiver(), &config);

        channel.sender().try_send(Notification::link(true, 1)).unwrap();
        let result = scheduler.tick(ms(0));
        assert_eq!(result.next_deadline, ms(1000));
        assert_eq!(result.sleep_duration, Duration::from_millis(1000));
        assert_eq!(result.fault, None);
        assert_eq!(scheduler.indicator().output().strip().writes(), 1);
    }

    #[test]
    fn test_first_tick_while_disconnected_starts_searching() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let mut scheduler =
            IndicatorScheduler::new(indicator(MockStrip::new()), channel.receiver(), &config);

        let result = scheduler.tick(ms(0));
        assert_eq!(result.next_deadline, ms(300));
        assert_eq!(scheduler.indicator().output().strip().colors(), vec![BLUE]);
    }

    #[test]
    fn test_searching_blink_repeats_without_sampler() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let mut scheduler =
            IndicatorScheduler::new(indicator(MockStrip::new()), channel.receiver(), &config);

        channel.sender().try_send(Notification::battery(3300)).unwrap();
        let mut now = ms(0);
        while now <= ms(30_000) {
            let result = scheduler.tick(now);
            assert!(result.next_deadline > now);
            now = result.next_deadline;
        }

        // Patterns start at 0, 7, 14, 21 and 28 s: 2 s of blinking, 5 s pause
        let cycle = [BLUE, BLACK, BLUE, BLACK, GREEN];
        let expected: Vec<_> = cycle.iter().copied().cycle().take(cycle.len() * 5).collect();
        assert_eq!(scheduler.indicator().output().strip().colors(), expected);
        assert!(!scheduler.indicator().snapshot().link.connected);
    }

    #[test]
    fn test_no_replay_while_connected() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let mut scheduler =
            IndicatorScheduler::new(indicator(MockStrip::new()), channel.receiver(), &config);

        channel.sender().try_send(Notification::link(true, 1)).unwrap();
        let mut now = ms(0);
        while now <= ms(30_000) {
            now = scheduler.tick(now).next_deadline;
        }
        assert_eq!(scheduler.indicator().output().strip().writes(), 1);
    }

    #[test]
    fn test_low_battery_while_disconnected_does_not_spin() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let mut scheduler =
            IndicatorScheduler::new(indicator(MockStrip::new()), channel.receiver(), &config);

        channel.sender().try_send(Notification::battery(2900)).unwrap();
        let result = scheduler.tick(ms(0));
        assert_eq!(result.next_deadline, ms(1000));

        let result = scheduler.tick(ms(1000));
        assert_eq!(result.next_deadline, ms(2000));
        assert_eq!(scheduler.indicator().output().strip().colors(), vec![RED]);
    }

    #[test]
    fn test_blink_step_shortens_sleep() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let mut scheduler =
            IndicatorScheduler::new(indicator(MockStrip::new()), channel.receiver(), &config);

        channel.sender().try_send(Notification::battery(3300)).unwrap();
        let result = scheduler.tick(ms(0));
        assert_eq!(result.next_deadline, ms(300));
        assert_eq!(result.sleep_duration, Duration::from_millis(300));

        let result = scheduler.tick(ms(300));
        assert_eq!(result.next_deadline, ms(1000));
        assert_eq!(
            scheduler.indicator().output().strip().colors(),
            vec![BLUE, BLACK]
        );
    }

    #[test]
    fn test_sampler_polled_on_interval() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let voltage = SharedVoltage::new(3300);
        let mut scheduler =
            IndicatorScheduler::new(indicator(MockStrip::new()), channel.receiver(), &config)
                .with_sampler(voltage.sampler());

        let result = scheduler.tick(ms(0));
        assert_eq!(voltage.reads.get(), 1);
        assert_eq!(result.next_deadline, ms(300));

        for now in [300, 1000, 1300] {
            scheduler.tick(ms(now));
        }
        let result = scheduler.tick(ms(2000));
        assert_eq!(voltage.reads.get(), 1);
        assert_eq!(result.next_deadline, ms(3000));

        let result = scheduler.tick(ms(4999));
        assert_eq!(result.next_deadline, ms(5000));
        assert_eq!(voltage.reads.get(), 1);

        // Poll is due, the next searching blink is not
        let result = scheduler.tick(ms(5000));
        assert_eq!(voltage.reads.get(), 2);
        assert_eq!(result.next_deadline, ms(6000));

        scheduler.tick(ms(6000));
        let result = scheduler.tick(ms(7000));
        assert_eq!(result.next_deadline, ms(7300));
        assert_eq!(
            scheduler.indicator().output().strip().colors(),
            vec![BLUE, BLACK, BLUE, BLACK, GREEN, BLUE]
        );
    }

    #[test]
    fn test_sampled_change_reaches_strip() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let voltage = SharedVoltage::new(3300);
        let mut scheduler =
            IndicatorScheduler::new(indicator(MockStrip::new()), channel.receiver(), &config)
                .with_sampler(voltage.sampler());

        channel.sender().try_send(Notification::link(true, 1)).unwrap();
        scheduler.tick(ms(0));

        voltage.millivolt.set(2900);
        scheduler.tick(ms(5000));
        assert!(scheduler.indicator().snapshot().battery.is_low);
        assert_eq!(
            scheduler.indicator().output().last_color(),
            Some(RED)
        );
    }

    #[test]
    fn test_poll_schedule_resets_after_stall() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let voltage = SharedVoltage::new(3300);
        let mut scheduler =
            IndicatorScheduler::new(indicator(MockStrip::new()), channel.receiver(), &config)
                .with_sampler(voltage.sampler());

        channel.sender().try_send(Notification::link(true, 1)).unwrap();
        scheduler.tick(ms(0));
        assert_eq!(voltage.reads.get(), 1);

        // One poll after the stall, not a burst
        let result = scheduler.tick(ms(60_000));
        assert_eq!(voltage.reads.get(), 2);
        assert_eq!(result.next_deadline, ms(61_000));

        scheduler.tick(ms(64_999));
        assert_eq!(voltage.reads.get(), 2);
        scheduler.tick(ms(65_000));
        assert_eq!(voltage.reads.get(), 3);
    }

    #[test]
    fn test_small_lag_keeps_cadence() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let voltage = SharedVoltage::new(3300);
        let mut scheduler =
            IndicatorScheduler::new(indicator(MockStrip::new()), channel.receiver(), &config)
                .with_sampler(voltage.sampler());

        channel.sender().try_send(Notification::link(true, 1)).unwrap();
        scheduler.tick(ms(0));
        scheduler.tick(ms(5200));
        assert_eq!(voltage.reads.get(), 2);

        // Next poll stays at 10 s
        scheduler.tick(ms(9999));
        assert_eq!(voltage.reads.get(), 2);
        scheduler.tick(ms(10_000));
        assert_eq!(voltage.reads.get(), 3);
    }

    #[test]
    fn test_fault_is_reported() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let mut scheduler =
            IndicatorScheduler::new(indicator(MockStrip::failing()), channel.receiver(), &config);

        channel.sender().try_send(Notification::link(true, 1)).unwrap();
        let result = scheduler.tick(ms(0));
        assert_eq!(result.fault, Some(StripError::Transport));

        let result = scheduler.tick(ms(10));
        assert_eq!(result.fault, None);
    }

    #[test]
    fn test_indicator_mut_gives_access_to_strip() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let config = IndicatorConfig::default();
        let mut scheduler = IndicatorScheduler::new(
            indicator(MockStrip::not_ready()),
            channel.receiver(),
            &config,
        );

        assert_eq!(scheduler.indicator_mut().start(ms(0)), Err(StripError::NotReady));
        scheduler.indicator_mut().output_mut().strip_mut().ready = true;
        scheduler.tick(ms(300));
        assert_eq!(
            scheduler.indicator().output().strip().colors(),
            vec![BLACK]
        );
    }
}
