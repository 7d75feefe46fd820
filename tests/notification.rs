mod common;

mod tests {
    use super::common::*;
    use myrtio_status_indicator::channel::{TryReceiveError, TrySendError};
    use myrtio_status_indicator::color::BLUE;
    use myrtio_status_indicator::{
        Indicator, IndicatorConfig, Notification, NotificationChannel, NotificationProcessor,
        ProcessSummary, StripError,
    };

    #[test]
    fn test_channel_is_fifo() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let sender = channel.sender();
        let receiver = channel.receiver();

        sender.try_send(Notification::battery(3300)).unwrap();
        sender.try_send(Notification::layer(2)).unwrap();
        assert_eq!(channel.len(), 2);

        assert_eq!(receiver.try_receive(), Ok(Notification::battery(3300)));
        assert_eq!(receiver.try_receive(), Ok(Notification::layer(2)));
        assert_eq!(receiver.try_receive(), Err(TryReceiveError));
        assert!(receiver.is_empty());
    }

    #[test]
    fn test_full_channel_hands_value_back() {
        let channel: NotificationChannel<2> = NotificationChannel::new();
        let sender = channel.sender();
        sender.try_send(Notification::layer(0)).unwrap();
        sender.try_send(Notification::layer(1)).unwrap();
        assert_eq!(
            sender.try_send(Notification::layer(2)),
            Err(TrySendError(Notification::layer(2)))
        );

        channel.clear();
        assert!(channel.is_empty());
        sender.try_send(Notification::layer(3)).unwrap();
    }

    #[test]
    fn test_send_replacing_keeps_newest() {
        let channel: NotificationChannel<2> = NotificationChannel::new();
        let sender = channel.sender();
        assert_eq!(sender.send_replacing(Notification::layer(0)), None);
        assert_eq!(sender.send_replacing(Notification::layer(1)), None);
        assert_eq!(
            sender.send_replacing(Notification::layer(2)),
            Some(Notification::layer(0))
        );

        let receiver = channel.receiver();
        assert_eq!(receiver.try_receive(), Ok(Notification::layer(1)));
        assert_eq!(receiver.try_receive(), Ok(Notification::layer(2)));
        assert!(receiver.is_empty());
    }

    #[test]
    fn test_processor_drains_in_order() {
        let channel: NotificationChannel<8> = NotificationChannel::new();
        let sender = channel.sender();
        let mut processor = NotificationProcessor::new(channel.receiver());
        let mut indicator: Indicator<MockStrip, 1> =
            Indicator::new(MockStrip::new(), &IndicatorConfig::default());

        sender.try_send(Notification::battery(3300)).unwrap();
        sender.try_send(Notification::link(true, 1)).unwrap();
        sender.try_send(Notification::layer(1)).unwrap();
        sender.try_send(Notification::layer(1)).unwrap();
        sender.try_send(Notification::battery(0)).unwrap();

        let summary = processor.process_pending(&mut indicator, ms(0));
        assert_eq!(
            summary,
            ProcessSummary {
                handled: 5,
                rendered: 3,
                fault: None,
            }
        );
        assert!(channel.is_empty());
        assert_eq!(indicator.output().last_color(), Some(BLUE));
    }

    #[test]
    fn test_processor_on_empty_queue() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let mut processor = NotificationProcessor::new(channel.receiver());
        let mut indicator: Indicator<MockStrip, 1> =
            Indicator::new(MockStrip::new(), &IndicatorConfig::default());

        assert_eq!(
            processor.process_pending(&mut indicator, ms(0)),
            ProcessSummary::default()
        );
    }

    #[test]
    fn test_processor_keeps_draining_after_failure() {
        let channel: NotificationChannel<4> = NotificationChannel::new();
        let sender = channel.sender();
        let mut processor = NotificationProcessor::new(channel.receiver());
        let mut indicator: Indicator<MockStrip, 1> =
            Indicator::new(MockStrip::failing(), &IndicatorConfig::default());

        sender.try_send(Notification::battery(3300)).unwrap();
        sender.try_send(Notification::link(true, 1)).unwrap();
        sender.try_send(Notification::layer(1)).unwrap();

        let summary = processor.process_pending(&mut indicator, ms(0));
        assert_eq!(summary.handled, 3);
        assert_eq!(summary.rendered, 3);
        assert_eq!(summary.fault, Some(StripError::Transport));
        assert_eq!(indicator.snapshot().layer.active, 1);
        assert_eq!(indicator.output().strip().attempts, 3);
    }
}
