//! Signal bus integration test
//!
//! Subscribers and publishers race on a multi-threaded runtime; every
//! replaying subscriber must run exactly once whichever side wins.

use herald_signals::{ChannelSignalBus, SignalBus, Topics};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_replaying_subscribers_run_exactly_once_under_races() {
    let _ = env_logger::try_init();

    let bus = Arc::new(ChannelSignalBus::new());
    let partners: Vec<String> = (0..16).map(|i| format!("partner-{}", i)).collect();
    let counters: Vec<Arc<AtomicUsize>> =
        partners.iter().map(|_| Arc::new(AtomicUsize::new(0))).collect();

    let mut handles = Vec::new();
    for (partner, counter) in partners.iter().zip(&counters) {
        let topic = Topics::partner_complete(partner);

        // Subscriber
        for _ in 0..8 {
            let bus = bus.clone();
            let topic = topic.clone();
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                tokio::task::yield_now().await;
                bus.subscribe_once(
                    &topic,
                    Box::new(move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }),
                    true,
                )
                .unwrap();
            }));
        }

        // Publisher
        let bus = bus.clone();
        handles.push(tokio::spawn(async move {
            bus.publish(&topic).unwrap();
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    for (partner, counter) in partners.iter().zip(&counters) {
        assert_eq!(
            counter.load(Ordering::SeqCst),
            8,
            "every subscriber of {} should run once",
            partner
        );
        assert!(bus.has_fired(&Topics::partner_complete(partner)));
    }
}

#[tokio::test]
async fn test_custom_topics_fire_independently() {
    let bus = ChannelSignalBus::new();

    let chartbeat = bus.listen("chartbeat.loaded", true).unwrap();
    let cmp = bus.listen(&Topics::partner_complete("cmp"), true).unwrap();

    bus.publish(&Topics::partner_complete("cmp")).unwrap();
    cmp.await.unwrap();
    assert!(!bus.has_fired("chartbeat.loaded"));

    bus.publish("chartbeat.loaded").unwrap();
    chartbeat.await.unwrap();
}
