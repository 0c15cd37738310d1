//! Integration tests for stream-temp.
//!
//! These run the full session stack (source bridge, control loop,
//! dispatcher) with mock sources and channel sinks - no hardware needed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use stream_temp::{
    CapacityStep, ChannelSink, ChannelSource, DisplayUnit, MockSource, Reading, Sink, SinkError,
    StreamConfig, StreamEvent, StreamTemp, WindowSnapshot,
};
use tokio::sync::mpsc;

/// A test sink that counts writes.
struct CountingSink {
    name: String,
    count: AtomicUsize,
}

impl CountingSink {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            count: AtomicUsize::new(0),
        }
    }

    fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Sink for CountingSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&self, _snapshot: &WindowSnapshot) -> Result<(), SinkError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

async fn recv_snapshot(rx: &mut mpsc::Receiver<WindowSnapshot>) -> WindowSnapshot {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for snapshot")
        .expect("snapshot channel closed")
}

#[tokio::test]
async fn test_mock_source_flows_to_channel_sink() {
    let (tx, mut rx) = mpsc::channel::<WindowSnapshot>(32);

    let session = StreamTemp::builder()
        .source(
            MockSource::new()
                .with_measured(0.0)
                .with_measured(100.0)
                .with_measured(50.0),
        )
        .add_sink(ChannelSink::new(tx))
        .start()
        .await
        .unwrap();

    // Default unit is Fahrenheit; readings are Celsius-scaled and
    // converted on the way in. Snapshots arrive in delivery order.
    assert_eq!(recv_snapshot(&mut rx).await.values(), vec![32.0]);
    assert_eq!(recv_snapshot(&mut rx).await.values(), vec![32.0, 212.0]);
    assert_eq!(
        recv_snapshot(&mut rx).await.values(),
        vec![32.0, 212.0, 122.0]
    );

    session.stop().await.unwrap();
}

#[tokio::test]
async fn test_unit_switch_converts_stored_history() {
    let (tx, mut rx) = mpsc::channel::<WindowSnapshot>(32);

    let session = StreamTemp::builder()
        .add_sink(ChannelSink::new(tx))
        .start()
        .await
        .unwrap();

    // 0°C stored as 32.0°F under the default unit
    let snapshot = session.ingest(Reading::Measured(0.0)).await.unwrap();
    assert_eq!(snapshot.values(), vec![32.0]);

    // Switching to Celsius re-expresses history
    let snapshot = session
        .set_display_unit(DisplayUnit::Celsius)
        .await
        .unwrap();
    assert_eq!(snapshot.values(), vec![0.0]);
    assert_eq!(snapshot.unit(), DisplayUnit::Celsius);

    // Already Celsius-equivalent, stored directly
    let snapshot = session.ingest(Reading::Measured(100.0)).await.unwrap();
    assert_eq!(snapshot.values(), vec![0.0, 100.0]);

    // Sinks saw each mutation
    assert_eq!(recv_snapshot(&mut rx).await.values(), vec![32.0]);
    assert_eq!(recv_snapshot(&mut rx).await.values(), vec![0.0]);
    assert_eq!(recv_snapshot(&mut rx).await.values(), vec![0.0, 100.0]);

    session.stop().await.unwrap();
}

#[tokio::test]
async fn test_capacity_adjustment_over_session() {
    let (tx, _rx) = mpsc::channel::<WindowSnapshot>(32);

    let session = StreamTemp::builder()
        .with_config(StreamConfig {
            initial_capacity: 3,
            initial_unit: DisplayUnit::Celsius,
            ..Default::default()
        })
        .add_sink(ChannelSink::new(tx))
        .start()
        .await
        .unwrap();

    for value in [1.0, 2.0, 3.0] {
        session.ingest(Reading::Measured(value)).await.unwrap();
    }

    // Shrink is eager: oldest evicted
    let snapshot = session.adjust_capacity(CapacityStep::Down).await.unwrap();
    assert_eq!(snapshot.capacity(), 2);
    assert_eq!(snapshot.values(), vec![2.0, 3.0]);

    // Growth is lazy: nothing refills
    let snapshot = session.adjust_capacity(CapacityStep::Up).await.unwrap();
    assert_eq!(snapshot.capacity(), 3);
    assert_eq!(snapshot.values(), vec![2.0, 3.0]);

    let stats = session.stats();
    assert_eq!(stats.samples_ingested, 3);
    assert_eq!(stats.samples_evicted, 1);

    session.stop().await.unwrap();
}

#[tokio::test]
async fn test_window_invariant_under_streaming() {
    let (tx, mut rx) = mpsc::channel::<WindowSnapshot>(64);

    let mut source = MockSource::new();
    for i in 0..20 {
        source = source.with_measured(f64::from(i));
    }

    let session = StreamTemp::builder()
        .with_config(StreamConfig {
            initial_capacity: 4,
            initial_unit: DisplayUnit::Celsius,
            ..Default::default()
        })
        .source(source)
        .add_sink(ChannelSink::new(tx))
        .start()
        .await
        .unwrap();

    for _ in 0..20 {
        let snapshot = recv_snapshot(&mut rx).await;
        assert!(snapshot.len() <= snapshot.capacity());
    }

    // After 20 appends into a window of 4, only the newest 4 remain
    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.values(), vec![16.0, 17.0, 18.0, 19.0]);

    session.stop().await.unwrap();
}

#[tokio::test]
async fn test_multiple_sinks_receive_every_snapshot() {
    let (tx, mut rx) = mpsc::channel::<WindowSnapshot>(32);
    let counter = Arc::new(CountingSink::new("counter"));
    let counter_probe = counter.clone();

    struct SharedSink(Arc<CountingSink>);

    #[async_trait]
    impl Sink for SharedSink {
        fn name(&self) -> &str {
            self.0.name()
        }

        async fn write(&self, snapshot: &WindowSnapshot) -> Result<(), SinkError> {
            self.0.write(snapshot).await
        }
    }

    let session = StreamTemp::builder()
        .add_sink(ChannelSink::new(tx))
        .add_sink(SharedSink(counter))
        .start()
        .await
        .unwrap();

    session.ingest(Reading::Measured(20.0)).await.unwrap();
    session.ingest(Reading::Measured(21.0)).await.unwrap();

    assert_eq!(recv_snapshot(&mut rx).await.len(), 1);
    assert_eq!(recv_snapshot(&mut rx).await.len(), 2);

    session.stop().await.unwrap();
    assert_eq!(counter_probe.count(), 2);
}

#[tokio::test]
async fn test_source_disconnect_retains_window_state() {
    let (reading_tx, reading_rx) = mpsc::channel::<Reading>(8);
    let (tx, mut rx) = mpsc::channel::<WindowSnapshot>(32);

    let events: Arc<Mutex<Vec<StreamEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    let session = StreamTemp::builder()
        .source(ChannelSource::with_name("ble", reading_rx))
        .add_sink(ChannelSink::new(tx))
        .on_event(move |e| events_clone.lock().unwrap().push(e))
        .start()
        .await
        .unwrap();

    reading_tx.send(Reading::Measured(25.0)).await.unwrap();
    assert_eq!(recv_snapshot(&mut rx).await.values(), vec![77.0]);

    // Transport goes away; no implicit clearing
    drop(reading_tx);

    // Control operations still work against the retained window
    let snapshot = session
        .set_display_unit(DisplayUnit::Celsius)
        .await
        .unwrap();
    assert_eq!(snapshot.values(), vec![25.0]);

    session.stop().await.unwrap();

    let events = events.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, StreamEvent::SourceStopped { name, .. } if name == "ble")));
}

#[tokio::test]
async fn test_synthetic_readings_from_source() {
    let (tx, mut rx) = mpsc::channel::<WindowSnapshot>(32);

    let session = StreamTemp::builder()
        .source(MockSource::new().with_synthetic().with_synthetic())
        .add_sink(ChannelSink::new(tx))
        .start()
        .await
        .unwrap();

    recv_snapshot(&mut rx).await;
    let snapshot = recv_snapshot(&mut rx).await;
    assert_eq!(snapshot.len(), 2);
    for value in snapshot.values() {
        assert!((0.0..100.0).contains(&value), "synthetic value {value}");
    }

    session.stop().await.unwrap();
}

#[tokio::test]
async fn test_eviction_events_emitted() {
    let (tx, _rx) = mpsc::channel::<WindowSnapshot>(32);

    let events: Arc<Mutex<Vec<StreamEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    let session = StreamTemp::builder()
        .with_config(StreamConfig {
            initial_capacity: 1,
            initial_unit: DisplayUnit::Celsius,
            ..Default::default()
        })
        .add_sink(ChannelSink::new(tx))
        .on_event(move |e| events_clone.lock().unwrap().push(e))
        .start()
        .await
        .unwrap();

    session.ingest(Reading::Measured(10.0)).await.unwrap();
    let snapshot = session.ingest(Reading::Measured(20.0)).await.unwrap();
    assert_eq!(snapshot.values(), vec![20.0]);

    session.stop().await.unwrap();

    let events = events.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, StreamEvent::SamplesEvicted { dropped: 1 })));
}

#[tokio::test]
async fn test_session_reports_running_until_stopped() {
    let (tx, _rx) = mpsc::channel::<WindowSnapshot>(8);

    let session = StreamTemp::builder()
        .add_sink(ChannelSink::new(tx))
        .start()
        .await
        .unwrap();

    assert!(session.is_running());
    session.stop().await.unwrap();
}

#[tokio::test]
async fn test_paced_source_delivers_all_readings() {
    let (tx, mut rx) = mpsc::channel::<WindowSnapshot>(32);

    let session = StreamTemp::builder()
        .source(
            MockSource::new()
                .with_raw(0)
                .with_raw(10000)
                .with_interval(Duration::from_millis(5)),
        )
        .add_sink(ChannelSink::new(tx))
        .start()
        .await
        .unwrap();

    // Raw wire values 0 and 10000 decode to 0°C and 100°C, then convert
    // to the default Fahrenheit on ingestion
    assert_eq!(recv_snapshot(&mut rx).await.values(), vec![32.0]);
    assert_eq!(recv_snapshot(&mut rx).await.values(), vec![32.0, 212.0]);

    session.stop().await.unwrap();
}
