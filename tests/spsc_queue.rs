//! End-to-end tests over the heapless ring with a consumer thread.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};
use heapless::spsc::Queue;

use stepper_segments::motion::{MotionSegment, SegmentExecutor};
use stepper_segments::{
    play_next, EnableConfig, MotorOperations, MovementRequest, SpscMotionQueue, MOTOR_COUNT,
};

/// Enable pin that counts level changes made while a segment is playing.
struct WatchedPin<'a> {
    playing: &'a AtomicBool,
    toggles_in_motion: &'a AtomicUsize,
    toggles: usize,
}

impl ErrorType for WatchedPin<'_> {
    type Error = Infallible;
}

impl WatchedPin<'_> {
    fn record(&mut self) {
        self.toggles += 1;
        if self.playing.load(Ordering::SeqCst) {
            self.toggles_in_motion.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl OutputPin for WatchedPin<'_> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record();
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record();
        Ok(())
    }
}

#[test]
fn blocking_enqueue_with_slow_consumer() {
    // Room for three segments; the move below needs more than that.
    let mut ring: Queue<MotionSegment, 4> = Queue::new();
    let (producer, mut consumer) = ring.split();
    let pin = PinMock::new(&[Transaction::set(State::Low), Transaction::set(State::High)]);
    let axes = [200_000, -130_000, 5];

    let (pulses, played) = thread::scope(|scope| {
        let player = scope.spawn(move || {
            let mut pulses = [0u64; MOTOR_COUNT];
            let mut played = Vec::new();
            while played.len() < 7 {
                let took = play_next(&mut consumer, |segment| {
                    let counts = SegmentExecutor::new(*segment).run_to_completion();
                    for (total, count) in pulses.iter_mut().zip(counts) {
                        *total += u64::from(count);
                    }
                    played.push(*segment);
                });
                if !took {
                    thread::yield_now();
                }
            }
            (pulses, played)
        });

        let queue = SpscMotionQueue::new(producer, pin, EnableConfig::default());
        let mut ops = MotorOperations::builder().queue(queue).build().unwrap();

        ops.motor_enable(true).unwrap();
        ops.enqueue(&MovementRequest::from_axes(&axes, 0.0, 4000.0))
            .unwrap();
        ops.motor_enable(false).unwrap();
        assert_eq!(ops.queue().pending(), 0);

        let (_, mut pin) = ops.into_queue().release();
        pin.done();

        player.join().unwrap()
    });

    // 200_000 / 32767 + 1
    assert_eq!(played.len(), 7);
    assert_eq!(pulses[0], 200_000);
    assert_eq!(pulses[1], 130_000);
    assert_eq!(pulses[2], 5);
    assert!(played.iter().all(|s| s.is_reverse(1)));
}

#[test]
fn motors_stay_enabled_until_last_segment_finishes() {
    let playing = AtomicBool::new(false);
    let toggles_in_motion = AtomicUsize::new(0);
    let mut ring: Queue<MotionSegment, 4> = Queue::new();
    let (producer, mut consumer) = ring.split();

    thread::scope(|scope| {
        let playing = &playing;
        let player = scope.spawn(move || {
            while !play_next(&mut consumer, |segment| {
                playing.store(true, Ordering::SeqCst);
                SegmentExecutor::new(*segment).run_to_completion();
                thread::sleep(Duration::from_millis(200));
                playing.store(false, Ordering::SeqCst);
            }) {
                thread::yield_now();
            }
        });

        let pin = WatchedPin {
            playing,
            toggles_in_motion: &toggles_in_motion,
            toggles: 0,
        };
        let queue = SpscMotionQueue::new(producer, pin, EnableConfig::default());
        let mut ops = MotorOperations::builder().queue(queue).build().unwrap();

        ops.enqueue(&MovementRequest::from_axes(&[1000], 100.0, 100.0))
            .unwrap();
        ops.motor_enable(false).unwrap();

        let (_, pin) = ops.into_queue().release();
        assert_eq!(pin.toggles, 1);
        player.join().unwrap();
    });

    assert_eq!(toggles_in_motion.load(Ordering::SeqCst), 0);
}

#[test]
fn segments_arrive_in_playback_order() {
    let mut ring: Queue<MotionSegment, 8> = Queue::new();
    let (producer, mut consumer) = ring.split();
    let queue = SpscMotionQueue::new(producer, PinMock::new(&[]), EnableConfig::default());
    let mut ops = MotorOperations::builder().queue(queue).build().unwrap();

    let request = MovementRequest::from_axes(&[90_000], 3000.0, 0.0);
    ops.enqueue(&request).unwrap();
    assert_eq!(ops.queue().pending(), 3);

    let expected: Vec<_> = ops.synthesizer().plan(&request).unwrap().collect();
    let mut received = Vec::new();
    while play_next(&mut consumer, |segment| received.push(*segment)) {}
    assert_eq!(received, expected);

    let (_, mut pin) = ops.into_queue().release();
    pin.done();
}
