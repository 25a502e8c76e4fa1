//! Split move example.
//!
//! Plans a long three-axis move that exceeds one segment, pushes it through
//! a heapless ring to a consumer thread and prints what the pulse generator
//! would play back.
//!
//! The enable line is a stand-in pin; no hardware is needed.

use std::thread;

use heapless::spsc::Queue;
use stepper_segments::{
    motion::{MotionSegment, Phase, SegmentExecutor, SegmentSynthesizer},
    parse_config, play_next, MotorOperations, MovementRequest, SpscMotionQueue, MOTOR_COUNT,
};

/// Stand-in enable pin that reports its level.
struct PrintPin;

impl embedded_hal::digital::ErrorType for PrintPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for PrintPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        println!("enable line: high");
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        println!("enable line: low");
        Ok(())
    }
}

fn describe(index: usize, segment: &MotionSegment) {
    let phase = match segment.phase {
        Phase::Accelerate(ramp) => format!(
            "accelerate {} loops from index {} (seed {} / 32 cycles)",
            ramp.loops, ramp.series_index, ramp.hires_cycles
        ),
        Phase::Travel { loops, delay_cycles } => {
            format!("travel {} loops at {} cycles/loop", loops, delay_cycles)
        }
        Phase::Decelerate(ramp) => format!(
            "decelerate {} loops from index {} (seed {} / 32 cycles)",
            ramp.loops, ramp.series_index, ramp.hires_cycles
        ),
    };
    println!(
        "  segment {}: dir={:08b} {} fractions={:?}",
        index,
        segment.direction_bits,
        phase,
        &segment.fractions[..3]
    );
}

fn main() {
    println!("=== Split Move Example ===\n");

    let config = parse_config(
        r#"
[timing]
timer_frequency_hz = 200000000.0
max_frequency_hz = 250000.0
"#,
    )
    .expect("Failed to parse config");

    let moves = [
        MovementRequest::from_axes(&[120_000, -60_000, 2_500], 0.0, 8_000.0),
        MovementRequest::from_axes(&[40_000, -20_000, 800], 8_000.0, 8_000.0),
        MovementRequest::from_axes(&[90_000, -45_000, 1_900], 8_000.0, 0.0),
    ];
    let synthesizer = SegmentSynthesizer::new(config.timing).expect("Invalid timing");
    let expected: usize = moves
        .iter()
        .map(|m| synthesizer.plan(m).map(Iterator::count).unwrap_or(0))
        .sum();

    let mut ring: Queue<MotionSegment, 8> = Queue::new();
    let (producer, mut consumer) = ring.split();

    let pulses = thread::scope(|scope| {
        let player = scope.spawn(move || {
            let mut pulses = [0u64; MOTOR_COUNT];
            let mut played = 0;
            while played < expected {
                // The slot is released only after the segment has played.
                let took = play_next(&mut consumer, |segment| {
                    describe(played, segment);
                    let counts = SegmentExecutor::new(*segment).run_to_completion();
                    for (total, count) in pulses.iter_mut().zip(counts) {
                        *total += u64::from(count);
                    }
                });
                if took {
                    played += 1;
                } else {
                    thread::yield_now();
                }
            }
            pulses
        });

        let queue = SpscMotionQueue::new(producer, PrintPin, config.enable);
        let mut ops = MotorOperations::builder()
            .from_config(&config)
            .queue(queue)
            .build()
            .expect("Failed to build operations");

        ops.motor_enable(true).expect("enable failed");
        for (i, request) in moves.iter().enumerate() {
            println!("move {}: {:?} {} -> {}", i, &request.steps[..3], request.v0, request.v1);
            ops.enqueue(request).expect("enqueue failed");
        }
        ops.motor_enable(false).expect("disable failed");

        player.join().expect("consumer panicked")
    });

    println!("\n=== Played Back ===");
    println!("Segments: {}", expected);
    println!("Pulses per axis: {:?}", &pulses[..3]);
}
