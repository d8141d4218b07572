use anyhow::Context;
use leavebehind::prelude::*;
use leavebehind::RawPanelParameters;
use leavebehind_animation::NANOS_PER_MILLI;
use std::time::Duration;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const ROW_WIDTH: i32 = 360;

/// Scripted pointer time. Frames run on the wall clock.
struct Session {
    layout: LeaveBehindLayout,
    clock: FrameClock,
    now_nanos: u64,
}

impl Session {
    fn now_ms(&self) -> u64 {
        self.now_nanos / NANOS_PER_MILLI
    }

    fn wait(&mut self, millis: u64) {
        self.now_nanos += millis * NANOS_PER_MILLI;
    }

    /// Horizontal drag from `from` to `to` in eight samples, `step_ms` apart.
    fn swipe(&mut self, from: f32, to: f32, step_ms: u64, pause_before_up: u64) {
        self.layout
            .on_touch_event(PointerEvent::down(from, 24.0, self.now_ms()));
        for step in 1..=8 {
            self.wait(step_ms);
            let x = from + (to - from) * step as f32 / 8.0;
            self.layout
                .on_touch_event(PointerEvent::moved(x, 24.0, self.now_ms()));
        }
        self.wait(step_ms + pause_before_up);
        self.layout
            .on_touch_event(PointerEvent::up(to, 24.0, self.now_ms()));
    }

    fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.clock.has_frame_callbacks() {
            std::thread::sleep(FRAME_INTERVAL);
            self.clock.drain_now();
            frames += 1;
        }
        frames
    }

    fn report(&self, label: &str, frames: usize) {
        println!(
            "{label:<28} offset {:>5}  ({frames} frames)",
            self.layout.offset()
        );
    }
}

fn build_row() -> anyhow::Result<Session> {
    let clock = FrameClock::new();
    let config = LeaveBehindConfig::default().with_density(2.0);
    let layout = LeaveBehindLayout::new(config, clock.clone());

    layout.add_child(PanelParameters::center());
    layout.add_child(
        PanelParameters::left()
            .with_sticking_point(StickingPoint::None)
            .with_clamping_point_epsilon(ClampingEpsilon::Px(24)),
    );
    layout.add_child(
        PanelParameters::right()
            .with_sticking_point(StickingPoint::View)
            .with_sticking_point_epsilon(16)
            .with_clamping_point(ClampingPoint::Parent),
    );
    layout
        .layout(ROW_WIDTH, &[ROW_WIDTH, 120, 96])
        .context("laying out the demo row")?;

    layout.set_listener(|layout, event| {
        println!("  -> {event:?} at offset {}", layout.offset());
        if let LeaveBehindEvent::Clamped { swiped_right: true } = event {
            log::info!("archive panel fully revealed, resetting row");
            layout.reset(true);
        }
    });

    Ok(Session {
        layout,
        clock,
        now_nanos: 0,
    })
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== LeaveBehind Swipe Demo ===");
    println!("A {ROW_WIDTH} px row with an archive panel on the left");
    println!("and a sticky action tray on the right.");
    println!();

    let mut session = build_row()?;

    println!("Slow drag left, released near the tray width:");
    session.swipe(300.0, 210.0, 16, 120);
    let frames = session.settle();
    session.report("tray snapped open", frames);

    println!("Animated reset:");
    session.layout.reset(true);
    let frames = session.settle();
    session.report("row back at rest", frames);

    println!("Fast fling right toward the archive panel:");
    session.swipe(40.0, 140.0, 4, 0);
    let frames = session.settle();
    session.report("archived and reset", frames);

    println!("Short drag right, released still:");
    session.swipe(100.0, 140.0, 16, 120);
    let frames = session.settle();
    session.report("returned to rest", frames);

    println!();
    println!("Raw parameters with an unknown sentinel:");
    let raw = RawPanelParameters {
        gravity: 1,
        sticking_point: -7,
        ..RawPanelParameters::default()
    };
    match session.layout.add_raw_child(raw) {
        Ok(()) => println!("  accepted"),
        Err(err) => println!("  rejected: {err}"),
    }

    Ok(())
}
