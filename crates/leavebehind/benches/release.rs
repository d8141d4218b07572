use criterion::{black_box, criterion_group, criterion_main, Criterion};
use leavebehind::{
    decide_release, ClampingEpsilon, FrameClock, Gravity, LeaveBehindConfig, LeaveBehindLayout,
    PanelGeometry, PanelParameters, PointerEvent, StickingPoint,
};

fn sample_geometry() -> PanelGeometry {
    let mut geometry = PanelGeometry::at_rest(
        1000,
        (PanelParameters::center(), 1000),
        Some((
            PanelParameters::left().with_clamping_point_epsilon(ClampingEpsilon::Px(16)),
            200,
        )),
        Some((
            PanelParameters::right()
                .with_sticking_point(StickingPoint::View)
                .with_sticking_point_epsilon(12),
            150,
        )),
    );
    geometry.offset_children(None, -120);
    geometry
}

fn release_decision(c: &mut Criterion) {
    let geometry = sample_geometry();

    c.bench_function("decide_release", |b| {
        b.iter(|| {
            for velocity in [-3000.0, -200.0, 0.0, 400.0, 2500.0] {
                black_box(decide_release(
                    black_box(&geometry),
                    Gravity::Center,
                    black_box(-120),
                    velocity,
                    1500.0,
                ));
            }
        });
    });
}

fn drag_clamping(c: &mut Criterion) {
    let geometry = sample_geometry();

    c.bench_function("clamp_move", |b| {
        b.iter(|| {
            for proposed in (-400..400).step_by(16) {
                black_box(geometry.clamp_move(Gravity::Center, proposed, proposed));
            }
        });
    });
}

fn swipe_gesture(c: &mut Criterion) {
    let clock = FrameClock::new();
    let layout = LeaveBehindLayout::new(LeaveBehindConfig::default(), clock.clone());
    layout.add_child(PanelParameters::center());
    layout.add_child(PanelParameters::left());
    layout.layout(1000, &[1000, 200]).expect("layout");

    c.bench_function("swipe_and_settle", |b| {
        b.iter(|| {
            layout.on_touch_event(PointerEvent::down(500.0, 50.0, 0));
            for step in 1..=12u64 {
                let x = 500.0 + step as f32 * 15.0;
                layout.on_touch_event(PointerEvent::moved(x, 50.0, step * 8));
            }
            layout.on_touch_event(PointerEvent::up(680.0, 50.0, 200));
            let mut frame = 0;
            while clock.has_frame_callbacks() {
                frame += 16_666_667;
                clock.drain_frame_callbacks(frame);
            }
            layout.reset(false);
        });
    });
}

criterion_group!(benches, release_decision, drag_clamping, swipe_gesture);
criterion_main!(benches);
