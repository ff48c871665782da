//! End-to-end runs of the background on the software backend.

use render::{
    CpuBackend, FrameOutcome, HeadlessHost, LavaBackground, LoopState, ManualClock, Phase,
    RenderError,
};
use sdf::{Rgba, BACKGROUND};

type Background = LavaBackground<HeadlessHost, CpuBackend, ManualClock>;

fn mounted(width: u32, height: u32) -> (Background, ManualClock) {
    let clock = ManualClock::new();
    let mut bg = LavaBackground::new(HeadlessHost::new(width, height), clock.clone());
    bg.mount(|resolution| Ok(CpuBackend::new(resolution)))
        .expect("mount");
    (bg, clock)
}

fn run_frame(bg: &mut Background) -> FrameOutcome {
    let ticket = bg.host_mut().next_frame().expect("a frame should be armed");
    bg.on_frame(ticket).expect("frame")
}

fn pixel(bg: &Background, x: u32, y: u32) -> Rgba {
    bg.backend()
        .and_then(CpuBackend::frame)
        .and_then(|frame| frame.get(x, y))
        .expect("pixel")
}

fn background() -> Rgba {
    BACKGROUND.extend(1.0)
}

// Fresnel shading leaves the face of a blob darker than the backdrop.
fn is_blob_face(c: Rgba) -> bool {
    c != background() && c.x < BACKGROUND.x && c.x >= c.z
}

#[test]
fn first_frame_after_two_seconds() {
    let (mut bg, clock) = mounted(800, 600);
    let r = bg.resolution().unwrap();
    assert_eq!(r.aspect.x, 1.0);
    assert_eq!(r.aspect.y, 0.75);

    clock.advance_secs(2.0);
    assert_eq!(
        run_frame(&mut bg),
        FrameOutcome::Drawn {
            time: 2.0,
            frame: 1,
        }
    );

    assert_eq!(pixel(&bg, 0, 0), background());
    assert_eq!(pixel(&bg, 799, 599), background());
    // Left blob, just off centre.
    assert!(is_blob_face(pixel(&bg, 320, 300)), "{:?}", pixel(&bg, 320, 300));
    // Its silhouette glows.
    let rim = (250..=380).map(|x| pixel(&bg, x, 300).x).fold(0.0_f32, f32::max);
    assert!(rim > 0.25, "brightest rim sample {rim}");
    // At two seconds the view axis passes between the blobs.
    assert_eq!(pixel(&bg, 400, 300), background());
    assert_eq!(bg.host().pending_frames(), 1);
}

#[test]
fn blobs_drift_across_the_centre() {
    let (mut bg, clock) = mounted(800, 600);
    clock.advance_secs(2.0);
    run_frame(&mut bg);
    clock.advance_secs(8.0);
    assert_eq!(
        run_frame(&mut bg),
        FrameOutcome::Drawn {
            time: 10.0,
            frame: 2,
        }
    );
    assert!(is_blob_face(pixel(&bg, 400, 300)), "{:?}", pixel(&bg, 400, 300));
}

#[test]
fn resize_reaches_the_next_frame() {
    let (mut bg, clock) = mounted(64, 48);
    clock.advance_secs(1.0);
    run_frame(&mut bg);

    bg.host_mut().set_size(48, 64);
    bg.on_resize().unwrap();
    let r = bg.resolution().unwrap();
    assert_eq!(r.aspect.x, 0.75);
    assert_eq!(r.aspect.y, 1.0);

    run_frame(&mut bg);
    let frame = bg.backend().and_then(CpuBackend::frame).unwrap();
    assert_eq!((frame.width, frame.height), (48, 64));
}

#[test]
fn collapsed_container_still_renders_one_pixel() {
    let (mut bg, _) = mounted(0, 0);
    let r = bg.resolution().unwrap();
    assert_eq!((r.width, r.height), (1, 1));
    run_frame(&mut bg);
    let frame = bg.backend().and_then(CpuBackend::frame).unwrap();
    assert_eq!(frame.pixels.len(), 1);
}

#[test]
fn unmount_stops_everything() {
    let (mut bg, clock) = mounted(32, 24);
    run_frame(&mut bg);
    let stale = bg.host_mut().next_frame().unwrap();

    bg.unmount().unwrap();
    assert_eq!(bg.phase(), Phase::Disposed);
    assert_eq!(bg.loop_state(), LoopState::Disposed);
    assert!(bg.backend().is_none());
    assert_eq!(bg.host().pending_frames(), 0);
    assert_eq!(bg.host().resize_listeners(), 0);

    clock.advance_secs(5.0);
    assert_eq!(bg.on_frame(stale).unwrap(), FrameOutcome::Ignored);
    bg.host_mut().set_size(100, 100);
    bg.on_resize().unwrap();
    assert_eq!(bg.frames(), 1);
    assert_eq!(bg.host().pending_frames(), 0);

    assert!(bg.unmount().is_ok());
    assert!(matches!(
        bg.mount(|r| Ok(CpuBackend::new(r))),
        Err(RenderError::AlreadyDisposed)
    ));
}

#[test]
fn sixty_frames_at_sixty_hertz() {
    let (mut bg, clock) = mounted(16, 12);
    let mut last = -1.0_f32;
    for _ in 0..60 {
        clock.advance_secs(1.0 / 60.0);
        match run_frame(&mut bg) {
            FrameOutcome::Drawn { time, .. } => {
                assert!(time > last);
                last = time;
            }
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(bg.frames(), 60);
    assert!((bg.time() - 1.0).abs() < 1e-3, "{}", bg.time());
    assert_eq!(bg.backend().map(CpuBackend::draws), Some(60));
}
