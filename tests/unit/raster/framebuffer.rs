use super::*;
use std::sync::Arc;

const RED: u32 = 0xFFFF_0000;
const BLUE: u32 = 0xFF00_00FF;
const WHITE: u32 = 0xFFFF_FFFF;

#[test]
fn new_buffer_is_cleared() {
    let fb = FrameBuffer::new(4, 3, WHITE);
    assert_eq!(fb.pixel_count(), 12);
    assert_eq!(fb.stride_bytes(), 16);
    assert!(fb.is_cleared());
    assert_eq!(fb.color_at(3, 2), Some(WHITE));
    assert_eq!(fb.depth_at(0, 0), Some(MAX_DEPTH));
}

#[test]
fn closer_write_wins_regardless_of_order() {
    let a = FrameBuffer::new(2, 2, WHITE);
    assert!(a.write_pixel(1.0, 1.0, 0.3, RED));
    assert!(!a.write_pixel(1.0, 1.0, 0.6, BLUE));

    let b = FrameBuffer::new(2, 2, WHITE);
    assert!(b.write_pixel(1.0, 1.0, 0.6, BLUE));
    assert!(b.write_pixel(1.0, 1.0, 0.3, RED));

    assert_eq!(a.color_at(1, 1), Some(RED));
    assert_eq!(b.color_at(1, 1), Some(RED));
    assert_eq!(a.depth_at(1, 1), Some(0.3));
}

#[test]
fn equal_depth_last_writer_wins() {
    let fb = FrameBuffer::new(2, 2, WHITE);
    assert!(fb.write_pixel(0.5, 0.5, 0.4, RED));
    assert!(fb.write_pixel(0.5, 0.5, 0.4, BLUE));
    assert_eq!(fb.color_at(0, 0), Some(BLUE));
}

#[test]
fn out_of_bounds_writes_are_dropped() {
    let fb = FrameBuffer::new(3, 3, WHITE);
    let before = fb.snapshot();
    for (x, y) in [
        (-0.5, 1.0),
        (1.0, -0.01),
        (3.0, 1.0),
        (1.0, 3.0),
        (f32::NAN, 1.0),
        (1.0, f32::INFINITY),
    ] {
        assert!(!fb.write_pixel(x, y, 0.0, RED));
    }
    assert!(!fb.write_pixel(1.0, 1.0, f32::NAN, RED));
    assert_eq!(fb.snapshot(), before);
    assert!(fb.is_cleared());
}

#[test]
fn write_marks_dirty_and_clear_restores() {
    let fb = FrameBuffer::new(3, 3, WHITE);
    fb.write_pixel(2.0, 2.0, 0.1, RED);
    assert!(!fb.is_cleared());

    fb.clear(BLUE);
    assert!(fb.is_cleared());
    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(fb.color_at(x, y), Some(BLUE));
            assert_eq!(fb.depth_at(x, y), Some(MAX_DEPTH));
        }
    }
}

#[test]
fn only_committed_writes_mark_dirty() {
    let fb = FrameBuffer::new(2, 2, WHITE);
    assert!(!fb.write_pixel(1.0, 1.0, MAX_DEPTH + 0.5, RED));
    assert!(fb.is_cleared());

    let workers: Vec<_> = (0..4u32)
        .map(|t| {
            let fb = &fb;
            move || fb.write_pixel((t % 2) as f32, (t / 2) as f32, 0.2, RED)
        })
        .collect();
    std::thread::scope(|s| {
        for w in workers {
            s.spawn(w);
        }
    });
    assert!(!fb.is_cleared());
    assert_eq!(fb.snapshot().pixels, vec![RED; 4]);
}

#[test]
fn far_plane_depth_still_lands_on_cleared_pixel() {
    let fb = FrameBuffer::new(1, 1, WHITE);
    assert!(fb.write_pixel(0.0, 0.0, MAX_DEPTH, RED));
    assert!(!fb.write_pixel(0.0, 0.0, MAX_DEPTH + 0.01, BLUE));
    assert_eq!(fb.color_at(0, 0), Some(RED));
}

#[test]
fn concurrent_writers_keep_nearest_depth() {
    let fb = Arc::new(FrameBuffer::new(1, 1, WHITE));
    let threads: Vec<_> = (0..8u32)
        .map(|t| {
            let fb = Arc::clone(&fb);
            std::thread::spawn(move || {
                for i in 0..500u32 {
                    let depth = 0.1 + ((t * 500 + i) % 997) as f32 / 1000.0;
                    fb.write_pixel(0.0, 0.0, depth, t);
                }
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }
    // Depth 0.1 is only produced by thread 0 (index 0) and thread 1 (index 997 % 997 == 0).
    assert_eq!(fb.depth_at(0, 0), Some(0.1));
}

#[test]
fn pointer_views_color_plane() {
    let fb = FrameBuffer::new(2, 1, WHITE);
    fb.write_pixel(1.0, 0.0, 0.5, RED);
    assert_eq!(fb.as_ptr(), fb.color.as_ptr().cast::<u32>());
    assert_eq!(fb.snapshot().pixels, vec![WHITE, RED]);
}
