use super::*;

#[test]
fn pack_and_unpack_agree() {
    let c = Color::pack(0x12, 0x34, 0x56, 0x78);
    assert_eq!(c, 0x7812_3456);
    assert_eq!(Color::to_rgba8(c), [0x12, 0x34, 0x56, 0x78]);
}

#[test]
fn scale_rgb_keeps_alpha() {
    let c = Color::opaque(200, 100, 50);
    assert_eq!(Color::to_rgba8(Color::scale_rgb(c, 0.5)), [100, 50, 25, 255]);
    assert_eq!(Color::scale_rgb(c, 2.0), c);
    assert_eq!(Color::to_rgba8(Color::scale_rgb(c, -1.0)), [0, 0, 0, 255]);
}

#[test]
fn frame_get_is_bounds_checked() {
    let frame = Frame {
        width: 2,
        height: 2,
        pixels: vec![1, 2, 3, 4],
    };
    assert_eq!(frame.get(1, 1), Some(4));
    assert_eq!(frame.get(2, 0), None);
    assert_eq!(frame.to_rgba8().len(), 16);
}

#[test]
fn deg_to_rad_matches_pi() {
    assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
}

#[test]
fn frame_get_indexes_large_frames_without_overflow() {
    // 70_000 * 70_000 does not fit in u32.
    let frame = Frame {
        width: 70_000,
        height: 70_000,
        pixels: Vec::new(),
    };
    assert_eq!(frame.get(69_999, 69_999), None);
    assert_eq!(frame.get(0, 0), None);
}
