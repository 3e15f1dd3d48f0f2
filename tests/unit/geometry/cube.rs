use super::*;

#[test]
fn vertices_are_unit_cube_corners() {
    let tris = generate_cube_triangles();
    assert_eq!(tris.len(), 12);
    for v in tris.iter().flatten() {
        assert_eq!(v.w, 1.0);
        for c in [v.x, v.y, v.z] {
            assert!(c == 1.0 || c == -1.0);
        }
    }
}

#[test]
fn each_face_is_two_triangles_on_one_plane() {
    let tris = generate_cube_triangles();
    for pair in tris.chunks(2) {
        let shared_axis = (0..3).find(|&axis| {
            let first = pair[0][0][axis];
            pair.iter().flatten().all(|v| v[axis] == first)
        });
        assert!(shared_axis.is_some(), "face not planar: {pair:?}");
        // Shared diagonal.
        assert_eq!(pair[0][0], pair[1][0]);
        assert_eq!(pair[0][2], pair[1][1]);
    }
}

#[test]
fn diagonal_rotation_keeps_axis_and_length() {
    let m = rotation_about_diagonal(1.234);
    let axis = m * Vec4::new(1.0, 1.0, 1.0, 1.0);
    assert!((axis - Vec4::new(1.0, 1.0, 1.0, 1.0)).length() < 1e-5);

    let p = m * Vec4::new(1.0, -1.0, 1.0, 1.0);
    assert!((p.truncate().length() - 3f32.sqrt()).abs() < 1e-5);

    // A third of a turn about (1, 1, 1) cycles the axes.
    let third = rotation_about_diagonal(std::f32::consts::TAU / 3.0) * Vec4::new(1.0, 0.0, 0.0, 1.0);
    assert!((third - Vec4::new(0.0, 1.0, 0.0, 1.0)).length() < 1e-5);
}
