use super::*;

#[test]
fn defaults_match_documented_values() {
    let o = DrawOptions::default();
    assert!(o.pixel_shader.is_none());
    assert_eq!(o.color, None);
    assert_eq!(o.fov, None);
    assert!(!o.wireframe);
    assert_eq!(o.rasterizer, RasterizerKind::ScanlineLike);
    assert!(o.near_plane_clip);
}

#[test]
fn with_methods_return_modified_copies() {
    let base = DrawOptions::new().with_color(0xFF11_2233);
    let wire = base.with_wireframe(true);
    let bary = wire.with_rasterizer(RasterizerKind::Barycentric);

    assert!(!base.wireframe);
    assert_eq!(base.rasterizer, RasterizerKind::ScanlineLike);
    assert!(wire.wireframe);
    assert_eq!(bary.rasterizer, RasterizerKind::Barycentric);
    assert_eq!(bary.color, Some(0xFF11_2233));
    assert!(!base.with_near_plane_clip(false).near_plane_clip);
}

#[test]
fn shader_is_shared_between_copies() {
    let shaded = DrawOptions::new().with_pixel_shader(|input| input.color ^ 0x00FF_FFFF);
    let copy = shaded.with_color(1);
    let (Some(a), Some(b)) = (&shaded.pixel_shader, &copy.pixel_shader) else {
        panic!("shader lost on copy");
    };
    assert!(Arc::ptr_eq(a, b));
    assert!(copy.without_pixel_shader().pixel_shader.is_none());

    let input = PixelShaderInput {
        color: 0xFF00_0000,
        normal: Vec3::ZERO,
        projected_pixel: Vec2::ZERO,
        width: 1,
        height: 1,
    };
    assert_eq!(a(input), 0xFFFF_FFFF);
}

#[test]
fn debug_hides_shader_body() {
    let s = format!("{:?}", DrawOptions::new().with_pixel_shader(|i| i.color));
    assert!(s.contains("<fn>"));
}

#[test]
fn draw_config_parses_partial_json() {
    let cfg = DrawConfig::from_json_str(r#"{ "wireframe": true, "rasterizer": "barycentric" }"#)
        .unwrap();
    assert!(cfg.wireframe);
    assert_eq!(cfg.rasterizer, RasterizerKind::Barycentric);
    assert!(cfg.near_plane_clip);

    let opts = cfg.into_options();
    assert!(opts.wireframe);
    assert!(opts.pixel_shader.is_none());
}

#[test]
fn draw_config_accepts_fov_and_scanline_alias() {
    let cfg = DrawConfig::from_json_str(
        r#"{
            "color": 4278190335,
            "fov": { "near_distance": 4.0, "near_plane": [20.0, 15.0], "far_distance": 50.0 },
            "rasterizer": "scanline",
            "near_plane_clip": false
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.color, Some(0xFF00_00FF));
    assert_eq!(cfg.fov.unwrap().near_plane, Vec2::new(20.0, 15.0));
    assert_eq!(cfg.rasterizer, RasterizerKind::ScanlineLike);
    assert!(!cfg.near_plane_clip);
}

#[test]
fn draw_config_errors_are_typed() {
    let err = DrawConfig::from_json_str(r#"{ "wirefrme": true }"#).unwrap_err();
    assert!(matches!(err, RenderError::Serde(_)));

    let err = DrawConfig::from_json_str(
        r#"{ "fov": { "near_distance": 5.0, "near_plane": [1.0, 1.0], "far_distance": 1.0 } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, RenderError::Validation(_)));
}

#[test]
fn rasterizer_kind_serializes_snake_case() {
    let s = serde_json::to_string(&RasterizerKind::ScanlineLike).unwrap();
    assert_eq!(s, "\"scanline_like\"");
}
