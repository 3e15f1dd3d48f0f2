use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use softrender::{
    Color, DrawConfig, DrawOptions, Frame, PixelShaderInput, RasterizerKind, Render, Vec3,
    deg_to_rad, generate_cube_triangles, rotation_about_diagonal,
};

/// One color per cube face.
const FACE_COLORS: [u32; 6] = [
    0xFFFE_4219,
    0xFF85_FE19,
    0xFF19_FEF7,
    0xFF10_62FC,
    0xFF53_5254,
    0xFF07_0707,
];

/// Cube distance from the camera along +z.
const CUBE_DEPTH: f32 = 4.0;

/// Render a spinning cube to PNG frames on the CPU.
#[derive(Parser, Debug)]
#[command(name = "softrender", version)]
struct Cli {
    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames; the cube completes one turn over all of them.
    #[arg(long, default_value_t = 1)]
    frames: u32,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Fill algorithm (overrides `--config`).
    #[arg(long, value_enum)]
    rasterizer: Option<RasterizerChoice>,

    /// Draw triangle outlines only.
    #[arg(long)]
    wireframe: bool,

    /// Rasterize triangles on the worker pool.
    #[arg(long)]
    threaded: bool,

    /// Checkerboard pixel shader, shaded by face orientation.
    #[arg(long)]
    checker: bool,

    /// JSON draw configuration (color, fov, wireframe, rasterizer, near_plane_clip).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at DEBUG level.
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RasterizerChoice {
    Barycentric,
    Scanline,
}

impl From<RasterizerChoice> for RasterizerKind {
    fn from(choice: RasterizerChoice) -> Self {
        match choice {
            RasterizerChoice::Barycentric => RasterizerKind::Barycentric,
            RasterizerChoice::Scanline => RasterizerKind::ScanlineLike,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if cli.frames == 0 {
        anyhow::bail!("--frames must be at least 1");
    }

    let base = base_options(&cli)?;
    let mut render = Render::new(cli.width, cli.height, 4)?;

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("create output dir '{}'", cli.out.display()))?;

    for idx in 0..cli.frames {
        let angle = deg_to_rad(360.0 * idx as f32 / cli.frames as f32);
        draw_cube(&render, &base, angle, cli.threaded)?;

        let path = cli.out.join(format!("frame_{idx:04}.png"));
        write_png(&render.snapshot(), &path)?;
        eprintln!("wrote {}", path.display());

        render.swap_buffer()?;
    }

    Ok(())
}

fn base_options(cli: &Cli) -> anyhow::Result<DrawOptions> {
    let mut opts = match &cli.config {
        Some(path) => {
            let s = std::fs::read_to_string(path)
                .with_context(|| format!("read draw config '{}'", path.display()))?;
            DrawConfig::from_json_str(&s)
                .with_context(|| format!("parse draw config '{}'", path.display()))?
                .into_options()
        }
        None => DrawOptions::default(),
    };
    if let Some(choice) = cli.rasterizer {
        opts = opts.with_rasterizer(choice.into());
    }
    if cli.wireframe {
        opts = opts.with_wireframe(true);
    }
    if cli.checker {
        opts = opts.with_pixel_shader(checker);
    }
    Ok(opts)
}

fn draw_cube(
    render: &Render,
    base: &DrawOptions,
    angle: f32,
    threaded: bool,
) -> anyhow::Result<()> {
    let rotation = rotation_about_diagonal(angle);
    for (idx, tri) in generate_cube_triangles().into_iter().enumerate() {
        let placed = tri.map(|v| {
            let mut p = rotation * v;
            p.z += CUBE_DEPTH;
            p
        });
        let opts = match base.color {
            Some(_) => base.clone(),
            None => base.with_color(FACE_COLORS[(idx / 2) % FACE_COLORS.len()]),
        };
        if threaded {
            render.submit_triangle(&placed, opts)?;
        } else {
            render.draw_triangle(&placed, &opts)?;
        }
    }
    if threaded {
        render.join()?;
    }
    Ok(())
}

/// Alternating dark/light cells 2% of the buffer wide, dimmed for faces turned away from
/// the `(1, 1, 1)` diagonal.
fn checker(input: PixelShaderInput) -> u32 {
    let x = input.projected_pixel.x / input.width as f32;
    let y = input.projected_pixel.y / input.height as f32;
    let even_x = ((x / 0.02).abs() as i64) % 2 == 0;
    let even_y = ((y / 0.02).abs() as i64) % 2 == 0;
    let dark = if even_y { even_x } else { !even_x };

    let cell = if dark { 0xFF11_1111 } else { 0xFFAA_AAAA };
    let facing = input.normal.dot(Vec3::ONE.normalize()).abs();
    Color::scale_rgb(cell, 0.6 + 0.4 * facing)
}

fn write_png(frame: &Frame, path: &Path) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        &frame.to_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
