//! Prints the line drawing of a unit cube seen from the front.
//!
//! Run with `cargo run --example front_view`; pass `perspective` as the
//! first argument for a perspective view. Set `RUST_LOG=hidline=trace` to
//! follow the pass stage by stage.

use hidline::geometry::{EdgeMesh, MeshRayCaster, PlaneFrame, StandardView};
use hidline::math::{Point3, WORLD_TOLERANCE};
use hidline::params::{ProjectionMode, ProjectionParams};
use hidline::projection::{ProjectionPass, DEFAULT_DASH_LENGTH, DEFAULT_DASH_PERIOD};
use hidline::HidlineError;

fn main() -> Result<(), HidlineError> {
    // Default: WARN for everything, DEBUG for hidline.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("hidline=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mode = match std::env::args().nth(1).as_deref() {
        Some("perspective") => ProjectionMode::Perspective,
        _ => ProjectionMode::Orthographic,
    };

    let positions = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    #[rustfmt::skip]
    let triangles = [
        [0, 2, 1], [0, 3, 2],
        [4, 5, 6], [4, 6, 7],
        [0, 1, 5], [0, 5, 4],
        [2, 3, 7], [2, 7, 6],
        [0, 4, 7], [0, 7, 3],
        [1, 2, 6], [1, 6, 5],
    ];

    let mesh = EdgeMesh::from_triangles(&positions, &triangles, WORLD_TOLERANCE)?;
    let caster = MeshRayCaster::from_triangles(&positions, &triangles)?;
    let view = StandardView::Front.view_params(Point3::new(0.5, 0.5, 0.5), 3.0);
    let frame = PlaneFrame::from_view(&view, mode)?;

    let drawing = ProjectionPass::new(ProjectionParams::new(mode)).execute(&mesh, &frame, &caster)?;

    println!("{mode:?} front view");
    for segment in &drawing.shown {
        println!(
            "  shown  ({:7.1}, {:7.1}) -> ({:7.1}, {:7.1})",
            segment.start.x, segment.start.y, segment.end.x, segment.end.y
        );
    }
    for segment in &drawing.hidden {
        println!(
            "  hidden ({:7.1}, {:7.1}) -> ({:7.1}, {:7.1})",
            segment.start.x, segment.start.y, segment.end.x, segment.end.y
        );
    }
    let dashes = drawing.hidden_dashes(DEFAULT_DASH_LENGTH, DEFAULT_DASH_PERIOD)?;
    println!("  {} dashes for {} hidden runs", dashes.len(), drawing.hidden.len());

    Ok(())
}
