//! Dent demo: sinks a ball into a floor and prints what the pipeline did.
//!
//! Usage:
//! ```text
//! cargo run --example dent                   # default depth 0.25
//! cargo run --example dent -- 0.4            # custom depth
//! RUST_LOG=dentkit=trace cargo run --example dent
//! ```

mod scene;

use dentkit::{DeformPipeline, DentConfig, Result};

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for dentkit.
    // Override with RUST_LOG env var (e.g. RUST_LOG=dentkit=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("dent=info".parse().unwrap_or_default())
        .add_directive("dentkit=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let depth = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f64>().ok())
        .unwrap_or(0.25);

    let (ball, floor) = scene::ball_on_floor(depth)?;
    let base = ball.mesh.vertices().to_vec();
    let config = DentConfig::default();
    let deformation = DeformPipeline::new(ball, floor)
        .with_config(config)
        .execute()?;
    let report = &deformation.report;

    println!("sink depth             {depth}");
    println!("penetrating vertices   {}", report.inside_count);
    println!("floor samples          {}", report.reciprocal_inside_count);
    println!("rim vertices           {}", report.boundary_count);
    println!("displaced              {}", report.displaced_count);
    println!("indent depth           {:.4}", report.indent_depth);
    println!("indent range           {:.4}", report.indent_range);
    println!("shoulder vertices      {}", report.redistributed_count);
    println!(
        "skipped                {} (no overlap) / {} (no surface hit)",
        report.skipped_no_overlap(),
        report.skipped_no_surface_hit()
    );

    let lowest = deformation
        .target
        .as_slice()
        .iter()
        .map(|p| p.z)
        .fold(f64::INFINITY, f64::min);
    let largest_move = (0..base.len())
        .map(|v| deformation.target.displacement(v, &base).norm())
        .fold(0.0, f64::max);
    println!("lowest local z         {lowest:.4}");
    println!("largest vertex motion  {largest_move:.4}");

    println!("\nshoulder profile (x, indent, volume):");
    let profile = config.indent_profile(report.indent_range);
    for (x, indent, volume) in profile.sample(8) {
        println!("  {x:.3}  {indent:+.4}  {volume:.4}");
    }
    Ok(())
}
