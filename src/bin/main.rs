use lifting_rs::lifting_surface_builder::LiftingSurfaceBuilder;
use lifting_rs::parameters::Parameters;
use lifting_rs::shapes::EllipseGenerator;
use ncollide2d::na::{Point3, Vector3};
use std::error::Error;
use std::fs::File;
use std::io::Write;

/// Elliptic profile of the given chord and thickness ratio, laid in the XZ plane at span
/// position `y` with its leading edge on `x = 0`.
fn elliptic_section(y: f64, chord: f64, thickness: f64) -> Vec<Point3<f64>> {
    let a = chord / 2.0;
    EllipseGenerator::generate(a, a * thickness, 32)
        .iter()
        .map(|p| Point3::new(p.x + a, y, p.y))
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    let params = match std::env::args().nth(1) {
        Some(path) => Parameters::from_reader(File::open(path)?)?,
        None => Parameters::default(),
    };

    // Elliptic planform: the chord at each span station follows a half ellipse.
    let span = 10.0;
    let root_chord = 1.0;
    let outline = EllipseGenerator::generate(root_chord, span / 2.0, 64);

    // Keep the forward half of the outline and order it from one tip to the other.
    let mut stations: Vec<&Point3<f64>> = outline
        .iter()
        .filter(|p| p.x > 0.05 * root_chord)
        .collect();
    stations.sort_by(|a, b| a.y.total_cmp(&b.y));

    let mut builder = LiftingSurfaceBuilder::new();
    for p in stations.iter() {
        builder.add_section(&elliptic_section(p.y, p.x, 0.12));
    }

    let wing = builder.build()?;
    let freestream = Vector3::new(-10.0, 0.0, 0.0);
    let samples = wing.trailing_edge_samples(|_| freestream, &params);

    let mut file = File::create("wake_emission.json")?;
    writeln!(file, "{}", serde_json::to_string_pretty(&samples)?)?;
    println!(
        "Wrote {} trailing edge stations to wake_emission.json",
        samples.len()
    );

    Ok(())
}
