//! Runs a few overlays and prints the results.
//!
//! Set `RUST_LOG=flatgeo=trace` to follow the boolean engine.

use flatgeo::operations::transform::Rotate;
use flatgeo::{FlatgeoError, Geometry, LineSegment, Polygon, Rectangle};
use nalgebra::Point2;

fn main() -> Result<(), FlatgeoError> {
    // Default: WARN for everything, INFO for flatgeo.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("flatgeo=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let accuracy = 0.001;
    let parcel = Geometry::Polygon(Polygon::from_ring_ords(vec![
        0.0, 0.0, 10.0, 0.0, 10.0, 8.0, 0.0, 8.0, 0.0, 0.0,
    ])?);
    let building = Geometry::Rectangle(Rectangle::new(3.0, 2.0, 6.0, 5.0)?);
    let road = Geometry::LineSegment(LineSegment::new(-5.0, 4.0, 15.0, 4.0)?);

    println!("relate:       {:?}", parcel.relate(&building, accuracy));
    println!("yard:         {:?}", parcel.less(&building, accuracy));
    println!("road inside:  {:?}", road.intersection(&parcel, accuracy));
    println!("road outside: {:?}", road.less(&parcel, accuracy));

    let tilted = Rotate::new(Point2::new(4.5, 3.5), 0.3).execute(&building)?;
    println!("tilted:       {:?}", tilted.normalize());
    println!("merged:       {:?}", building.union(&tilted, accuracy));
    Ok(())
}
