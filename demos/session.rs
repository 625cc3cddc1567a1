//! Drive a drawing session from the command line and print the grid.
//!
//! Run with: cargo run --example session --features tracing -- [dda|bresenham]

use gridpaint::{
    Angle, DrawAlgorithm, EngineError, NullSink, Session, SessionConfig, Tool, Transform, pos,
};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let algo = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "dda".to_string())
        .parse::<DrawAlgorithm>()?;

    let mut sink = NullSink;
    let config = SessionConfig::new()
        .with_size(16, 24)
        .with_draw_algorithm(algo);
    let mut session = Session::new(config)?;

    session.set_tool(&mut sink, Tool::Line);
    session.click(&mut sink, pos(1, 1))?;
    session.click(&mut sink, pos(22, 9))?;

    session.set_tool(&mut sink, Tool::Circle);
    session.click(&mut sink, pos(8, 8))?;
    session.click(&mut sink, pos(8, 13))?;

    session.set_tool(&mut sink, Tool::Point);
    session.click(&mut sink, pos(20, 2))?;

    println!("{}", session.grid());

    let angle = Angle::try_degrees(90.0).map_err(EngineError::from)?;
    session.transform_all(&mut sink, |shape| shape.rotate(angle, pos(12, 8)));
    println!("rotated {angle} about (12, 8):\n{}", session.grid());

    for shape in session.shapes() {
        println!("{shape}");
    }
    Ok(())
}
