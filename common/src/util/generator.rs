use crate::error::BoardError;
use crate::geom::bounds::BoardBounds;
use crate::geom::point::Point;
use rand::Rng;
use rand::seq::index::sample;

/// Draws `num_pins` distinct pins uniformly from the board's holes.
pub fn generate_pins<R: Rng + ?Sized>(
    rng: &mut R,
    num_pins: usize,
    bounds: BoardBounds,
) -> Result<Vec<Point>, BoardError> {
    let holes = bounds.holes();
    if num_pins < 2 {
        return Err(BoardError::EmptyPinSet);
    }
    if num_pins > holes {
        return Err(BoardError::TooManyPins {
            requested: num_pins,
            holes,
        });
    }

    let side = bounds.size as usize + 1;
    let mut pins: Vec<Point> = sample(rng, holes, num_pins)
        .into_iter()
        .map(|i| Point::new((i % side) as u32, (i / side) as u32))
        .collect();
    pins.sort();

    log::debug!(
        "Generated {} pins on a {}x{} board",
        num_pins,
        bounds.size,
        bounds.size
    );
    Ok(pins)
}
