use crate::geom::point::Point;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid path data: {0}")]
    InvalidInput(String),

    #[error("pin set is empty")]
    EmptyPinSet,

    #[error("point {point} is not on the board (0..={size})")]
    OutOfBounds { point: Point, size: u32 },

    #[error("path element {index} should be of length 1, but is of length {length}")]
    NotUnitLength { index: usize, length: u32 },

    #[error("path element {index} starts and ends at the same point")]
    DegenerateSegment { index: usize },

    #[error("cannot place {requested} pins on a board with {holes} holes")]
    TooManyPins { requested: usize, holes: usize },

    #[error("pin {0} appears more than once")]
    DuplicatePin(Point),
}
