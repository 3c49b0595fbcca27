pub mod bounds;
pub mod point;
pub mod segment;
pub mod staircase;

pub use bounds::BoardBounds;
pub use point::Point;
pub use segment::PathElement;
pub use staircase::connect;
