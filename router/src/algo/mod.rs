pub mod nearest;
pub mod synthesis;

pub use synthesis::synthesize;
