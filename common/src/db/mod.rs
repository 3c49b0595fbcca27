pub mod case;
pub mod cluster;
pub mod indices;
pub mod parser;
pub mod paths;
