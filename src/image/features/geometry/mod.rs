pub mod circle;
pub mod offset;
pub mod point;
