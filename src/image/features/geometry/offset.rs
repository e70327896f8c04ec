#[derive(Copy,Debug,Clone,PartialEq,Eq,PartialOrd,Ord)]
pub struct Offset {
    pub x: isize,
    pub y: isize
}

impl Offset {
    pub fn angle(&self) -> crate::Float {
        (self.y as crate::Float).atan2(self.x as crate::Float)
    }
}
