use crate::Float;

pub trait Kernel {
    // Filter taps, centered
    fn kernel(&self) -> &Vec<Float>;
    // Half of the width of the kernel save the center element
    fn radius(&self) -> usize {
        (self.kernel().len()-1)/2
    }
    fn normalizing_constant(&self) -> Float {
        1.0
    }
}
