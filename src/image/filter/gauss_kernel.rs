use crate::{Float,float};
use float::consts::PI;
use super::kernel::Kernel;


pub struct GaussKernel1D {
    kernel: Vec<Float>,
    normalizing_constant: Float
}

impl GaussKernel1D {
    fn sample(mean: Float, std: Float, x:Float) -> Float {
        let exponent = (-0.5*((x-mean)/std).powi(2)).exp();
        let factor = 1.0/(std*(2.0*PI).sqrt());
        factor*exponent
    }

    /// Sampled on the integers in [-radius, radius], normalized so the taps sum to one.
    pub fn new(mean: Float, std: Float, radius: Float) -> GaussKernel1D {
        let radius_isize = radius.trunc() as isize;
        let kernel: Vec<Float> = (-radius_isize..radius_isize+1).map(|x| GaussKernel1D::sample(mean,std,x as Float)).collect();
        let normalizing_constant = kernel.iter().sum();
        GaussKernel1D { kernel, normalizing_constant }
    }
}

impl Kernel for GaussKernel1D {
    fn kernel(&self) -> &Vec<Float> {
        &self.kernel
    }

    fn normalizing_constant(&self) -> Float {
        self.normalizing_constant
    }
}
