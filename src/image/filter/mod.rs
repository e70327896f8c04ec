use crate::image::Image;
use crate::GradientDirection;
use self::{kernel::Kernel,gauss_kernel::GaussKernel1D,prewitt_kernel::PrewittKernel};

pub mod gauss_kernel;
pub mod prewitt_kernel;
pub mod kernel;


/// Convolution along one axis, replicating the border samples.
pub fn filter_1d_convolution(source: &Image, filter_direction: GradientDirection, filter_kernel: &dyn Kernel) -> Image {
    let kernel = filter_kernel.kernel();
    let kernel_radius_signed = filter_kernel.radius() as isize;
    let normalizing_constant = filter_kernel.normalizing_constant();

    let buffer = &source.buffer;
    let width = buffer.ncols();
    let height = buffer.nrows();
    let mut target = Image::empty(width, height);

    for x in 0..width {
        for y in 0..height {
            let mut acc = 0.0;
            for kernel_idx in -kernel_radius_signed..kernel_radius_signed+1 {
                let sample_value = match filter_direction {
                    GradientDirection::HORIZONTAL => {
                        let sample_idx = ((x as isize)+kernel_idx).clamp(0, width as isize - 1) as usize;
                        buffer[(y,sample_idx)]
                    },
                    GradientDirection::VERTICAL => {
                        let sample_idx = ((y as isize)+kernel_idx).clamp(0, height as isize - 1) as usize;
                        buffer[(sample_idx,x)]
                    }
                };

                acc += sample_value*kernel[(kernel_idx + kernel_radius_signed) as usize];
            }

            target.buffer[(y,x)] = acc/normalizing_constant;
        }
    }

    target
}

pub fn gaussian_2_d_convolution(image: &Image, sigma: crate::Float, radius: crate::Float) -> Image {
    let kernel = GaussKernel1D::new(0.0, sigma, radius);
    let horizontal = filter_1d_convolution(image, GradientDirection::HORIZONTAL, &kernel);
    filter_1d_convolution(&horizontal, GradientDirection::VERTICAL, &kernel)
}

/// Central difference gradients (x, y) of the whole image.
pub fn gradient_images(image: &Image) -> (Image, Image) {
    let kernel = PrewittKernel::new();
    (filter_1d_convolution(image, GradientDirection::HORIZONTAL, &kernel), filter_1d_convolution(image, GradientDirection::VERTICAL, &kernel))
}
