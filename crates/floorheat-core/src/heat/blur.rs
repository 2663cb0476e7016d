use ndarray::{Array2, Axis, Zip};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Normalised 1D Gaussian kernel with radius `ceil(3 sigma)`.
pub fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    let size = 2 * radius + 1;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

/// Blur `data` in place with a separable Gaussian of standard deviation
/// `sigma`, using `scratch` for the intermediate pass. Edges are clamped.
/// `scratch` is resized to match `data` if needed.
pub fn gaussian_blur_in_place(data: &mut Array2<f32>, scratch: &mut Array2<f32>, sigma: f32) {
    if sigma.is_nan() || sigma <= 0.0 || data.is_empty() {
        return;
    }
    if scratch.dim() != data.dim() {
        *scratch = Array2::zeros(data.dim());
    }

    let kernel = make_gaussian_kernel(sigma);
    convolve_rows(data, scratch, &kernel);
    convolve_cols(scratch, data, &kernel);
}

/// Allocating convenience wrapper around [`gaussian_blur_in_place`].
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let mut out = data.clone();
    let mut scratch = Array2::zeros(data.dim());
    gaussian_blur_in_place(&mut out, &mut scratch, sigma);
    out
}

fn convolve_rows(src: &Array2<f32>, dst: &mut Array2<f32>, kernel: &[f32]) {
    let (h, w) = src.dim();
    let radius = kernel.len() / 2;

    let pass = |row: usize, mut out: ndarray::ArrayViewMut1<f32>| {
        for col in 0..w {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let src_col = (col as isize + ki as isize - radius as isize)
                    .clamp(0, w as isize - 1) as usize;
                sum += src[[row, src_col]] * kv;
            }
            out[col] = sum;
        }
    };

    let zip = Zip::indexed(dst.axis_iter_mut(Axis(0)));
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(pass);
    } else {
        zip.for_each(pass);
    }
}

fn convolve_cols(src: &Array2<f32>, dst: &mut Array2<f32>, kernel: &[f32]) {
    let (h, w) = src.dim();
    let radius = kernel.len() / 2;

    let pass = |row: usize, mut out: ndarray::ArrayViewMut1<f32>| {
        for col in 0..w {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let src_row = (row as isize + ki as isize - radius as isize)
                    .clamp(0, h as isize - 1) as usize;
                sum += src[[src_row, col]] * kv;
            }
            out[col] = sum;
        }
    };

    let zip = Zip::indexed(dst.axis_iter_mut(Axis(0)));
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(pass);
    } else {
        zip.for_each(pass);
    }
}
