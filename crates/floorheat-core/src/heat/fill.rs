//! Scanline polygon rasterisation into an alpha buffer.

use ndarray::Array2;

use crate::geometry::{bounds, Point};

/// Even-odd interior spans of `poly` along the horizontal line `y`, as sorted
/// `(x_start, x_end)` pairs.
pub fn scanline_spans(poly: &[Point], y: f32) -> Vec<(f32, f32)> {
    let n = poly.len();
    if n < 3 {
        return Vec::new();
    }

    let mut crossings: Vec<f32> = Vec::new();
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (poly[j], poly[i]);
        if (a.y > y) != (b.y > y) {
            crossings.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
        }
        j = i;
    }
    crossings.sort_by(|a, b| a.total_cmp(b));

    crossings
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Visit every pixel whose centre lies inside `poly`, clipped to a
/// `width x height` grid. The callback receives `(col, row)`.
pub fn for_each_covered_pixel(
    poly: &[Point],
    width: usize,
    height: usize,
    mut visit: impl FnMut(usize, usize),
) {
    let Some((lo, hi)) = bounds(poly) else {
        return;
    };
    if width == 0 || height == 0 {
        return;
    }

    let row_start = (lo.y - 0.5).ceil().max(0.0) as usize;
    let row_end = ((hi.y - 0.5).floor().min(height as f32 - 1.0)).max(-1.0);
    if row_end < 0.0 {
        return;
    }

    for row in row_start..=row_end as usize {
        let cy = row as f32 + 0.5;
        for (x0, x1) in scanline_spans(poly, cy) {
            let col_start = (x0 - 0.5).ceil().max(0.0) as usize;
            let col_end = (x1 - 0.5).floor().min(width as f32 - 1.0);
            if col_end < 0.0 {
                continue;
            }
            for col in col_start..=col_end as usize {
                visit(col, row);
            }
        }
    }
}

/// Fill `poly` into `buffer` with per-pixel alpha from `shade`, combined with
/// source-over: `dst = src + dst * (1 - src)`.
pub fn fill_polygon(buffer: &mut Array2<f32>, poly: &[Point], shade: impl Fn(Point) -> f32) {
    let (h, w) = buffer.dim();
    for_each_covered_pixel(poly, w, h, |col, row| {
        let src = shade(Point::new(col as f32 + 0.5, row as f32 + 0.5)).clamp(0.0, 1.0);
        let dst = &mut buffer[[row, col]];
        *dst = src + *dst * (1.0 - src);
    });
}
