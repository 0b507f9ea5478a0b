use image::RgbImage;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::grading::{FilterChain, FilterOp, FilterOpKind};

type Matrix = [[f32; 3]; 3];

/// A filter primitive in pixel space. Each stage clamps its output to [0, 1],
/// as the CSS filter pipeline does between primitives.
#[derive(Clone, Copy, Debug)]
enum Stage {
    /// out = in * slope + intercept, per channel.
    Linear { slope: f32, intercept: f32 },
    Matrix(Matrix),
}

impl Stage {
    fn from_op(op: &FilterOp) -> Self {
        let a = op.amount;
        match op.kind {
            FilterOpKind::Brightness => Stage::Linear {
                slope: a,
                intercept: 0.0,
            },
            FilterOpKind::Contrast => Stage::Linear {
                slope: a,
                intercept: 0.5 - 0.5 * a,
            },
            FilterOpKind::Saturate => Stage::Matrix(saturate_matrix(a)),
            FilterOpKind::Sepia => Stage::Matrix(sepia_matrix(a.clamp(0.0, 1.0))),
            FilterOpKind::Grayscale => Stage::Matrix(grayscale_matrix(a.clamp(0.0, 1.0))),
        }
    }

    #[inline]
    fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            Stage::Linear { slope, intercept } => {
                rgb.map(|c| (c * slope + intercept).clamp(0.0, 1.0))
            }
            Stage::Matrix(m) => {
                let [r, g, b] = rgb;
                [
                    (m[0][0] * r + m[0][1] * g + m[0][2] * b).clamp(0.0, 1.0),
                    (m[1][0] * r + m[1][1] * g + m[1][2] * b).clamp(0.0, 1.0),
                    (m[2][0] * r + m[2][1] * g + m[2][2] * b).clamp(0.0, 1.0),
                ]
            }
        }
    }
}

fn saturate_matrix(s: f32) -> Matrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn sepia_matrix(a: f32) -> Matrix {
    let k = 1.0 - a;
    [
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ]
}

fn grayscale_matrix(a: f32) -> Matrix {
    let k = 1.0 - a;
    [
        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
    ]
}

fn render_row(row: &mut [u8], stages: &[Stage]) {
    for px in row.chunks_exact_mut(3) {
        let mut rgb = [
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
        ];
        for stage in stages {
            rgb = stage.apply(rgb);
        }
        for (dst, v) in px.iter_mut().zip(rgb) {
            *dst = (v * 255.0).round() as u8;
        }
    }
}

/// Render a filter chain onto an RGB image using the W3C Filter Effects
/// formulas. Large images are processed row-parallel.
pub fn apply_chain(src: &RgbImage, chain: &FilterChain) -> RgbImage {
    let mut out = src.clone();
    if chain.is_empty() || src.width() == 0 || src.height() == 0 {
        return out;
    }

    let stages: Vec<Stage> = chain.iter().map(Stage::from_op).collect();
    let row_len = src.width() as usize * 3;
    let pixels = src.width() as usize * src.height() as usize;
    let buf: &mut [u8] = &mut out;

    if pixels >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(row_len)
            .for_each(|row| render_row(row, &stages));
    } else {
        buf.chunks_mut(row_len)
            .for_each(|row| render_row(row, &stages));
    }
    out
}
