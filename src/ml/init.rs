// Xavier (Glorot) uniform initialisation, through burn's Initializer.
//
//   limit = sqrt(6 / (fan_in + fan_out))
//   w ~ U[-limit, limit]
//
// Every row is treated as its own [1, dim] weight, so the fans are
// fixed at fan_in = dim, fan_out = 1 whatever the row count.
// Reproducible runs seed the backend (B::seed) before calling.

use burn::{module::Param, nn::Initializer, prelude::*};

/// `rows` Xavier-uniform rows of width `dim`, row-major.
pub fn xavier_rows<B: Backend>(rows: usize, dim: usize, device: &B::Device) -> Vec<f32> {
    if rows == 0 || dim == 0 {
        return Vec::new();
    }
    let weights: Param<Tensor<B, 2>> =
        Initializer::XavierUniform { gain: 1.0 }.init_with([rows, dim], Some(dim), Some(1), device);
    weights.val().into_data().iter::<f32>().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_rows_stay_in_bounds() {
        let out   = xavier_rows::<NdArray>(20, 50, &Default::default());
        let limit = (6.0f32 / 51.0).sqrt();

        assert_eq!(out.len(), 1000);
        assert!(out.iter().all(|w| w.abs() <= limit));
        // Not degenerate: both signs show up
        assert!(out.iter().any(|w| *w > 0.0) && out.iter().any(|w| *w < 0.0));
    }

    #[test]
    fn test_bound_ignores_row_count() {
        // One row or many, the fans stay (dim, 1)
        let limit = (6.0f32 / 3.0).sqrt();
        let out   = xavier_rows::<NdArray>(500, 2, &Default::default());
        assert!(out.iter().all(|w| w.abs() <= limit));
        assert!(out.iter().any(|w| w.abs() > (6.0f32 / 502.0).sqrt()));
    }

    #[test]
    fn test_no_rows_is_empty() {
        assert!(xavier_rows::<NdArray>(0, 8, &Default::default()).is_empty());
    }
}
