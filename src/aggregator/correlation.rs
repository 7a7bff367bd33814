//! Leave-one-out inter-subject correlation for one frame.
//!
//! Each subject's heatmap is correlated (Pearson, over flattened cells)
//! against the mean of every other subject's heatmap. The per-subject
//! values are then reduced to a mean and a sample standard deviation.
//!
//! Degenerate inputs are excluded rather than failing:
//! - fewer than `min_subjects` maps -> no statistics
//! - maps on different rasters -> no statistics
//! - a zero-variance map -> that subject's correlation is undefined and dropped
//! - no defined correlations -> no statistics

use crate::heatmap::Heatmap;
use log::debug;
use ndarray::{Array2, Zip};

/// ISC statistics for one frame group
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStats {
    /// Maps that entered the comparison
    pub n_subjects: usize,

    /// Subjects with a defined correlation
    pub n_correlated: usize,

    pub isc_mean: f64,
    pub isc_sd: f64,
}

/// Correlate every map against the rest of the cohort
///
/// **Public** - main entry point for frame scoring
///
/// # Arguments
/// * `maps` - One heatmap per subject, all on the same raster
/// * `min_subjects` - Minimum number of maps required (values below 2 act as 2)
///
/// # Returns
/// `None` when the group is too small, the maps disagree on raster shape,
/// or no correlation is defined
pub fn correlate_frame(maps: &[Heatmap], min_subjects: usize) -> Option<FrameStats> {
    let n = maps.len();
    if n < min_subjects.max(2) {
        return None;
    }

    if !same_shape(maps) {
        debug!("heatmaps on different rasters, frame not scored");
        return None;
    }

    let values: Vec<f64> = leave_one_out_correlations(maps)
        .into_iter()
        .flatten()
        .collect();

    if values.len() < n {
        debug!("{} of {} correlations undefined (zero variance)", n - values.len(), n);
    }

    let (isc_mean, isc_sd) = mean_and_sd(&values)?;

    Some(FrameStats {
        n_subjects: n,
        n_correlated: values.len(),
        isc_mean,
        isc_sd,
    })
}

/// Per-subject leave-one-out correlations, in input order
///
/// Undefined correlations (zero-variance maps) are `None`. Fewer than
/// two maps yield no values.
pub fn leave_one_out_correlations(maps: &[Heatmap]) -> Vec<Option<f64>> {
    if maps.len() < 2 {
        return Vec::new();
    }
    let Some(overall) = overall_mean(maps) else {
        return Vec::new();
    };

    maps.iter()
        .map(|map| {
            let others = leave_one_out_mean(&overall, maps.len(), map);
            pearson(map.cells(), &others)
        })
        .collect()
}

/// Elementwise mean of all maps; `None` if empty or shapes differ
pub fn overall_mean(maps: &[Heatmap]) -> Option<Array2<f64>> {
    let (first, rest) = maps.split_first()?;
    if !same_shape(maps) {
        return None;
    }

    let mut sum = first.cells().clone();
    for map in rest {
        sum += map.cells();
    }
    sum /= maps.len() as f64;

    Some(sum)
}

fn same_shape(maps: &[Heatmap]) -> bool {
    match maps.split_first() {
        Some((first, rest)) => {
            let dim = first.cells().dim();
            rest.iter().all(|map| map.cells().dim() == dim)
        }
        None => true,
    }
}

/// Mean of the other `n - 1` maps, derived from the overall mean
///
/// Uses `(overall * n - map) / (n - 1)`; requires `n >= 2`.
pub fn leave_one_out_mean(overall: &Array2<f64>, n: usize, map: &Heatmap) -> Array2<f64> {
    let n = n as f64;
    let mut others = overall * n;
    others -= map.cells();
    others /= n - 1.0;
    others
}

/// Pearson correlation between two equally-shaped rasters
///
/// Both are centred on their own mean; the result is the dot product of
/// the centred values over the product of their L2 norms. Returns `None`
/// if either raster is constant, or the shapes differ.
pub fn pearson(a: &Array2<f64>, b: &Array2<f64>) -> Option<f64> {
    if a.dim() != b.dim() {
        return None;
    }

    let mean_a = a.mean()?;
    let mean_b = b.mean()?;

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    Zip::from(a).and(b).for_each(|&x, &y| {
        let dx = x - mean_a;
        let dy = y - mean_b;
        dot += dx * dy;
        norm_a += dx * dx;
        norm_b += dy * dy;
    });

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }

    Some(dot / denom)
}

/// Arithmetic mean and sample standard deviation (ddof = 1)
///
/// The deviation is 0.0 for a single value; no values yields `None`.
pub fn mean_and_sd(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;

    let sd = if values.len() > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (ss / (count - 1.0)).sqrt()
    } else {
        0.0
    };

    Some((mean, sd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn map(cells: Array2<f64>) -> Heatmap {
        Heatmap::from_density(cells).unwrap()
    }

    fn sample_maps() -> Vec<Heatmap> {
        vec![
            map(array![[1.0, 2.0, 0.0], [0.0, 1.0, 4.0]]),
            map(array![[3.0, 0.0, 1.0], [2.0, 2.0, 0.0]]),
            map(array![[0.0, 1.0, 1.0], [5.0, 0.5, 0.5]]),
            map(array![[1.0, 1.0, 2.0], [1.0, 0.0, 3.0]]),
        ]
    }

    #[test]
    fn test_shortcut_matches_literal_leave_one_out_mean() {
        let maps = sample_maps();
        let overall = overall_mean(&maps).unwrap();

        for i in 0..maps.len() {
            let shortcut = leave_one_out_mean(&overall, maps.len(), &maps[i]);

            let mut literal = Array2::<f64>::zeros(maps[i].cells().dim());
            for (j, other) in maps.iter().enumerate() {
                if j != i {
                    literal += other.cells();
                }
            }
            literal /= (maps.len() - 1) as f64;

            for (a, b) in shortcut.iter().zip(literal.iter()) {
                assert_relative_eq!(*a, *b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_shortcut_with_two_maps_is_the_other_map() {
        let maps = sample_maps()[..2].to_vec();
        let overall = overall_mean(&maps).unwrap();
        let others = leave_one_out_mean(&overall, 2, &maps[0]);

        for (a, b) in others.iter().zip(maps[1].cells().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pearson_identical_is_one() {
        let a = array![[0.1, 0.4], [0.3, 0.2]];
        assert_relative_eq!(pearson(&a, &a).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_inverted_is_minus_one() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[4.0, 3.0], [2.0, 1.0]];
        assert_relative_eq!(pearson(&a, &b).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_constant_is_undefined() {
        let flat = Array2::from_elem((2, 2), 0.25);
        let a = array![[0.1, 0.4], [0.3, 0.2]];
        assert_eq!(pearson(&flat, &a), None);
        assert_eq!(pearson(&a, &flat), None);
    }

    #[test]
    fn test_pearson_shape_mismatch() {
        let a = Array2::from_elem((2, 2), 1.0);
        let b = Array2::from_elem((2, 3), 1.0);
        assert_eq!(pearson(&a, &b), None);
    }

    #[test]
    fn test_mismatched_rasters_yield_nothing() {
        let small = map(array![[1.0, 2.0], [3.0, 4.0]]);
        let wide = map(array![[1.0, 2.0, 0.0], [0.0, 1.0, 4.0]]);
        let single = map(array![[1.0]]);

        assert_eq!(correlate_frame(&[small.clone(), wide.clone()], 2), None);
        assert_eq!(correlate_frame(&[single.clone(), small.clone()], 2), None);
        assert_eq!(overall_mean(&[single, small]), None);

        let mut maps = sample_maps();
        maps.push(map(array![[1.0]]));
        assert!(leave_one_out_correlations(&maps).is_empty());
        assert_eq!(correlate_frame(&maps, 2), None);
    }

    #[test]
    fn test_mean_and_sd() {
        assert_eq!(mean_and_sd(&[]), None);
        assert_eq!(mean_and_sd(&[0.5]), Some((0.5, 0.0)));

        let (mean, sd) = mean_and_sd(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(mean, 2.5);
        assert_relative_eq!(sd, (5.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_single_map_yields_nothing() {
        let maps = sample_maps()[..1].to_vec();
        assert_eq!(correlate_frame(&maps, 2), None);
        assert_eq!(correlate_frame(&maps, 1), None);
        assert!(leave_one_out_correlations(&maps).is_empty());
    }

    #[test]
    fn test_threshold_above_two() {
        let maps = sample_maps()[..3].to_vec();
        assert_eq!(correlate_frame(&maps, 4), None);
        assert!(correlate_frame(&maps, 3).is_some());
    }

    #[test]
    fn test_identical_maps_score_one() {
        let m = map(array![[1.0, 2.0], [3.0, 4.0]]);
        let stats = correlate_frame(&[m.clone(), m.clone(), m], 2).unwrap();

        assert_eq!(stats.n_subjects, 3);
        assert_eq!(stats.n_correlated, 3);
        assert_relative_eq!(stats.isc_mean, 1.0, epsilon = 1e-12);
        assert_relative_eq!(stats.isc_sd, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_maps_produce_no_stats() {
        let flat = map(Array2::from_elem((2, 2), 1.0));
        assert_eq!(correlate_frame(&[flat.clone(), flat], 2), None);
    }

    #[test]
    fn test_flat_subject_dropped_but_counted() {
        // One subject's map is constant: its own correlation is undefined,
        // yet it still shapes the others' leave-one-out means.
        let flat = map(Array2::from_elem((2, 2), 1.0));
        let a = map(array![[4.0, 0.0], [0.0, 0.0]]);
        let b = map(array![[3.0, 1.0], [0.0, 0.0]]);

        let stats = correlate_frame(&[a, flat, b], 2).unwrap();

        assert_eq!(stats.n_subjects, 3);
        assert_eq!(stats.n_correlated, 2);
    }

    #[test]
    fn test_order_independent() {
        let maps = sample_maps();
        let forward = correlate_frame(&maps, 2).unwrap();

        let mut reversed = maps.clone();
        reversed.reverse();
        let backward = correlate_frame(&reversed, 2).unwrap();

        let mut rotated = maps;
        rotated.rotate_left(1);
        let rotated = correlate_frame(&rotated, 2).unwrap();

        for other in [backward, rotated] {
            assert_eq!(other.n_subjects, forward.n_subjects);
            assert_relative_eq!(other.isc_mean, forward.isc_mean, epsilon = 1e-12);
            assert_relative_eq!(other.isc_sd, forward.isc_sd, epsilon = 1e-12);
        }
    }
}
