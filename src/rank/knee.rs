//! Knee detection over a descending score curve.
//!
//! Absolute score magnitudes vary with paper length, so the cutoff has to
//! come from the shape of the curve. This is the Kneedle construction for
//! decreasing data: normalize, straighten against the diagonal, and take
//! the first local maximum of the difference curve that persists past its
//! sensitivity threshold.

#[derive(Clone, Copy)]
enum Shape {
    Convex,
    Concave,
}

/// How many leading entries of a descending score list to keep.
///
/// Tries the convex reading first (a cliff after the strong scores), then
/// the concave one (a late collapse). `None` means the curve is too short,
/// flat, or linear to carry a knee.
pub fn find_knee(scores: &[f64]) -> Option<usize> {
    detect(scores, Shape::Convex).or_else(|| detect(scores, Shape::Concave))
}

fn detect(scores: &[f64], shape: Shape) -> Option<usize> {
    let n = scores.len();
    if n < 3 {
        return None;
    }
    let max = scores.iter().cloned().fold(f64::MIN, f64::max);
    let min = scores.iter().cloned().fold(f64::MAX, f64::min);
    if max == min {
        return None;
    }

    let x_norm: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    let y_norm: Vec<f64> = scores.iter().map(|s| (s - min) / (max - min)).collect();

    // Rotate the curve into concave-increasing form.
    let y_trans: Vec<f64> = match shape {
        Shape::Convex => y_norm.iter().map(|y| 1.0 - y).collect(),
        Shape::Concave => y_norm.iter().rev().cloned().collect(),
    };
    let y_diff: Vec<f64> = y_trans
        .iter()
        .zip(&x_norm)
        .map(|(y, x)| y - x)
        .collect();

    let maxima: Vec<usize> = (1..n - 1)
        .filter(|&i| y_diff[i] >= y_diff[i - 1] && y_diff[i] >= y_diff[i + 1])
        .collect();

    let sensitivity = 1.0 / (n - 1) as f64;
    for (slot, &lmx) in maxima.iter().enumerate() {
        let threshold = y_diff[lmx] - sensitivity;
        let next_max = maxima.get(slot + 1).copied();
        for j in lmx + 1..n {
            if next_max == Some(j) {
                break;
            }
            if y_diff[j] < threshold {
                // Map the flipped index back for the concave reading.
                let index = match shape {
                    Shape::Convex => lmx,
                    Shape::Concave => n - 1 - lmx,
                };
                return Some(index + 1);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cliff_after_the_strong_scores() {
        assert_eq!(find_knee(&[10.0, 9.0, 1.0, 0.9, 0.8]), Some(3));
    }

    #[test]
    fn late_collapse_uses_the_concave_reading() {
        assert_eq!(find_knee(&[10.0, 9.9, 9.8, 9.7, 1.0]), Some(4));
    }

    #[test]
    fn plateau_then_drop_keeps_the_plateau() {
        assert_eq!(find_knee(&[4.0, 4.0, 4.0, 1.0, 1.0]), Some(3));
    }

    #[test]
    fn flat_and_linear_curves_have_no_knee() {
        assert_eq!(find_knee(&[3.0, 3.0, 3.0, 3.0, 3.0]), None);
        assert_eq!(find_knee(&[5.0, 4.0, 3.0, 2.0, 1.0]), None);
    }

    #[test]
    fn short_inputs_have_no_knee() {
        assert_eq!(find_knee(&[]), None);
        assert_eq!(find_knee(&[7.0]), None);
        assert_eq!(find_knee(&[7.0, 1.0]), None);
    }
}
