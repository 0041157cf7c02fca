//! Local extrema of a sampled curve, via sign changes in the discrete
//! derivative. Used once per sweep, on the baseline (zero forcing)
//! sample, to partition the domain into branch bands.

use serde::{Deserialize, Serialize};

/// Adjacent grid indices straddling a local extremum.
///
/// Minima and maxima are not distinguished; branch classification only
/// needs the ordered boundary positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extremum {
    pub left: usize,
    pub right: usize,
}

/// Finds every local extremum of the sampled values, in ascending
/// index order.
///
/// The initial trend is seeded from `values[1] - values[0]`; each time
/// the trend of consecutive differences reverses, the index pair where
/// it turned is recorded. Fewer than three samples cannot contain an
/// interior extremum and yield an empty result.
pub fn find_extrema(values: &[f64]) -> Vec<Extremum> {
    let mut extrema = Vec::new();
    if values.len() < 3 {
        return extrema;
    }

    let mut rising = values[1] - values[0] >= 0.0;
    for i in 1..values.len() - 1 {
        let diff = values[i + 1] - values[i];
        if !rising && diff > 0.0 {
            extrema.push(Extremum {
                left: i,
                right: i + 1,
            });
            rising = true;
        } else if rising && diff < 0.0 {
            extrema.push(Extremum {
                left: i,
                right: i + 1,
            });
            rising = false;
        }
    }

    extrema
}

#[cfg(test)]
mod tests {
    use super::{find_extrema, Extremum};

    #[test]
    fn detects_peak_and_trough() {
        let values = [0.0, 1.0, 2.0, 1.0, 0.0, -1.0, 0.0, 1.0];
        let extrema = find_extrema(&values);
        assert_eq!(
            extrema,
            vec![
                Extremum { left: 2, right: 3 },
                Extremum { left: 5, right: 6 },
            ]
        );
    }

    #[test]
    fn monotone_sequences_have_no_extrema() {
        assert!(find_extrema(&[0.0, 1.0, 2.0, 3.0]).is_empty());
        assert!(find_extrema(&[3.0, 2.0, 1.0, 0.0]).is_empty());
    }

    #[test]
    fn short_inputs_yield_nothing() {
        assert!(find_extrema(&[]).is_empty());
        assert!(find_extrema(&[1.0]).is_empty());
        assert!(find_extrema(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn single_peak() {
        let values = [0.0, 2.0, 3.0, 2.0, 0.0];
        assert_eq!(find_extrema(&values), vec![Extremum { left: 2, right: 3 }]);
    }

    #[test]
    fn initial_downward_trend_seeds_correctly() {
        let values = [3.0, 1.0, 0.0, 1.0, 3.0];
        assert_eq!(find_extrema(&values), vec![Extremum { left: 2, right: 3 }]);
    }
}
