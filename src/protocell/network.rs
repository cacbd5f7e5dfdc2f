//! Random chemical reaction network construction.

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::Rng;

/// Guard added to row sums so fully masked rows divide cleanly to zero.
const ROW_SUM_EPS: f64 = 1e-12;

/// Build a directed reaction graph over `n` species.
///
/// Edge weights are uniform in [0, 1), each kept independently with
/// probability `density`. The diagonal is forced to zero (no
/// self-reaction) and every row is normalized into a transition
/// probability distribution. A row whose every edge was masked away stays
/// all-zero rather than becoming NaN.
pub fn build_reaction_network(n: usize, density: f64, rng: &mut StdRng) -> DMatrix<f64> {
    let mut adj = DMatrix::from_fn(n, n, |_, _| rng.gen::<f64>());
    let mask: Vec<bool> = (0..n * n).map(|_| rng.gen::<f64>() < density).collect();

    for i in 0..n {
        for j in 0..n {
            if i == j || !mask[i * n + j] {
                adj[(i, j)] = 0.0;
            }
        }
    }

    for i in 0..n {
        let row_sum: f64 = adj.row(i).sum() + ROW_SUM_EPS;
        for j in 0..n {
            adj[(i, j)] /= row_sum;
        }
    }

    adj
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn rows_are_stochastic_or_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let adj = build_reaction_network(20, 0.6, &mut rng);

        for i in 0..20 {
            let row_sum: f64 = adj.row(i).sum();
            let row_is_empty = adj.row(i).iter().all(|&w| w == 0.0);
            assert!(
                row_is_empty || (row_sum - 1.0).abs() < 1e-9,
                "row {i} sums to {row_sum}"
            );
        }
    }

    #[test]
    fn diagonal_is_exactly_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let adj = build_reaction_network(15, 1.0, &mut rng);
        for i in 0..15 {
            assert_eq!(adj[(i, i)], 0.0);
        }
    }

    #[test]
    fn zero_density_yields_empty_graph() {
        let mut rng = StdRng::seed_from_u64(3);
        let adj = build_reaction_network(10, 0.0, &mut rng);
        assert!(adj.iter().all(|&w| w == 0.0));
    }

    #[test]
    fn single_species_is_degenerate_but_finite() {
        let mut rng = StdRng::seed_from_u64(11);
        let adj = build_reaction_network(1, 1.0, &mut rng);
        assert_eq!(adj[(0, 0)], 0.0);
    }

    #[test]
    fn weights_are_non_negative() {
        let mut rng = StdRng::seed_from_u64(19);
        let adj = build_reaction_network(12, 0.3, &mut rng);
        assert!(adj.iter().all(|&w| w >= 0.0 && w.is_finite()));
    }
}
