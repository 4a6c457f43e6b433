use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Runs the given randomised test for the given number of iterations.
///
/// The random number generator is seeded once, and the seed is printed such
/// that a failing run can be reproduced with [`random_test_seeded`].
pub fn random_test<F>(iterations: usize, test: F)
where
    F: FnMut(&mut StdRng),
{
    let seed: u64 = rand::rng().random();
    println!("random_test seed: {seed}");
    random_test_seeded(seed, iterations, test);
}

/// Runs the given randomised test with a fixed seed.
pub fn random_test_seeded<F>(seed: u64, iterations: usize, mut test: F)
where
    F: FnMut(&mut StdRng),
{
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..iterations {
        test(&mut rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut first = Vec::new();
        random_test_seeded(42, 10, |rng| first.push(rng.random_range(0..1000)));

        let mut second = Vec::new();
        random_test_seeded(42, 10, |rng| second.push(rng.random_range(0..1000)));

        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
    }
}
