use ark_ff::Field;
use ark_std::{rand::RngCore, UniformRand};

/// Generates a random element.
pub fn rand<T: UniformRand, R: RngCore>(rng: &mut R) -> T {
    UniformRand::rand(rng)
}

/// Produces an iterator emitting `n` random elements.
pub fn n_rand<'a, T: UniformRand, R: RngCore>(
    rng: &'a mut R,
    n: usize,
) -> impl ExactSizeIterator<Item = T> + 'a {
    (0..n).map(move |_| rand(rng))
}

/// Generates a random field element which is neither 0 nor 1.
pub fn rand_non_trivial<F: Field, R: RngCore>(rng: &mut R) -> F {
    loop {
        let f = F::rand(rng);
        if !f.is_zero() && !f.is_one() {
            return f;
        }
    }
}
