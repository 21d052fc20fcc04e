// Source de premiers injectée dans la génération de clés

mod primes;

pub use primes::{PrimeSource, MillerRabinSource, FixedPrimes, is_probable_prime};
