use std::collections::VecDeque;
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use num_integer::Integer;
use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::debug;
use crate::config::{KeyGenConfig, DEFAULT_MR_ROUNDS};
use crate::crypto_error::CryptoError;

// ---------------------------------------------------------------------------
// Table de petits premiers impairs (crible préliminaire, couvre jusqu'à 997)
// ---------------------------------------------------------------------------
const SMALL_PRIMES: &[u64] = &[
      3,   5,   7,  11,  13,  17,  19,  23,  29,  31,
     37,  41,  43,  47,  53,  59,  61,  67,  71,  73,
     79,  83,  89,  97, 101, 103, 107, 109, 113, 127,
    131, 137, 139, 149, 151, 157, 163, 167, 173, 179,
    181, 191, 193, 197, 199, 211, 223, 227, 229, 233,
    239, 241, 251, 257, 263, 269, 271, 277, 281, 283,
    293, 307, 311, 313, 317, 331, 337, 347, 349, 353,
    359, 367, 373, 379, 383, 389, 397, 401, 409, 419,
    421, 431, 433, 439, 443, 449, 457, 461, 463, 467,
    479, 487, 491, 499, 503, 509, 521, 523, 541, 547,
    557, 563, 569, 571, 577, 587, 593, 599, 601, 607,
    613, 617, 619, 631, 641, 643, 647, 653, 659, 661,
    673, 677, 683, 691, 701, 709, 719, 727, 733, 739,
    743, 751, 757, 761, 769, 773, 787, 797, 809, 811,
    821, 823, 827, 829, 839, 853, 857, 859, 863, 877,
    881, 883, 887, 907, 911, 919, 929, 937, 941, 947,
    953, 967, 971, 977, 983, 991, 997,
];

// Les safe primes trop courts n'existent pas avec deux bits de tête forcés
const MIN_SAFE_PRIME_BITS: u64 = 16;

// ===========================================================================
// Fournisseur de premiers
//
// La génération de clés ne dépend que de ce trait : la façon dont les
// premiers sont obtenus (tirage aléatoire + Miller-Rabin, valeurs fixes pour
// les tests) reste hors du cœur cryptographique.
// ===========================================================================
pub trait PrimeSource {
    /// Retourne un premier (probable) de `bits` bits.
    fn generate_prime(&mut self, bits: u64) -> Result<BigUint, CryptoError>;
}

// ===========================================================================
// Tirage uniforme + test de Miller-Rabin
// ===========================================================================
pub struct MillerRabinSource<R> {
    rng:         R,
    rounds:      u32,
    safe_primes: bool,
}

impl MillerRabinSource<OsRng> {
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for MillerRabinSource<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> MillerRabinSource<R> {
    pub fn with_rng(rng: R) -> Self {
        MillerRabinSource {
            rng,
            rounds:      DEFAULT_MR_ROUNDS,
            safe_primes: false,
        }
    }

    pub fn from_config(config: &KeyGenConfig, rng: R) -> Self {
        MillerRabinSource {
            rng,
            rounds:      config.miller_rabin_rounds,
            safe_primes: config.safe_primes,
        }
    }

    pub fn rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn safe_primes(mut self, safe_primes: bool) -> Self {
        self.safe_primes = safe_primes;
        self
    }

    // -----------------------------------------------------------------------
    // Premier aléatoire de exactement `bits` bits.
    // Les deux bits de tête sont forcés à 1 : n = p·q a alors exactement
    // 2·bits bits.
    // -----------------------------------------------------------------------
    fn random_prime(&mut self, bits: u64) -> BigUint {
        let mut candidates = 0u64;
        loop {
            candidates += 1;

            let mut candidate = self.rng.gen_biguint(bits);
            candidate.set_bit(bits - 1, true);
            candidate.set_bit(bits - 2, true);
            candidate.set_bit(0, true);

            if is_probable_prime(&candidate, self.rounds, &mut self.rng) {
                debug!(bits, candidates, "premier trouvé");
                return candidate;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Safe prime p = 2p' + 1 de `bits` bits, p' premier de bits-1 bits.
    // Le crible combiné élimine la plupart des p' avant tout Miller-Rabin.
    // -----------------------------------------------------------------------
    fn random_safe_prime(&mut self, bits: u64) -> BigUint {
        let mut candidates = 0u64;
        loop {
            candidates += 1;

            let mut sophie_germain = self.rng.gen_biguint(bits - 1);
            sophie_germain.set_bit(bits - 2, true);
            sophie_germain.set_bit(bits - 3, true);
            sophie_germain.set_bit(0, true);

            if combined_sieve(&sophie_germain) {
                continue;
            }
            if !is_probable_prime(&sophie_germain, self.rounds, &mut self.rng) {
                continue;
            }

            let safe_prime = (&sophie_germain << 1u32) + BigUint::one();
            if is_probable_prime(&safe_prime, self.rounds, &mut self.rng) {
                debug!(bits, candidates, "safe prime trouvé");
                return safe_prime;
            }
        }
    }
}

impl<R: RngCore + CryptoRng> PrimeSource for MillerRabinSource<R> {
    fn generate_prime(&mut self, bits: u64) -> Result<BigUint, CryptoError> {
        let minimum = if self.safe_primes { MIN_SAFE_PRIME_BITS } else { 4 };
        if bits < minimum {
            return Err(CryptoError::InvalidArgument(format!(
                "premier de {bits} bits demandé, minimum {minimum}"
            )));
        }
        if self.rounds == 0 {
            return Err(CryptoError::InvalidArgument(
                "au moins un tour de Miller-Rabin est requis".into(),
            ));
        }

        if self.safe_primes {
            Ok(self.random_safe_prime(bits))
        } else {
            Ok(self.random_prime(bits))
        }
    }
}

// ===========================================================================
// Premiers choisis à l'avance — tests déterministes, exemple pédagogique.
// La taille demandée est ignorée : les valeurs sont rendues dans l'ordre.
// ===========================================================================
#[derive(Clone, Debug, Default)]
pub struct FixedPrimes {
    queue: VecDeque<BigUint>,
}

impl FixedPrimes {
    pub fn new<I>(primes: I) -> Self
    where
        I: IntoIterator<Item = BigUint>,
    {
        FixedPrimes { queue: primes.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl PrimeSource for FixedPrimes {
    fn generate_prime(&mut self, _bits: u64) -> Result<BigUint, CryptoError> {
        self.queue
            .pop_front()
            .ok_or_else(|| CryptoError::InvalidArgument("plus aucun premier fixe disponible".into()))
    }
}

// ---------------------------------------------------------------------------
// true si p' ou 2p'+1 est divisible par un petit premier (rejet du candidat)
// ---------------------------------------------------------------------------
fn combined_sieve(sophie_germain: &BigUint) -> bool {
    for &sp in SMALL_PRIMES {
        let bp = BigUint::from(sp);

        // p' égal au petit premier lui-même : vrai premier, ne pas rejeter
        if sophie_germain == &bp {
            return false;
        }

        let r = small_remainder(sophie_germain, sp);
        if r == 0 || (2 * r + 1) % sp == 0 {
            return true;
        }
    }
    false
}

// n mod sp pour sp < 1000 : le reste tient dans un u64
fn small_remainder(n: &BigUint, sp: u64) -> u64 {
    let digits = (n % sp).to_u64_digits();
    digits.first().copied().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Test de primalité probabiliste : division par la table puis `rounds`
// témoins de Miller-Rabin tirés uniformément dans [2, n-2].
// Un composé survit à un tour avec probabilité <= 1/4.
// ---------------------------------------------------------------------------
pub fn is_probable_prime<R: RngCore + ?Sized>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }
    if n == &two {
        return true;
    }
    if n.is_even() {
        return false;
    }
    for &sp in SMALL_PRIMES {
        if n == &BigUint::from(sp) {
            return true;
        }
        if small_remainder(n, sp) == 0 {
            return false;
        }
    }

    // n impair, > 997 et sans petit facteur : n - 1 = 2^s · d, d impair
    let n_minus_1 = n - BigUint::one();
    let s = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> s;

    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_1 {
            continue 'witness;
        }
        for _ in 0..s.saturating_sub(1) {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
            if x.is_one() {
                return false;
            }
        }
        return false;
    }
    true
}
