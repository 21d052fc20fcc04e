use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::trace;
use crate::crypto_error::CryptoError;
use crate::paillier::math::{gcd, power_mod};
use crate::paillier::p_keygen::PublicKey;

// ============================================================================
// Chiffré Paillier : un entier de [0, n²)
// ============================================================================
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ciphertext(BigUint);

impl Ciphertext {
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }
}

impl From<BigUint> for Ciphertext {
    fn from(c: BigUint) -> Self {
        Ciphertext(c)
    }
}

// ---------------------------------------------------------------------------
// Tire r uniformément dans [1, n-1] jusqu'à obtenir gcd(r, n) = 1.
// Un tirage non inversible est quasi impossible pour un n de taille
// cryptographique, mais on boucle plutôt que de le supposer.
// Retourne Err(InvalidArgument) si n < 2 : [1, n-1] est alors vide.
// ---------------------------------------------------------------------------
fn sample_unit<R: RngCore + CryptoRng + ?Sized>(n: &BigUint, rng: &mut R) -> Result<BigUint, CryptoError> {
    if n <= &BigUint::one() {
        return Err(CryptoError::InvalidArgument("module n < 2 : aucun r dans [1, n-1]".into()));
    }
    loop {
        let candidate = rng.gen_biguint_range(&BigUint::one(), n);
        if gcd(&candidate, n).is_one() {
            return Ok(candidate);
        }
        trace!("r non inversible modulo n, nouveau tirage");
    }
}

// ---------------------------------------------------------------------------
// Chiffrement Paillier : c = g^m · r^n  mod n²
//
// Non déterministe : deux chiffrements du même m diffèrent (r frais),
// et se déchiffrent tous deux en m.
// Retourne Err(CryptoError::MessageOutOfRange) si m >= n.
// ---------------------------------------------------------------------------
pub fn p_encrypt_with_rng<R>(m: &BigUint, pk: &PublicKey, rng: &mut R) -> Result<Ciphertext, CryptoError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if m >= &pk.n {
        return Err(CryptoError::MessageOutOfRange);
    }

    let r = sample_unit(&pk.n, rng)?;

    let g_m = power_mod(&pk.g, m, &pk.n_squared)?;
    let r_n = power_mod(&r, &pk.n, &pk.n_squared)?;

    Ok(Ciphertext((&g_m * &r_n) % &pk.n_squared))
}

// Chiffrement avec l'entropie système (OsRng, utilisable depuis n'importe quel thread)
pub fn p_encrypt(m: &BigUint, pk: &PublicKey) -> Result<Ciphertext, CryptoError> {
    p_encrypt_with_rng(m, pk, &mut OsRng)
}

// ---------------------------------------------------------------------------
// Re-randomisation : c · r^n mod n², même clair, chiffré non relié à c
// ---------------------------------------------------------------------------
pub fn rerandomize<R>(c: &Ciphertext, pk: &PublicKey, rng: &mut R) -> Result<Ciphertext, CryptoError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if c.value() >= &pk.n_squared {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    let r = sample_unit(&pk.n, rng)?;
    let r_n = power_mod(&r, &pk.n, &pk.n_squared)?;

    Ok(Ciphertext((c.value() * &r_n) % &pk.n_squared))
}
