use std::fmt;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::OsRng;
use tracing::debug;
use zeroize::Zeroize;
use crate::config::{KeyGenConfig, DEFAULT_MR_ROUNDS};
use crate::crypto_error::CryptoError;
use crate::paillier::math::{gcd, l_function, lcm, mod_inverse, power_mod};
use crate::paillier::primes::{is_probable_prime, PrimeSource};

// ============================================================================
// Clé publique Paillier — pas de données secrètes, pas de zeroize nécessaire
// ============================================================================
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub n:         BigUint,
    pub g:         BigUint,
    pub n_squared: BigUint,
}

impl PublicKey {
    // g = n + 1, forme simplifiée standard
    pub fn from_modulus(n: BigUint) -> Self {
        let g = &n + BigUint::one();
        let n_squared = &n * &n;
        PublicKey { n, g, n_squared }
    }
}

// ============================================================================
// Helper : remet un BigUint à zéro
//
// BigUint n'expose pas ses limbs en écriture : on libère la valeur, sans
// garantie d'effacement de l'allocation d'origine.
// ============================================================================
fn zeroize_biguint(n: &mut BigUint) {
    n.set_zero();
}

// ============================================================================
// Clé privée Paillier — lambda et mu remis à zéro à la destruction
//
// Remise à zéro des valeurs seulement : BigUint ne permet pas d'écraser
// l'allocation d'origine, son effacement mémoire n'est pas garanti.
// n accompagne lambda et mu : le déchiffrement n'a besoin d'aucune autre
// donnée. p et q n'y figurent jamais.
// ============================================================================
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub lambda:    BigUint,
    pub mu:        BigUint,
    pub n:         BigUint,
    pub n_squared: BigUint,
}

impl PrivateKey {
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_modulus(self.n.clone())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("lambda", &"<secret>")
            .field("mu", &"<secret>")
            .field("n", &self.n)
            .finish()
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        zeroize_biguint(&mut self.lambda);
        zeroize_biguint(&mut self.mu);
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

// ============================================================================
// Paire de clés
// ============================================================================
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub public_key:  PublicKey,
    pub private_key: PrivateKey,
}

// ============================================================================
// Dérivation des clés à partir de deux premiers distincts p et q
//
//   n      = p·q
//   lambda = lcm(p-1, q-1)
//   g      = n + 1
//   mu     = L(g^lambda mod n²)^-1 mod n
//
// Avec g = n+1 : (n+1)^lambda mod n² = 1 + lambda·n, donc L(...) = lambda mod n,
// inversible dès que gcd(n, (p-1)(q-1)) = 1. Un g quelconque exigerait en plus
// gcd(g, n²) = 1 et l'inversibilité de L(g^lambda mod n²) : les deux sont
// vérifiées ici explicitement quel que soit le chemin.
//
// p et q sont lus puis oubliés : ils ne figurent dans aucune des deux clés.
// ============================================================================
pub fn generate_keys(p: &BigUint, q: &BigUint) -> Result<KeyPair, CryptoError> {
    if p == q {
        return Err(CryptoError::InvalidKeyMaterial("p et q doivent être distincts".into()));
    }

    let mut rng = OsRng;
    if !is_probable_prime(p, DEFAULT_MR_ROUNDS, &mut rng) || !is_probable_prime(q, DEFAULT_MR_ROUNDS, &mut rng) {
        return Err(CryptoError::InvalidKeyMaterial("p et q doivent être premiers".into()));
    }

    let n         = p * q;
    let n_squared = &n * &n;

    let p_minus_1 = p - BigUint::one();
    let q_minus_1 = q - BigUint::one();

    // Condition de Paillier : toujours vraie pour deux premiers de même taille
    if !gcd(&n, &(&p_minus_1 * &q_minus_1)).is_one() {
        return Err(CryptoError::InvalidKeyMaterial("gcd(n, (p-1)(q-1)) != 1".into()));
    }

    let lambda = lcm(&p_minus_1, &q_minus_1);
    let g      = &n + BigUint::one();

    if !gcd(&g, &n_squared).is_one() {
        return Err(CryptoError::InvalidKeyMaterial("g n'est pas premier avec n²".into()));
    }

    let g_lambda = power_mod(&g, &lambda, &n_squared)?;
    let l_g_lambda = l_function(&g_lambda, &n).ok_or_else(|| {
        CryptoError::InvalidKeyMaterial("g^lambda mod n² n'est pas congru à 1 mod n".into())
    })?;

    let mu = mod_inverse(&l_g_lambda, &n).map_err(|_| {
        CryptoError::InvalidKeyMaterial("L(g^lambda mod n²) non inversible mod n".into())
    })?;

    debug!(modulus_bits = n.bits(), "paire de clés Paillier dérivée");

    Ok(KeyPair {
        public_key:  PublicKey { n: n.clone(), g, n_squared: n_squared.clone() },
        private_key: PrivateKey { lambda, mu, n, n_squared },
    })
}

// ============================================================================
// Génération complète : deux premiers tirés depuis la source, puis dérivation
// ============================================================================
pub fn p_keygen<S>(config: &KeyGenConfig, source: &mut S) -> Result<KeyPair, CryptoError>
where
    S: PrimeSource + ?Sized,
{
    config.validate()?;

    let p = source.generate_prime(config.prime_bits)?;
    let mut q = source.generate_prime(config.prime_bits)?;
    while p == q {
        q = source.generate_prime(config.prime_bits)?;
    }

    debug!(prime_bits = config.prime_bits, safe_primes = config.safe_primes, "premiers obtenus");

    generate_keys(&p, &q)
}

// ---------------------------------------------------------------------------
// Invariant de validité : mu · L(g^lambda mod n²) ≡ 1 (mod n)
// ---------------------------------------------------------------------------
pub fn verify_key_pair(pk: &PublicKey, sk: &PrivateKey) -> bool {
    if pk.n != sk.n || pk.n_squared != &pk.n * &pk.n {
        return false;
    }
    let Ok(g_lambda) = power_mod(&pk.g, &sk.lambda, &pk.n_squared) else {
        return false;
    };
    match l_function(&g_lambda, &pk.n) {
        Some(l) => ((&sk.mu * l) % &pk.n).is_one(),
        None => false,
    }
}
