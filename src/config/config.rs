// ===========================================================================
// Paramètres de génération de clés
//
// Valeurs par défaut sûres, surchargées au besoin par variables
// d'environnement (binaire de démonstration, déploiement).
// ===========================================================================

use std::env;
use std::str::FromStr;
use crate::crypto_error::CryptoError;

// Taille minimale d'un premier accepté lors d'une génération aléatoire
pub const MIN_PRIME_BITS: u64 = 128;

// n = p·q de 2048 bits
pub const DEFAULT_PRIME_BITS: u64 = 1024;

// 4^-64 = 2^-128 : borne sur la probabilité d'accepter un composé
pub const DEFAULT_MR_ROUNDS: u32 = 64;

pub const ENV_PRIME_BITS:  &str = "PAILLIER_PRIME_BITS";
pub const ENV_MR_ROUNDS:   &str = "PAILLIER_MR_ROUNDS";
pub const ENV_SAFE_PRIMES: &str = "PAILLIER_SAFE_PRIMES";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyGenConfig {
    /// Taille en bits de chacun des premiers p et q
    pub prime_bits:          u64,
    /// Nombre de témoins Miller-Rabin par candidat
    pub miller_rabin_rounds: u32,
    /// p = 2p'+1 avec p' premier (recherche nettement plus lente)
    pub safe_primes:         bool,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        KeyGenConfig {
            prime_bits:          DEFAULT_PRIME_BITS,
            miller_rabin_rounds: DEFAULT_MR_ROUNDS,
            safe_primes:         false,
        }
    }
}

impl KeyGenConfig {
    // -----------------------------------------------------------------------
    // Valeurs par défaut, surchargées par PAILLIER_PRIME_BITS,
    // PAILLIER_MR_ROUNDS et PAILLIER_SAFE_PRIMES si elles sont définies.
    // Une valeur présente mais illisible est une erreur, pas un défaut silencieux.
    // -----------------------------------------------------------------------
    pub fn from_env() -> Result<Self, CryptoError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, CryptoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = KeyGenConfig::default();

        if let Some(raw) = lookup(ENV_PRIME_BITS) {
            config.prime_bits = parse_field(ENV_PRIME_BITS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MR_ROUNDS) {
            config.miller_rabin_rounds = parse_field(ENV_MR_ROUNDS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SAFE_PRIMES) {
            config.safe_primes = match raw.trim() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(CryptoError::InvalidArgument(format!(
                        "{ENV_SAFE_PRIMES} : valeur booléenne attendue, reçu {other:?}"
                    )))
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.prime_bits < MIN_PRIME_BITS {
            return Err(CryptoError::KeySizeTooSmall {
                requested: self.prime_bits,
                minimum:   MIN_PRIME_BITS,
            });
        }
        if self.miller_rabin_rounds == 0 {
            return Err(CryptoError::InvalidArgument(
                "au moins un tour de Miller-Rabin est requis".into(),
            ));
        }
        Ok(())
    }
}

fn parse_field<T: FromStr>(key: &str, raw: &str) -> Result<T, CryptoError> {
    raw.trim().parse().map_err(|_| {
        CryptoError::InvalidArgument(format!("{key} : valeur illisible {raw:?}"))
    })
}
