// Déclaration des modules
pub mod crypto_error;
pub mod config;
pub mod paillier;

pub use crate::paillier::math;
pub use crate::paillier::primes;
pub use crate::paillier::p_keygen;
pub use crate::paillier::p_encrypt;
pub use crate::paillier::p_decrypt;
pub use crate::paillier::p_eval;

// Fonctions mathématiques principales
pub use crate::paillier::math::{power_mod, extended_gcd, mod_inverse, gcd, lcm, l_function};

// Source de premiers injectable
pub use crate::paillier::primes::{PrimeSource, MillerRabinSource, FixedPrimes, is_probable_prime};

// Clés et opérations publiques
pub use p_keygen::{PublicKey, PrivateKey, KeyPair, generate_keys, p_keygen, verify_key_pair};
pub use p_encrypt::{Ciphertext, p_encrypt, p_encrypt_with_rng, rerandomize};
pub use p_decrypt::p_decrypt;
pub use p_eval::{eval_add, eval_add_plain, eval_scalar_mul, eval_sub};

// Configuration
pub use config::KeyGenConfig;

// Erreur centralisée
pub use crypto_error::CryptoError;
