use num_bigint::BigUint;
use tracing::debug;
use crate::crypto_error::CryptoError;
use crate::paillier::math::{l_function, power_mod};
use crate::paillier::p_encrypt::Ciphertext;
use crate::paillier::p_keygen::PrivateKey;

// ---------------------------------------------------------------------------
// Déchiffrement Paillier : m = L(c^lambda mod n²) · mu  mod n
//
// c^lambda mod n² doit être congru à 1 mod n. Sinon le chiffré est mal
// formé (ou falsifié) pour cette clé : erreur récupérable, aucun clair
// n'est rendu.
// ---------------------------------------------------------------------------
pub fn p_decrypt(c: &Ciphertext, sk: &PrivateKey) -> Result<BigUint, CryptoError> {
    if c.value() >= &sk.n_squared {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    let k = power_mod(c.value(), &sk.lambda, &sk.n_squared)?;

    let Some(l_k) = l_function(&k, &sk.n) else {
        debug!("chiffré rejeté : c^lambda mod n² non congru à 1 mod n");
        return Err(CryptoError::InvalidCiphertext);
    };

    Ok((&l_k * &sk.mu) % &sk.n)
}
