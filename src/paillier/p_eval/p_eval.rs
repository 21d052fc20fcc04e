use num_bigint::BigUint;
use num_traits::Zero;
use crate::crypto_error::CryptoError;
use crate::paillier::math::{mod_inverse, power_mod};
use crate::paillier::p_encrypt::Ciphertext;
use crate::paillier::p_keygen::PublicKey;

// ---------------------------------------------------------------------------
// Addition homomorphe : c3 = c1 · c2 mod n²
//
// Dec(c3) = m1 + m2 mod n, quel que soit l'aléa des deux chiffrements.
// Sans aléa ni clé : seul n est nécessaire. Un opérande qui ne provient pas
// d'un chiffrement sous la même clé donne un résultat sans signification,
// ce que cette fonction ne peut pas détecter.
// ---------------------------------------------------------------------------
pub fn eval_add(c1: &Ciphertext, c2: &Ciphertext, n: &BigUint) -> Result<Ciphertext, CryptoError> {
    if n.is_zero() {
        return Err(CryptoError::InvalidArgument("eval_add : module nul".into()));
    }
    let n_squared = n * n;
    if c1.value() >= &n_squared || c2.value() >= &n_squared {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    Ok(Ciphertext::from((c1.value() * c2.value()) % &n_squared))
}

// Addition d'une constante en clair : c · g^k mod n²  →  m + k mod n
pub fn eval_add_plain(c: &Ciphertext, k: &BigUint, pk: &PublicKey) -> Result<Ciphertext, CryptoError> {
    if c.value() >= &pk.n_squared {
        return Err(CryptoError::CiphertextOutOfRange);
    }
    if k >= &pk.n {
        return Err(CryptoError::MessageOutOfRange);
    }

    let g_k = power_mod(&pk.g, k, &pk.n_squared)?;
    Ok(Ciphertext::from((c.value() * g_k) % &pk.n_squared))
}

// ---------------------------------------------------------------------------
// Multiplication par un scalaire en clair : c^k mod n²  →  k·m mod n
// (produit chiffré × chiffré impossible dans Paillier)
// ---------------------------------------------------------------------------
pub fn eval_scalar_mul(c: &Ciphertext, k: &BigUint, pk: &PublicKey) -> Result<Ciphertext, CryptoError> {
    if c.value() >= &pk.n_squared {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    Ok(Ciphertext::from(power_mod(c.value(), k, &pk.n_squared)?))
}

// ---------------------------------------------------------------------------
// Soustraction homomorphe : c1 · c2^-1 mod n²  →  m1 - m2 mod n
// Un clair négatif ressort sous la forme n - |m1 - m2|.
// ---------------------------------------------------------------------------
pub fn eval_sub(c1: &Ciphertext, c2: &Ciphertext, pk: &PublicKey) -> Result<Ciphertext, CryptoError> {
    if c1.value() >= &pk.n_squared || c2.value() >= &pk.n_squared {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    let c2_inv = mod_inverse(c2.value(), &pk.n_squared)?;
    Ok(Ciphertext::from((c1.value() * c2_inv) % &pk.n_squared))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paillier::p_decrypt::p_decrypt;
    use crate::paillier::p_encrypt::p_encrypt;
    use crate::paillier::p_keygen::{generate_keys, KeyPair};

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    fn textbook() -> KeyPair {
        generate_keys(&big(61), &big(53)).unwrap()
    }

    #[test]
    fn textbook_sum_is_579() {
        let kp = textbook();
        let c1 = p_encrypt(&big(123), &kp.public_key).unwrap();
        let c2 = p_encrypt(&big(456), &kp.public_key).unwrap();
        let c3 = eval_add(&c1, &c2, &kp.public_key.n).unwrap();
        assert_eq!(p_decrypt(&c3, &kp.private_key).unwrap(), big(579));
    }

    #[test]
    fn sum_wraps_modulo_n() {
        let kp = textbook();
        let c1 = p_encrypt(&big(3000), &kp.public_key).unwrap();
        let c2 = p_encrypt(&big(500), &kp.public_key).unwrap();
        let c3 = eval_add(&c1, &c2, &kp.public_key.n).unwrap();
        assert_eq!(p_decrypt(&c3, &kp.private_key).unwrap(), big(267));
    }

    #[test]
    fn eval_add_checks_operands() {
        let kp = textbook();
        let c = p_encrypt(&big(1), &kp.public_key).unwrap();
        let too_big = Ciphertext::from(kp.public_key.n_squared.clone());
        assert_eq!(eval_add(&c, &too_big, &kp.public_key.n), Err(CryptoError::CiphertextOutOfRange));
        assert!(matches!(eval_add(&c, &c, &BigUint::zero()), Err(CryptoError::InvalidArgument(_))));
    }

    #[test]
    fn add_plain_and_scalar_mul() {
        let kp = textbook();
        let c = p_encrypt(&big(100), &kp.public_key).unwrap();

        let plus = eval_add_plain(&c, &big(33), &kp.public_key).unwrap();
        assert_eq!(p_decrypt(&plus, &kp.private_key).unwrap(), big(133));

        let times = eval_scalar_mul(&c, &big(7), &kp.public_key).unwrap();
        assert_eq!(p_decrypt(&times, &kp.private_key).unwrap(), big(700));

        let zero = eval_scalar_mul(&c, &BigUint::zero(), &kp.public_key).unwrap();
        assert_eq!(p_decrypt(&zero, &kp.private_key).unwrap(), BigUint::zero());

        assert_eq!(
            eval_add_plain(&c, &kp.public_key.n, &kp.public_key),
            Err(CryptoError::MessageOutOfRange)
        );
    }

    #[test]
    fn sub_wraps_below_zero() {
        let kp = textbook();
        let c1 = p_encrypt(&big(10), &kp.public_key).unwrap();
        let c2 = p_encrypt(&big(25), &kp.public_key).unwrap();

        let diff = eval_sub(&c2, &c1, &kp.public_key).unwrap();
        assert_eq!(p_decrypt(&diff, &kp.private_key).unwrap(), big(15));

        let negative = eval_sub(&c1, &c2, &kp.public_key).unwrap();
        assert_eq!(p_decrypt(&negative, &kp.private_key).unwrap(), big(3233 - 15));
    }

    #[test]
    fn sub_of_non_unit_has_no_inverse() {
        let kp = textbook();
        let c = p_encrypt(&big(10), &kp.public_key).unwrap();
        let non_unit = Ciphertext::from(big(61));
        assert_eq!(eval_sub(&c, &non_unit, &kp.public_key), Err(CryptoError::NoModularInverse));
    }
}
