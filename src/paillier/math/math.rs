use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use num_integer::Integer;
use crate::crypto_error::CryptoError;

// ---------------------------------------------------------------------------
// Exponentiation modulaire rapide (square-and-multiply)
//
// base^exponent mod modulus en O(log exponent) multiplications modulaires.
// On parcourt les bits de l'exposant du poids faible vers le poids fort :
// la base est élevée au carré à chaque pas, et multipliée dans l'accumulateur
// quand le bit courant vaut 1.
//
// Retourne Err(InvalidArgument) si modulus == 0.
// ---------------------------------------------------------------------------
pub fn power_mod(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint, CryptoError> {
    if modulus.is_zero() {
        return Err(CryptoError::InvalidArgument("power_mod : module nul".into()));
    }
    if modulus.is_one() {
        return Ok(BigUint::zero());
    }

    let mut result = BigUint::one();
    let mut b = base % modulus;

    for i in 0..exponent.bits() {
        if exponent.bit(i) {
            result = (&result * &b) % modulus;
        }
        b = (&b * &b) % modulus;
    }

    Ok(result)
}

// ---------------------------------------------------------------------------
// Algorithme d'Euclide étendu
//
// Retourne (x, y, g) tels que a·x + b·y = g = gcd(a, b).
// Forme itérative de l'identité exgcd(a, b) = exgcd(b, a mod b) avec
// exgcd(a, 0) = (1, 0, a) : pas de récursion, donc pas de profondeur de pile
// proportionnelle à la taille des opérandes.
// ---------------------------------------------------------------------------
pub fn extended_gcd(a: &BigUint, b: &BigUint) -> (BigInt, BigInt, BigUint) {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    // old_r est le pgcd de deux entiers positifs : toujours >= 0
    let g = old_r.magnitude().clone();

    (old_s, old_t, g)
}

// ---------------------------------------------------------------------------
// Calcule l'inverse modulaire de a mod m, normalisé dans [0, m).
// Retourne Err(InvalidArgument) si m == 0,
//          Err(NoModularInverse) si gcd(a, m) != 1.
// ---------------------------------------------------------------------------
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint, CryptoError> {
    if m.is_zero() {
        return Err(CryptoError::InvalidArgument("mod_inverse : module nul".into()));
    }

    let (x, _, g) = extended_gcd(a, m);
    if !g.is_one() {
        return Err(CryptoError::NoModularInverse);
    }

    let m_big = BigInt::from(m.clone());
    let x_mod = x.mod_floor(&m_big);

    match x_mod.sign() {
        Sign::Minus => Err(CryptoError::NegativeConversion),
        _ => Ok(x_mod.magnitude().clone()),
    }
}

// Calcule le pgcd de deux nombres
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    a.lcm(b)
}

// ---------------------------------------------------------------------------
// Fonction L(u) = (u-1)/n, division entière exacte.
//
// Retourne None si u == 0 ou si n ne divise pas u - 1 : u n'est alors pas
// congru à 1 mod n et L n'a pas de sens.
// ---------------------------------------------------------------------------
pub fn l_function(u: &BigUint, n: &BigUint) -> Option<BigUint> {
    if u.is_zero() || n.is_zero() {
        return None;
    }
    let (quotient, remainder) = (u - BigUint::one()).div_rem(n);
    remainder.is_zero().then_some(quotient)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn power_mod_matches_builtin_modpow() {
        let cases = [(4u64, 13u64, 497u64), (2, 0, 7), (0, 5, 11), (123_456_789, 65_537, 1_000_000_007)];
        for (b, e, m) in cases {
            let expected = big(b).modpow(&big(e), &big(m));
            assert_eq!(power_mod(&big(b), &big(e), &big(m)).unwrap(), expected);
        }
        assert_eq!(power_mod(&big(4), &big(13), &big(497)).unwrap(), big(445));
    }

    #[test]
    fn power_mod_modulus_one_and_zero() {
        assert_eq!(power_mod(&big(5), &big(3), &big(1)).unwrap(), BigUint::zero());
        assert!(matches!(
            power_mod(&big(5), &big(3), &BigUint::zero()),
            Err(CryptoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn extended_gcd_satisfies_bezout() {
        for (a, b) in [(240u64, 46u64), (17, 5), (0, 9), (9, 0), (3233, 780)] {
            let (x, y, g) = extended_gcd(&big(a), &big(b));
            assert_eq!(g, gcd(&big(a), &big(b)));
            let lhs = BigInt::from(a) * x + BigInt::from(b) * y;
            assert_eq!(lhs, BigInt::from(g));
        }
    }

    #[test]
    fn extended_gcd_base_case() {
        let (x, y, g) = extended_gcd(&big(42), &BigUint::zero());
        assert_eq!((x, y, g), (BigInt::one(), BigInt::zero(), big(42)));
    }

    #[test]
    fn mod_inverse_is_normalised() {
        let inv = mod_inverse(&big(17), &big(3120)).unwrap();
        assert_eq!(inv, big(2753));
        assert!(inv < big(3120));
        assert_eq!((big(17) * inv) % big(3120), BigUint::one());
    }

    #[test]
    fn mod_inverse_rejects_non_coprime() {
        assert_eq!(mod_inverse(&big(6), &big(9)), Err(CryptoError::NoModularInverse));
        assert!(matches!(mod_inverse(&big(3), &BigUint::zero()), Err(CryptoError::InvalidArgument(_))));
    }

    #[test]
    fn lcm_of_textbook_primes() {
        assert_eq!(lcm(&big(60), &big(52)), big(780));
    }

    #[test]
    fn l_function_requires_exact_division() {
        assert_eq!(l_function(&big(3234), &big(3233)), Some(big(1)));
        assert_eq!(l_function(&big(1), &big(3233)), Some(BigUint::zero()));
        assert_eq!(l_function(&big(3235), &big(3233)), None);
        assert_eq!(l_function(&BigUint::zero(), &big(3233)), None);
    }
}
