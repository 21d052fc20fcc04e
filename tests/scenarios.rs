use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

use paillier_core::{
    eval_add, gcd, generate_keys, p_decrypt, p_encrypt, p_encrypt_with_rng, p_keygen,
    verify_key_pair, Ciphertext, CryptoError, FixedPrimes, KeyGenConfig, MillerRabinSource,
};

fn big(v: u64) -> BigUint {
    BigUint::from(v)
}

#[test]
fn textbook_scenario_adds_to_579() {
    let kp = generate_keys(&big(61), &big(53)).unwrap();
    assert_eq!(kp.public_key.n, big(3233));
    assert_eq!(kp.public_key.g, big(3234));
    assert_eq!(kp.private_key.lambda, big(780));

    let c1 = p_encrypt(&big(123), &kp.public_key).unwrap();
    let c2 = p_encrypt(&big(456), &kp.public_key).unwrap();
    let c3 = eval_add(&c1, &c2, &kp.public_key.n).unwrap();
    assert_eq!(p_decrypt(&c3, &kp.private_key).unwrap(), big(579));
}

#[test]
fn textbook_scenario_through_prime_source() {
    let mut source = FixedPrimes::new([big(61), big(53)]);
    let config = KeyGenConfig { prime_bits: 128, ..KeyGenConfig::default() };
    let kp = p_keygen(&config, &mut source).unwrap();
    assert_eq!(kp.public_key.n, big(3233));
    assert!(verify_key_pair(&kp.public_key, &kp.private_key));
}

#[test]
fn generated_key_round_trip() {
    let config = KeyGenConfig { prime_bits: 256, miller_rabin_rounds: 32, safe_primes: false };
    let mut source = MillerRabinSource::from_config(&config, ChaCha20Rng::seed_from_u64(2024));
    let kp = p_keygen(&config, &mut source).unwrap();

    assert_eq!(kp.public_key.n.bits(), 512);
    assert!(verify_key_pair(&kp.public_key, &kp.private_key));

    let mut rng = ChaCha20Rng::seed_from_u64(99);
    for _ in 0..5 {
        let m1 = rng.gen_biguint_below(&kp.public_key.n);
        let m2 = rng.gen_biguint_below(&kp.public_key.n);
        let c1 = p_encrypt_with_rng(&m1, &kp.public_key, &mut rng).unwrap();
        let c2 = p_encrypt_with_rng(&m2, &kp.public_key, &mut rng).unwrap();

        assert_eq!(p_decrypt(&c1, &kp.private_key).unwrap(), m1);
        let sum = eval_add(&c1, &c2, &kp.public_key.n).unwrap();
        assert_eq!(p_decrypt(&sum, &kp.private_key).unwrap(), (m1 + m2) % &kp.public_key.n);
    }
}

#[test]
fn generated_safe_prime_key() {
    let config = KeyGenConfig { prime_bits: 128, miller_rabin_rounds: 16, safe_primes: true };
    let mut source = MillerRabinSource::from_config(&config, ChaCha20Rng::seed_from_u64(11));
    let kp = p_keygen(&config, &mut source).unwrap();
    assert!(verify_key_pair(&kp.public_key, &kp.private_key));
}

// Tout c premier avec n vérifie c^lambda ≡ 1 mod n : seul un c partageant un
// facteur avec n (0 compris) est rejeté.
#[test]
fn random_integers_rejected_iff_not_units() {
    let kp = generate_keys(&big(61), &big(53)).unwrap();
    let n = &kp.public_key.n;
    let mut rng = ChaCha20Rng::seed_from_u64(5);

    let mut rejected = 0;
    for _ in 0..2000 {
        let c = rng.gen_biguint_below(&kp.public_key.n_squared);
        let unit = gcd(&c, n).is_one();
        match p_decrypt(&Ciphertext::from(c), &kp.private_key) {
            Ok(_) => assert!(unit),
            Err(e) => {
                assert_eq!(e, CryptoError::InvalidCiphertext);
                assert!(!unit);
                rejected += 1;
            }
        }
    }
    // 1 - φ(n)/n = 113/3233 ≈ 3.5 %
    assert!(rejected > 0);
}

#[test]
fn ciphertext_sharing_a_factor_with_n_is_rejected() {
    let kp = generate_keys(&big(61), &big(53)).unwrap();
    for c in [0u64, 61, 53 * 7, 3233, 61 * 1000] {
        assert_eq!(
            p_decrypt(&Ciphertext::from(big(c)), &kp.private_key),
            Err(CryptoError::InvalidCiphertext)
        );
    }
}

#[test]
fn invalid_key_material() {
    assert!(matches!(generate_keys(&big(53), &big(53)), Err(CryptoError::InvalidKeyMaterial(_))));
    assert!(matches!(generate_keys(&big(61), &big(55)), Err(CryptoError::InvalidKeyMaterial(_))));
}

// Les modules et les fonctions de même nom sont tous deux accessibles
#[test]
fn module_and_function_paths_coexist() {
    let kp = paillier_core::p_keygen::generate_keys(&big(61), &big(53)).unwrap();
    let c = paillier_core::p_encrypt::p_encrypt(&big(9), &kp.public_key).unwrap();
    let doubled = paillier_core::p_eval::eval_add(&c, &c, &kp.public_key.n).unwrap();
    assert_eq!(paillier_core::p_decrypt::p_decrypt(&doubled, &kp.private_key).unwrap(), big(18));

    let mut source = FixedPrimes::new([big(61), big(53)]);
    let config = KeyGenConfig { prime_bits: 128, ..KeyGenConfig::default() };
    let via_fn = paillier_core::p_keygen(&config, &mut source).unwrap();
    let via_root = paillier_core::p_encrypt(&big(9), &via_fn.public_key).unwrap();
    assert_eq!(paillier_core::p_decrypt(&via_root, &via_fn.private_key).unwrap(), big(9));
}
