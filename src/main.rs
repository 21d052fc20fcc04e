// =========================================================
// Démonstration — Paillier, homomorphisme additif
//
// 1. Clé pédagogique p = 61, q = 53 : E(123) · E(456) → 579
// 2. Clé générée (taille lue dans PAILLIER_PRIME_BITS, etc.)
//
// Niveau de logs : RUST_LOG (défaut « info »)
// =========================================================

use paillier_core::{
    eval_add, generate_keys, p_decrypt, p_encrypt, p_keygen, verify_key_pair,
    CryptoError, KeyGenConfig, KeyPair, MillerRabinSource,
};

use num_bigint::{BigUint, RandBigInt};
use rand_core::OsRng;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
}

// ─────────────────────────────────────────────────────────
// Point d'entrée
// ─────────────────────────────────────────────────────────

fn main() -> ExitCode {
    init_tracing();

    let res = demonstration_pedagogique().and_then(|_| demonstration_cle_generee());
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

// ─────────────────────────────────────────────────────────
// [1] Clé pédagogique 61 / 53
// ─────────────────────────────────────────────────────────

fn demonstration_pedagogique() -> Result<(), CryptoError> {
    println!("\n==============================================");
    println!("    Paillier — clé pédagogique p=61, q=53");
    println!("==============================================");

    let kp = generate_keys(&BigUint::from(61u32), &BigUint::from(53u32))?;
    println!("  n      = {}", kp.public_key.n);
    println!("  g      = {}", kp.public_key.g);
    println!("  lambda = {}", kp.private_key.lambda);

    let (m1, m2) = (BigUint::from(123u32), BigUint::from(456u32));
    let c1 = p_encrypt(&m1, &kp.public_key)?;
    let c2 = p_encrypt(&m2, &kp.public_key)?;
    println!("  E(123) = {}", c1.value());
    println!("  E(456) = {}", c2.value());

    let c3 = eval_add(&c1, &c2, &kp.public_key.n)?;
    let somme = p_decrypt(&c3, &kp.private_key)?;
    println!("  D(E(123) · E(456)) = {somme}");
    verifier_somme(&somme, &BigUint::from(579u32))?;

    Ok(())
}

// ─────────────────────────────────────────────────────────
// [2] Clé générée — tailles issues de la configuration
// ─────────────────────────────────────────────────────────

fn demonstration_cle_generee() -> Result<(), CryptoError> {
    let config = KeyGenConfig::from_env()?;

    println!("\n==============================================");
    println!("    Paillier — clé générée ({} bits par premier)", config.prime_bits);
    println!("==============================================");

    let t = Instant::now();
    let mut source = MillerRabinSource::from_config(&config, OsRng);
    let kp = p_keygen(&config, &mut source)?;
    let duree_keygen = t.elapsed();
    afficher_cles(&kp);

    if !verify_key_pair(&kp.public_key, &kp.private_key) {
        return Err(CryptoError::InvalidKeyMaterial("invariant mu · L(g^lambda) ≢ 1".into()));
    }

    let n = &kp.public_key.n;
    let m1 = OsRng.gen_biguint_below(n);
    let m2 = OsRng.gen_biguint_below(n);
    let somme_claire = (&m1 + &m2) % n;

    let t = Instant::now();
    let c1 = p_encrypt(&m1, &kp.public_key)?;
    let c2 = p_encrypt(&m2, &kp.public_key)?;
    let duree_enc = t.elapsed() / 2;

    let t = Instant::now();
    let c_somme = eval_add(&c1, &c2, n)?;
    let duree_add = t.elapsed();

    let t = Instant::now();
    let dec = p_decrypt(&c_somme, &kp.private_key)?;
    let duree_dec = t.elapsed();

    verifier_somme(&dec, &somme_claire)?;
    info!("homomorphisme additif vérifié : D(E(m1)·E(m2)) = (m1+m2) mod n");

    println!("\n==============================================");
    println!("    RÉSUMÉ DES TEMPS");
    println!("==============================================");
    println!("  Génération des clés    : {duree_keygen:.3?}");
    println!("  Chiffrement (moyenne)  : {duree_enc:.3?}");
    println!("  Addition homomorphique : {duree_add:.3?}");
    println!("  Déchiffrement          : {duree_dec:.3?}");
    println!("==============================================");

    Ok(())
}

// Un écart entre D(E(m1)·E(m2)) et m1+m2 fait échouer la démonstration
fn verifier_somme(dechiffre: &BigUint, attendu: &BigUint) -> Result<(), CryptoError> {
    if dechiffre == attendu {
        Ok(())
    } else {
        Err(CryptoError::InvalidCiphertext)
    }
}

fn afficher_cles(kp: &KeyPair) {
    println!("--- CLÉ PUBLIQUE ---");
    println!("  |n|         = {} bits", kp.public_key.n.bits());
    println!("  |n_squared| = {} bits", kp.public_key.n_squared.bits());
    println!("--- CLÉ PRIVÉE ---");
    println!("  |lambda|    = {} bits", kp.private_key.lambda.bits());
    println!("  |mu|        = {} bits", kp.private_key.mu.bits());
}
