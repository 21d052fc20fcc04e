// ===========================================================================
// Gestion centralisée des erreurs cryptographiques
//
// Tous les modules utilisent ce type au lieu de panic!/assert!/unwrap().
// Chaque échec reste local à l'opération qui l'a déclenché : l'appelant
// reçoit une Err(...) et décide quoi en faire.
// ===========================================================================

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    // --- Erreurs de paramètres d'entrée ---
    /// Le message m est >= n (hors domaine plaintext Paillier)
    #[error("Le message doit être dans [0, n)")]
    MessageOutOfRange,
    /// Le chiffré c est >= n² (hors domaine ciphertext Paillier)
    #[error("Le chiffré doit être dans [0, n²)")]
    CiphertextOutOfRange,
    /// La taille de premier demandée est trop petite (< MIN_PRIME_BITS)
    #[error("Taille de premier {requested} bits insuffisante, minimum requis : {minimum} bits")]
    KeySizeTooSmall { requested: u64, minimum: u64 },
    /// Module nul, paramètre de configuration illisible, source épuisée…
    #[error("Argument invalide : {0}")]
    InvalidArgument(String),

    // --- Erreurs mathématiques ---
    /// L'inverse modulaire n'existe pas (gcd != 1)
    #[error("Impossible de calculer l'inverse modulaire (gcd != 1)")]
    NoModularInverse,
    /// Conversion BigInt -> BigUint échouée (résultat négatif — invariant interne)
    #[error("Conversion interne BigInt -> BigUint : résultat négatif inattendu")]
    NegativeConversion,

    // --- Erreurs de clés / chiffrés ---
    /// p, q égaux, non premiers, ou L(g^lambda mod n²) non inversible
    #[error("Matériel de clé invalide : {0}")]
    InvalidKeyMaterial(String),
    /// c^lambda mod n² n'est pas congru à 1 mod n : chiffré mal formé ou falsifié
    #[error("Chiffré invalide pour cette clé : (c^lambda mod n² - 1) non divisible par n")]
    InvalidCiphertext,
}
