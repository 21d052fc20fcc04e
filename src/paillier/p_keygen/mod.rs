mod p_keygen;

pub use p_keygen::{PublicKey, PrivateKey, KeyPair, generate_keys, p_keygen, verify_key_pair};
