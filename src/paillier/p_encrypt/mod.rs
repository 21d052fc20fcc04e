mod p_encrypt;

pub use p_encrypt::{Ciphertext, p_encrypt, p_encrypt_with_rng, rerandomize};
