pub mod config;

pub use config::{KeyGenConfig, MIN_PRIME_BITS, DEFAULT_MR_ROUNDS, DEFAULT_PRIME_BITS};
