// Réexporte toutes les fonctions mathématiques

mod math;

pub use math::{power_mod, extended_gcd, mod_inverse, gcd, lcm, l_function};
