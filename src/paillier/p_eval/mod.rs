mod p_eval;

pub use p_eval::{eval_add, eval_add_plain, eval_scalar_mul, eval_sub};
