pub mod boolean;
pub mod simplify;
pub mod transform;
