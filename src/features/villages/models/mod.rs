mod village;

pub use village::*;
