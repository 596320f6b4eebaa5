mod validity;

pub use validity::FormValidity;
