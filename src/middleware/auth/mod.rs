pub mod jwt;

pub use jwt::SkipRemainingPhases;
