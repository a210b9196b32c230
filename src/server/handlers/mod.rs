pub mod distance;
pub mod health;
pub mod prediction;
