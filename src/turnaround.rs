pub mod generator;
pub mod pairing;
