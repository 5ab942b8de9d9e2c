pub mod client;
pub mod errors;
pub mod pairing;
pub mod response;
