pub mod interactive;
pub mod password_gen;
