#![forbid(unsafe_code)]

pub mod greeting;
pub mod health;
pub mod items;
pub mod users;
