pub mod db;

pub mod category;
pub mod client;
pub mod phone;
pub mod sell;
pub mod user;

#[cfg(test)]
mod tests;
