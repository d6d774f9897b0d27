pub mod counters;
pub mod crud;
pub mod docs;
pub mod filters;
pub mod health;
pub mod icons;

#[cfg(test)]
pub(crate) mod testing;
