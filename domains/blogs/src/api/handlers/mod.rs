pub mod blogs;
pub mod categories;

#[cfg(test)]
pub(crate) mod testing;
