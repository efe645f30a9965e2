pub mod entry;
#[allow(clippy::module_inception)]
pub mod schedule;

#[cfg(test)]
mod tests;
