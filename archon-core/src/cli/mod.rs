pub mod conf;
pub mod simulate;
pub mod watch;

#[cfg(test)]
mod tests;
