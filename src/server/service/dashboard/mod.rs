pub mod fetcher;
pub mod guard;
pub mod lock;
pub mod orchestrator;
pub mod store;

#[cfg(test)]
mod tests;
