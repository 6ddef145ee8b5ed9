mod loader;
mod types;

pub use loader::ConfigLoader;
#[cfg(test)]
pub use types::DEFAULT_HOST;
pub use types::AccreditorConfig;
