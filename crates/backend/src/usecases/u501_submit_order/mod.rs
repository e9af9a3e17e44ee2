pub mod executor;

pub use executor::SubmitOrderExecutor;
