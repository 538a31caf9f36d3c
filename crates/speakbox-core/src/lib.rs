pub mod capture;
pub mod error;
pub mod overlay;
pub mod pipeline;
pub mod preprocess;
pub mod reading;
pub mod recognize;
pub mod selection;
