pub mod generator;

pub use generator::ContentGenerator;
