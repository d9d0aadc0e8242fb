pub mod context;
pub mod engine;
pub mod generator;
pub mod predictor;
pub mod scorer;
pub mod style;
pub mod taxonomy;
pub mod tokenizer;
pub mod types;
