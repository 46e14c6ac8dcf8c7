mod decompose;

pub use decompose::run_decompose;
