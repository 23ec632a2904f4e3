mod analyzer;

pub use analyzer::AnalyzerApp;
