// HTTP client for the tactical-analysis service.

pub mod client;

pub use client::{AnalysisClient, AnalysisService, ApiError};
