//! Unit tests for the provider SDK
//!
//! This module contains tests for various components of the SDK.

pub mod gemini_mock_tests;
pub mod groq_mock_tests;
pub mod pipeline_tests;
