//! # Prompt Template Modules
//!
//! This module organizes the prompt templates sent to the AI provider when
//! drafting documents.

pub mod contract;
