//! Test support: in-memory `.docx` and `.xlsx` packages.

pub mod fixtures;
