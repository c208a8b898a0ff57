//! Storage helpers for the service layer
//!
//! Whole-document JSON persistence shared by the product and cart stores.

pub mod json_document;
