//! Route handlers

pub mod assessments;
pub mod form;
