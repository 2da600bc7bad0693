// Candidate intake: the structured form, its validation, and the frozen record.

pub mod models;
pub mod validation;
