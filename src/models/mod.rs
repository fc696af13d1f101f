pub mod enums;
pub mod lead_model;
