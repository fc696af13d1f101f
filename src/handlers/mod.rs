pub mod email_handler;
pub mod newsletter_handler;
pub mod registration_handler;
pub mod unique_handler;
pub mod verification_handler;
