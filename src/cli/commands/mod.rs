pub mod jobs;
pub mod login;
