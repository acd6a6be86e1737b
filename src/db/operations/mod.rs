pub mod dashboard;
pub mod groups;
pub mod reviews;
pub mod study_activities;
pub mod study_sessions;
pub mod words;
