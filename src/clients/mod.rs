pub mod calendar_client;
pub mod github_client;
pub mod mail_client;
