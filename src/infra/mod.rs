pub mod credentials;
pub mod github;
