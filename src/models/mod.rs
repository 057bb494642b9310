pub mod invitation;
pub mod organization;
pub mod user;
