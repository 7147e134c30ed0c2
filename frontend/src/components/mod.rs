pub mod chat;
pub mod header;
pub mod layout;
pub mod login;
pub mod sidebar;
pub mod splash;
