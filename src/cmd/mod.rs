pub mod layout;
pub mod validate;
