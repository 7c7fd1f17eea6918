pub mod keyword;
pub mod question;
pub mod session_id;
