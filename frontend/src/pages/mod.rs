pub mod access_log;
pub mod admin;
pub mod home;
pub mod login;
pub mod register;

pub use access_log::AccessLogPage;
pub use admin::AdminPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use register::RegisterPage;
