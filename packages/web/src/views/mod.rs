mod root;
pub use root::Root;

mod shell;
pub use shell::AuthenticatedShell;

mod home;
pub use home::Home;
