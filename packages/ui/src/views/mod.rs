mod token_progress;
pub use token_progress::TokenProgress;

mod layout;
pub use layout::{Footer, Header, Layout};

mod authentication;
pub use authentication::Authentication;

mod login_form;
pub use login_form::LoginForm;

mod forgot_password;
pub use forgot_password::ForgotPasswordDialog;

mod registration_form;
pub use registration_form::RegistrationForm;

mod participant_picker;
pub use participant_picker::{ParticipantPicker, RecipientWishlist};

mod wishlist;
pub use wishlist::MyWishlist;

mod profile;
pub use profile::Profile;

mod home;
pub use home::HomeView;
