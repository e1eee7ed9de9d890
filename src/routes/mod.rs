mod editor;
mod home;
mod login;
mod post;
mod profile;
mod signup;

pub use editor::Editor;
pub use home::Dashboard;
pub use login::Login;
pub use post::PostDetail;
pub use profile::Profile;
pub use signup::Signup;
