//! # Resident portal
//!
//! Mock sign-in, the persisted session, dashboard data and the site's forms.
//! Nothing here talks to a server.

pub mod auth;
pub mod dashboard;
pub mod forms;
pub mod session;

pub use auth::{AuthError, MockDirectory, Role, User};
pub use dashboard::{AdminBoard, ResidentFeed};
pub use forms::{ContactForm, LoginForm, LoginOutcome, SupportForm};
pub use session::SessionStore;
