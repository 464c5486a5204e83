//! Form state and validation for the contact, login and support forms

use thiserror::Error;

use super::auth::{AuthError, MockDirectory, User};

/// Simulated round trip of the login request, in seconds
pub const LOGIN_LATENCY: f32 = 1.0;

pub const CONTACT_THANKS: &str = "Thank you for your interest! We will contact you soon.";
pub const SUPPORT_THANKS: &str =
    "Support request submitted successfully! We will get back to you within 24 hours.";
pub const PASSWORD_RESET: &str = "Password reset functionality coming soon!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interest {
    #[default]
    Newsletter,
    Viewing,
    Purchase,
    Investment,
}

impl Interest {
    pub const ALL: [Interest; 4] = [
        Self::Newsletter,
        Self::Viewing,
        Self::Purchase,
        Self::Investment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Newsletter => "Newsletter Only",
            Self::Viewing => "Schedule Viewing",
            Self::Purchase => "Purchase Inquiry",
            Self::Investment => "Investment Opportunity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Budget {
    #[default]
    Unset,
    From2To5M,
    From5To10M,
    From10To20M,
    Over20M,
}

impl Budget {
    pub const ALL: [Budget; 5] = [
        Self::Unset,
        Self::From2To5M,
        Self::From5To10M,
        Self::From10To20M,
        Self::Over20M,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Unset => "Select Budget",
            Self::From2To5M => "$2M - $5M",
            Self::From5To10M => "$5M - $10M",
            Self::From10To20M => "$10M - $20M",
            Self::Over20M => "$20M+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please enter your full name.")]
    MissingName,
    #[error("Please enter your email.")]
    MissingEmail,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// The "valid e-mail address" grammar of an HTML `type=email` input
///
/// The local part is one or more atext characters or dots. The domain is one
/// or more dot-separated labels of up to 63 letters, digits or hyphens, with
/// no hyphen at either end of a label. A top-level domain is not required.
pub fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && local.chars().all(is_local_char)
        && domain.split('.').all(is_domain_label)
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c)
}

fn is_domain_label(label: &str) -> bool {
    (1..=63).contains(&label.len())
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub interest: Interest,
    pub budget: Budget,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingName);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ContactError::MissingEmail);
        }
        if !looks_like_email(email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }

    /// Validates and logs the inquiry; the fields are left as entered
    pub fn submit(&self) -> Result<&'static str, ContactError> {
        self.validate()?;
        log::info!(
            "Inquiry from {} <{}> phone={:?} interest={:?} budget={:?}: {}",
            self.name.trim(),
            self.email.trim(),
            self.phone.trim(),
            self.interest,
            self.budget,
            self.message.trim()
        );
        Ok(CONTACT_THANKS)
    }
}

/// What a frame of the login form produced
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Idle,
    Pending,
    Success(User),
    Failed(AuthError),
}

/// Login form with a frame-driven simulated latency
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<AuthError>,
    pending: Option<f32>,
}

impl LoginForm {
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a sign-in attempt; ignored while one is already running
    pub fn submit(&mut self) {
        if self.pending.is_none() {
            self.error = None;
            self.pending = Some(0.0);
        }
    }

    /// Advances the pending request; resolves it once the latency has elapsed
    pub fn update(&mut self, dt: f32, directory: &MockDirectory) -> LoginOutcome {
        let Some(waited) = self.pending.as_mut() else {
            return LoginOutcome::Idle;
        };
        *waited += dt;
        if *waited < LOGIN_LATENCY {
            return LoginOutcome::Pending;
        }

        self.pending = None;
        match directory.authenticate(&self.email, &self.password) {
            Ok(user) => {
                log::info!("Login succeeded for {}", user.email);
                self.password.clear();
                LoginOutcome::Success(user)
            }
            Err(e) => {
                log::info!("Login failed for {:?}", self.email.trim());
                self.error = Some(e.clone());
                LoginOutcome::Failed(e)
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupportError {
    #[error("Please describe your request.")]
    EmptyMessage,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportForm {
    pub subject: String,
    pub message: String,
}

impl SupportForm {
    /// Logs the request and clears the form
    pub fn submit(&mut self, from: &str) -> Result<&'static str, SupportError> {
        if self.message.trim().is_empty() {
            return Err(SupportError::EmptyMessage);
        }
        log::info!(
            "Support request from {}: {:?} {}",
            from,
            self.subject.trim(),
            self.message.trim()
        );
        *self = Self::default();
        Ok(SUPPORT_THANKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::auth::Role;

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("john@example.com"));
        assert!(looks_like_email("a.b@sub.domain.org"));
        assert!(!looks_like_email("john"));
        assert!(!looks_like_email("@example.com"));
        assert!(looks_like_email("user@localhost"));
        assert!(looks_like_email("o'neil+tours@x-y.example"));
        assert!(!looks_like_email("john@.com"));
        assert!(!looks_like_email("john@example."));
        assert!(!looks_like_email("a@b..c"));
        assert!(!looks_like_email("a@-x.com"));
        assert!(!looks_like_email("a@x-.com"));
        assert!(!looks_like_email("jo hn@example.com"));
        assert!(!looks_like_email("a@b@c.com"));
        assert!(!looks_like_email(&format!("a@{}.com", "x".repeat(64))));
    }

    #[test]
    fn contact_form_requires_name_and_valid_email() {
        let mut form = ContactForm::default();
        assert_eq!(form.validate(), Err(ContactError::MissingName));
        form.name = "Ada".into();
        assert_eq!(form.validate(), Err(ContactError::MissingEmail));
        form.email = "ada".into();
        assert_eq!(form.validate(), Err(ContactError::InvalidEmail));
        form.email = "ada@example.com".into();
        assert_eq!(form.submit(), Ok(CONTACT_THANKS));
        assert_eq!(form.interest, Interest::Newsletter);
        assert_eq!(form.budget, Budget::Unset);
    }

    #[test]
    fn login_waits_one_second_before_resolving() {
        let directory = MockDirectory::new();
        let mut form = LoginForm {
            email: "john@example.com".into(),
            password: "user123".into(),
            ..Default::default()
        };
        assert_eq!(form.update(0.1, &directory), LoginOutcome::Idle);

        form.submit();
        assert!(form.is_loading());
        for _ in 0..9 {
            assert_eq!(form.update(0.1, &directory), LoginOutcome::Pending);
        }
        match form.update(0.15, &directory) {
            LoginOutcome::Success(user) => assert_eq!(user.role, Role::Resident),
            other => panic!("expected success, got {other:?}"),
        }
        assert!(!form.is_loading());
        assert!(form.password.is_empty());
    }

    #[test]
    fn failed_login_keeps_the_error_message() {
        let directory = MockDirectory::new();
        let mut form = LoginForm {
            email: "john@example.com".into(),
            password: "nope".into(),
            ..Default::default()
        };
        form.submit();
        assert_eq!(
            form.update(LOGIN_LATENCY, &directory),
            LoginOutcome::Failed(AuthError::InvalidCredentials)
        );
        assert_eq!(form.error, Some(AuthError::InvalidCredentials));

        form.submit();
        assert_eq!(form.error, None);
    }

    #[test]
    fn support_form_clears_on_submit() {
        let mut form = SupportForm {
            subject: "Heating".into(),
            message: "Radiator is cold".into(),
        };
        assert_eq!(form.submit("john@example.com"), Ok(SUPPORT_THANKS));
        assert_eq!(form, SupportForm::default());
        assert_eq!(form.submit("john@example.com"), Err(SupportError::EmptyMessage));
    }
}
