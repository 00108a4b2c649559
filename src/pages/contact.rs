//! Contact page: a form with a simulated submission.
//!
//! Nothing is sent anywhere. Submitting holds [`SubmitState::Submitting`]
//! for [`SUBMIT_DELAY`], then shows a confirmation for [`SUCCESS_DISPLAY`].
//! The clock is passed in, so the caller decides how time advances.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use kisetsu::pages::{ContactForm, SubmitState, Subject};
//!
//! let mut form = ContactForm::new();
//! form.name = "Aiko".into();
//! form.email = "aiko@example.com".into();
//! form.subject = Some(Subject::Feedback);
//! form.message = "Love the seasonal view.".into();
//!
//! let start = Instant::now();
//! form.submit(start).unwrap();
//! assert!(matches!(form.state(), SubmitState::Submitting { .. }));
//!
//! form.tick(start + Duration::from_millis(1500));
//! assert!(matches!(form.state(), SubmitState::Success { .. }));
//! assert!(form.name.is_empty());
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::info;

/// How long a submission appears to be in flight.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(1500);

/// How long the confirmation stays before the form resets.
pub const SUCCESS_DISPLAY: Duration = Duration::from_millis(3000);

/// Support address shown beside the form.
pub const SUPPORT_EMAIL: &str = "support@animescraper.com";

/// Lead paragraph of the "Get in touch" panel.
pub const CONTACT_INTRO: &str =
    "We're here to help and answer any questions you might have. We look forward to hearing from you.";

/// One entry of the "Get in touch" panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactChannel {
    pub heading: &'static str,
    pub detail: &'static str,
    pub note: &'static str,
}

/// Static contact details, in display order.
pub const CONTACT_CHANNELS: [ContactChannel; 3] = [
    ContactChannel {
        heading: "Email",
        detail: SUPPORT_EMAIL,
        note: "We'll respond within 24 hours",
    },
    ContactChannel {
        heading: "Response Time",
        detail: "Within 24 hours",
        note: "Monday - Friday",
    },
    ContactChannel {
        heading: "FAQ",
        detail: "Check our FAQ section",
        note: "Quick answers to common questions",
    },
];

/// Page footer for the given year.
pub fn footer(year: i32) -> String {
    format!("© {} AnimeScraper. All rights reserved.", year)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    General,
    Support,
    Feedback,
    Suggestion,
    Bug,
    Other,
}

impl Subject {
    pub const ALL: [Subject; 6] = [
        Subject::General,
        Subject::Support,
        Subject::Feedback,
        Subject::Suggestion,
        Subject::Bug,
        Subject::Other,
    ];

    /// Form value of the option.
    pub fn value(self) -> &'static str {
        match self {
            Subject::General => "general",
            Subject::Support => "support",
            Subject::Feedback => "feedback",
            Subject::Suggestion => "suggestion",
            Subject::Bug => "bug",
            Subject::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Subject::General => "General Inquiry",
            Subject::Support => "Technical Support",
            Subject::Feedback => "Feedback",
            Subject::Suggestion => "Suggestion",
            Subject::Bug => "Bug Report",
            Subject::Other => "Other",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Focusable rows of the form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
    Submit,
}

impl ContactField {
    pub const ALL: [ContactField; 5] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Subject,
        ContactField::Message,
        ContactField::Submit,
    ];

    pub fn next(self) -> Self {
        match self {
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Subject,
            ContactField::Subject => ContactField::Message,
            ContactField::Message => ContactField::Submit,
            ContactField::Submit => ContactField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ContactField::Name => ContactField::Submit,
            ContactField::Email => ContactField::Name,
            ContactField::Subject => ContactField::Email,
            ContactField::Message => ContactField::Subject,
            ContactField::Submit => ContactField::Message,
        }
    }

    /// Whether the row takes typed text.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            ContactField::Name | ContactField::Email | ContactField::Message
        )
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Subject => "Subject",
            ContactField::Message => "Message",
            ContactField::Submit => "Send Message",
        };
        f.write_str(label)
    }
}

/// Reasons a submission is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(ContactField),

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting { since: Instant },
    Success { since: Instant },
}

/// Contents and submission state of the contact form.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: Option<Subject>,
    pub message: String,
    pub focus: ContactField,
    state: SubmitState,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            subject: None,
            message: String::new(),
            focus: ContactField::Name,
            state: SubmitState::Idle,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmitState::Submitting { .. })
    }

    /// Checks every required field, in form order.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::Missing(ContactField::Name));
        }
        if self.email.trim().is_empty() {
            return Err(FormError::Missing(ContactField::Email));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(FormError::InvalidEmail);
        }
        if self.subject.is_none() {
            return Err(FormError::Missing(ContactField::Subject));
        }
        if self.message.trim().is_empty() {
            return Err(FormError::Missing(ContactField::Message));
        }
        Ok(())
    }

    /// Starts the simulated submission.
    ///
    /// A second submit while one is in flight is ignored.
    pub fn submit(&mut self, now: Instant) -> Result<(), FormError> {
        if self.is_submitting() {
            return Ok(());
        }
        self.validate()?;
        info!(
            subject = self.subject.map(Subject::value).unwrap_or_default(),
            "contact form submitted"
        );
        self.state = SubmitState::Submitting { since: now };
        Ok(())
    }

    /// Advances the submission timers. Returns whether the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            SubmitState::Submitting { since } if now.duration_since(since) >= SUBMIT_DELAY => {
                self.clear_fields();
                self.state = SubmitState::Success { since: now };
                true
            }
            SubmitState::Success { since } if now.duration_since(since) >= SUCCESS_DISPLAY => {
                self.state = SubmitState::Idle;
                true
            }
            _ => false,
        }
    }

    fn clear_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.subject = None;
        self.message.clear();
        self.focus = ContactField::Name;
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            ContactField::Name => Some(&mut self.name),
            ContactField::Email => Some(&mut self.email),
            ContactField::Message => Some(&mut self.message),
            ContactField::Subject | ContactField::Submit => None,
        }
    }

    /// Types a character into the focused text field.
    pub fn input(&mut self, c: char) {
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Steps the subject selection. An unset subject starts at the first option.
    pub fn cycle_subject(&mut self, forward: bool) {
        self.subject = Some(match (self.subject, forward) {
            (None, true) => Subject::ALL[0],
            (None, false) => Subject::ALL[Subject::ALL.len() - 1],
            (Some(current), true) => current.next(),
            (Some(current), false) => current.prev(),
        });
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
