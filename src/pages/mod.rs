//! Page state for the three implemented routes.
//!
//! Pages hold data and selection only. They know nothing about the terminal,
//! so every transition can be exercised without one. Each page that loads
//! data owns a [`FetchState`](crate::fetch::FetchState) and hands out
//! [`Ticket`](crate::fetch::Ticket)s for the caller to run.

pub mod contact;
pub mod detail;
pub mod home;

pub use contact::{
    CONTACT_CHANNELS, CONTACT_INTRO, ContactChannel, ContactField, ContactForm, FormError,
    SUPPORT_EMAIL, SubmitState, Subject, footer,
};
pub use detail::{DetailPage, DetailView};
pub use home::{HomePage, ListView, series_label};
