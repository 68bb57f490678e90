// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Page controllers for the storefront.
//!
//! Each controller owns its page state explicitly and exposes actions as
//! method calls returning view models; rendering is left to the caller.
//! Timed behavior (order processing, notification expiry, countdowns) runs
//! on a [`Scheduler`] driven by a [`pixelvault_core::Clock`], so tests can
//! fast-forward instead of sleeping.

mod cart_page;
mod catalog_page;
mod checkout;
mod config;
mod consent;
mod countdown;
mod error;
mod forms;
mod game_details;
mod newsletter;
mod notifications;
mod scheduler;

pub use cart_page::{CartLineView, CartPage, CartPageAction, CartView, CheckoutHandoff};
pub use catalog_page::{CatalogAction, CatalogPage, CatalogState, CatalogView, PageView};
pub use checkout::{
    format_phone, generate_order_id, AlwaysApprove, CheckoutFlow, CheckoutOpen, CheckoutStep,
    OrderProcessor, OrderStatus, PollOutcome,
};
pub use config::{StorefrontConfig, ENV_PIXELVAULT_PAGE_SIZE, ENV_PIXELVAULT_TAX_RATE};
pub use consent::ConsentBanner;
pub use countdown::{Countdown, CountdownTick};
pub use error::{StorefrontError, StorefrontErrorCode};
pub use forms::{
    is_valid_email, validate_contact_form, ContactForm, ContactFormField, FieldErrors,
};
pub use game_details::{GameDetails, GameDetailsView};
pub use newsletter::{NewsletterState, NewsletterWidget};
pub use notifications::{Notification, NotificationKind, Notifications, CART_NOT_SAVED};
pub use scheduler::{Scheduler, TaskId};

pub const CRATE_NAME: &str = "pixelvault-storefront";
