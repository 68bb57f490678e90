// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use pixelvault_core::{Clock, OrderId};
use pixelvault_model::{Cart, CartTotals, ContactInfo, OrderConfirmation};
use pixelvault_store::{CartStore, KeyValueStorage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::config::StorefrontConfig;
use crate::error::{StorefrontError, StorefrontErrorCode};
use crate::forms::is_valid_email;
use crate::notifications::{NotificationKind, Notifications};
use crate::scheduler::{Scheduler, TaskId};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ORDER_SUFFIX_LEN: usize = 5;
const ORDER_FAILED_MESSAGE: &str = "There was an error processing your order. Please try again.";

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// `OGFL-<base36 millis>-<5 random base36 chars>`, uppercased.
pub fn generate_order_id<R: Rng + ?Sized>(
    now_millis: u64,
    rng: &mut R,
) -> Result<OrderId, pixelvault_core::Error> {
    let suffix: String = (0..ORDER_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect();
    OrderId::from_parts(&to_base36(now_millis), &suffix)
}

/// Phone input mask over at most 10 digits. The area code is bracketed
/// from the third digit; a partial local number of 6 to 9 digits stays
/// bare until the full `(xxx) xxx-xxxx` shape is reached.
#[must_use]
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(10).collect();
    match digits.len() {
        3..=5 => format!("({}) {}", &digits[..3], &digits[3..]),
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => digits,
    }
}

/// Backend hook for order placement. Errors are shown to the shopper, who
/// may retry straight away.
pub trait OrderProcessor {
    fn process(&mut self, contact: &ContactInfo, cart: &Cart, totals: &CartTotals)
        -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysApprove;

impl OrderProcessor for AlwaysApprove {
    fn process(&mut self, _: &ContactInfo, _: &Cart, _: &CartTotals) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckoutStep {
    Contact = 1,
    Review = 2,
}

impl CheckoutStep {
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    fn from_number(n: u8) -> Self {
        if n <= 1 {
            Self::Contact
        } else {
            Self::Review
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOpen {
    Ready,
    RedirectToCart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderStatus {
    Idle,
    Processing { task: TaskId },
    Confirmed(OrderConfirmation),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Idle,
    Pending,
    Confirmed(OrderConfirmation),
    Failed { message: String },
}

/// Two-step checkout: contact details, then review and place order.
pub struct CheckoutFlow<S, C, P = AlwaysApprove> {
    cart: CartStore<S>,
    scheduler: Scheduler<C, ()>,
    notifications: Notifications<C>,
    processor: P,
    rng: StdRng,
    delay: Duration,
    step: CheckoutStep,
    contact: Option<ContactInfo>,
    status: OrderStatus,
}

impl<S, C> CheckoutFlow<S, C, AlwaysApprove>
where
    S: KeyValueStorage,
    C: Clock + Clone,
{
    #[must_use]
    pub fn new(storage: S, clock: C, config: &StorefrontConfig) -> Self {
        Self::with_processor(storage, clock, config, AlwaysApprove)
    }
}

impl<S, C, P> CheckoutFlow<S, C, P>
where
    S: KeyValueStorage,
    C: Clock + Clone,
    P: OrderProcessor,
{
    #[must_use]
    pub fn with_processor(storage: S, clock: C, config: &StorefrontConfig, processor: P) -> Self {
        Self {
            cart: CartStore::with_tax_rate(storage, config.tax_rate),
            scheduler: Scheduler::new(clock.clone()),
            notifications: Notifications::new(clock, config.notification_ttl()),
            processor,
            rng: StdRng::from_entropy(),
            delay: config.order_processing_delay(),
            step: CheckoutStep::Contact,
            contact: None,
            status: OrderStatus::Idle,
        }
    }

    /// Fixes the order-id randomness.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Checkout is only reachable with something in the cart.
    pub fn open(&mut self) -> CheckoutOpen {
        if self.cart.load().is_empty() {
            return CheckoutOpen::RedirectToCart;
        }
        self.step = CheckoutStep::Contact;
        CheckoutOpen::Ready
    }

    #[must_use]
    pub fn summary(&self) -> (Cart, CartTotals) {
        let cart = self.cart.load();
        let totals = cart.totals(self.cart.tax_rate());
        (cart, totals)
    }

    pub fn submit_contact(&mut self, contact: ContactInfo) -> Result<(), StorefrontError> {
        let contact = ContactInfo {
            name: contact.name.trim().to_string(),
            email: contact.email.trim().to_string(),
            phone: format_phone(&contact.phone),
        };
        if contact.name.is_empty() || contact.email.is_empty() {
            return Err(self.reject("Please fill in all required fields."));
        }
        if !is_valid_email(&contact.email) {
            return Err(self.reject("Please enter a valid email address."));
        }
        self.contact = Some(contact);
        self.next_step();
        Ok(())
    }

    pub fn next_step(&mut self) -> CheckoutStep {
        self.step = CheckoutStep::from_number(self.step.number().saturating_add(1));
        self.step
    }

    pub fn previous_step(&mut self) -> CheckoutStep {
        self.step = CheckoutStep::from_number(self.step.number().saturating_sub(1));
        self.step
    }

    /// Jumps back to an earlier step from the review page.
    pub fn edit_step(&mut self, step: u8) -> CheckoutStep {
        self.step = CheckoutStep::from_number(step);
        self.step
    }

    /// Starts the simulated processing delay. A second press while an order
    /// is in flight returns the same task.
    pub fn place_order(&mut self) -> Result<TaskId, StorefrontError> {
        if let OrderStatus::Processing { task } = self.status {
            return Ok(task);
        }
        if self.contact.is_none() {
            return Err(self.reject("Please fill in all required fields."));
        }
        if self.cart.load().is_empty() {
            return Err(StorefrontError::new(
                StorefrontErrorCode::Validation,
                "cart is empty",
            ));
        }
        let task = self.scheduler.schedule_after(self.delay, ());
        self.status = OrderStatus::Processing { task };
        Ok(task)
    }

    /// Cancels an order that is still processing.
    pub fn cancel_order(&mut self) -> bool {
        if let OrderStatus::Processing { task } = self.status {
            self.scheduler.cancel(task);
            self.status = OrderStatus::Idle;
            return true;
        }
        false
    }

    pub fn poll(&mut self) -> Result<PollOutcome, StorefrontError> {
        let OrderStatus::Processing { task } = self.status else {
            return Ok(match &self.status {
                OrderStatus::Confirmed(confirmation) => PollOutcome::Confirmed(confirmation.clone()),
                _ => PollOutcome::Idle,
            });
        };
        if !self.scheduler.due().iter().any(|(id, ())| *id == task) {
            return Ok(PollOutcome::Pending);
        }

        let (cart, totals) = self.summary();
        let contact = self.contact.clone().unwrap_or_default();
        if let Err(message) = self.processor.process(&contact, &cart, &totals) {
            warn!(error = %message, "order processing failed");
            self.status = OrderStatus::Idle;
            self.notifications
                .push(ORDER_FAILED_MESSAGE, NotificationKind::Error);
            return Ok(PollOutcome::Failed { message });
        }

        let order_id = generate_order_id(self.scheduler.now_millis(), &mut self.rng)
            .map_err(|e| StorefrontError::new(StorefrontErrorCode::Validation, e.to_string()))?;
        let confirmation = OrderConfirmation {
            order_id,
            total: totals.total,
        };
        let cleared = self.cart.clear();
        if !cleared.persisted {
            warn!("cart was not cleared after order placement");
        }
        info!(
            order_id = %confirmation.order_id,
            total = confirmation.total,
            lines = cart.len(),
            "order placed"
        );
        self.status = OrderStatus::Confirmed(confirmation.clone());
        Ok(PollOutcome::Confirmed(confirmation))
    }

    #[must_use]
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub fn contact(&self) -> Option<&ContactInfo> {
        self.contact.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    #[must_use]
    pub fn notifications(&self) -> &Notifications<C> {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications<C> {
        &mut self.notifications
    }

    fn reject(&mut self, message: &str) -> StorefrontError {
        self.notifications.push(message, NotificationKind::Error);
        StorefrontError::new(StorefrontErrorCode::Validation, message)
    }
}
