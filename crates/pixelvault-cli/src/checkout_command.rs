// SPDX-License-Identifier: Apache-2.0

use clap::Args;
use pixelvault_core::{Clock, ManualClock, SystemClock};
use pixelvault_model::{format_price, ContactInfo};
use pixelvault_storefront::{CartPage, CheckoutFlow, CheckoutHandoff, CheckoutOpen, PollOutcome};
use serde_json::json;

use crate::context::AppContext;
use crate::errors::CliError;

const EMPTY_CART: &str = "Your cart is empty!";

#[derive(Args)]
pub(crate) struct CheckoutArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Fixes the random part of the order id.
    #[arg(long, hide = true)]
    seed: Option<u64>,
}

/// Runs the whole checkout in one go. The processing delay is simulated on
/// a manual clock started at the current time, so the command never sleeps.
pub(crate) fn run(ctx: &AppContext, args: CheckoutArgs) -> Result<(), CliError> {
    let mut cart_page = CartPage::new(&ctx.storage, SystemClock, &ctx.config);
    if cart_page.proceed_to_checkout()? == CheckoutHandoff::EmptyCart {
        return Err(CliError::validation("empty_cart", EMPTY_CART));
    }

    let clock = ManualClock::starting_at(SystemClock.now_millis());
    let mut flow = CheckoutFlow::new(&ctx.storage, clock.clone(), &ctx.config);
    if let Some(seed) = args.seed {
        flow = flow.with_seed(seed);
    }
    if flow.open() == CheckoutOpen::RedirectToCart {
        return Err(CliError::validation("empty_cart", EMPTY_CART));
    }
    flow.submit_contact(ContactInfo {
        name: args.name,
        email: args.email,
        phone: args.phone,
    })?;
    let (cart, totals) = flow.summary();

    flow.place_order()?;
    clock.advance(ctx.config.order_processing_delay());
    let confirmation = match flow.poll()? {
        PollOutcome::Confirmed(confirmation) => confirmation,
        PollOutcome::Failed { message } => {
            return Err(CliError::dependency("order_failed", &message))
        }
        PollOutcome::Pending | PollOutcome::Idle => {
            return Err(CliError::internal("order did not complete"))
        }
    };
    let contact = flow.contact().cloned().unwrap_or_default();

    let payload = json!({
        "order_id": confirmation.order_id,
        "items": cart.item_count(),
        "subtotal": totals.subtotal,
        "tax": totals.tax,
        "total": confirmation.total,
        "contact": contact,
    });
    ctx.output.emit(&payload, || {
        format!(
            "Order {} confirmed for {} <{}>.\nSubtotal: {}\nTax: {}\nTotal: {}",
            confirmation.order_id,
            contact.name,
            contact.email,
            format_price(totals.subtotal),
            format_price(totals.tax),
            format_price(confirmation.total)
        )
    })
}
