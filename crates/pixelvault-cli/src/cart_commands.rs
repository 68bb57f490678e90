// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;

use clap::Subcommand;
use pixelvault_core::{ProductId, SystemClock};
use pixelvault_model::format_price;
use pixelvault_store::{CartStore, LocalFsStorage, MutationOutcome};
use pixelvault_storefront::{CartPage, CartPageAction, CatalogPage, CatalogState, CartView};
use serde_json::json;
use tracing::warn;

use crate::context::AppContext;
use crate::errors::CliError;

#[derive(Subcommand)]
pub(crate) enum CartCommand {
    /// Add one copy of a catalog product.
    Add {
        #[arg(long)]
        id: String,
    },
    /// Set a line's quantity; zero or less removes it.
    Set {
        #[arg(long)]
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,
    },
    Remove {
        #[arg(long)]
        id: String,
    },
    Show,
    Clear,
}

pub(crate) fn run(ctx: &AppContext, command: CartCommand) -> Result<(), CliError> {
    match command {
        CartCommand::Add { id } => add(ctx, &ProductId::new(&id)?),
        CartCommand::Set { id, quantity } => set(ctx, &ProductId::new(&id)?, quantity),
        CartCommand::Remove { id } => remove(ctx, &ProductId::new(&id)?),
        CartCommand::Show => {
            let page = CartPage::new(&ctx.storage, SystemClock, &ctx.config);
            emit_cart(ctx, &page.view(), None)
        }
        CartCommand::Clear => {
            ensure_persisted(cart_store(ctx).clear())?;
            let page = CartPage::new(&ctx.storage, SystemClock, &ctx.config);
            emit_cart(ctx, &page.view(), Some("Cart cleared"))
        }
    }
}

fn cart_store(ctx: &AppContext) -> CartStore<&LocalFsStorage> {
    CartStore::with_tax_rate(&ctx.storage, ctx.config.tax_rate)
}

fn ensure_persisted(outcome: MutationOutcome) -> Result<(), CliError> {
    if outcome.persisted {
        return Ok(());
    }
    warn!(change = ?outcome.change, "cart change was not written");
    Err(CliError::dependency(
        "storage_error",
        "cart change could not be saved",
    ))
}

fn ensure_in_cart(ctx: &AppContext, id: &ProductId) -> Result<(), CliError> {
    if cart_store(ctx).load().contains(id) {
        return Ok(());
    }
    Err(CliError::validation("not_found", &format!("{id} is not in the cart"))
        .with_detail("id", id.as_str()))
}

fn add(ctx: &AppContext, id: &ProductId) -> Result<(), CliError> {
    let mut catalog = CatalogPage::new(ctx.catalog_source(), &ctx.storage, SystemClock, &ctx.config);
    catalog.load();
    if let CatalogState::Failed { message } = catalog.state() {
        return Err(CliError::dependency("catalog_unavailable", message));
    }
    ensure_persisted(catalog.add_to_cart(id)?)?;
    let message = catalog
        .notifications()
        .latest()
        .map(|n| n.message.clone());

    let page = CartPage::new(&ctx.storage, SystemClock, &ctx.config);
    emit_cart(ctx, &page.view(), message.as_deref())
}

fn set(ctx: &AppContext, id: &ProductId, quantity: i64) -> Result<(), CliError> {
    ensure_in_cart(ctx, id)?;
    ensure_persisted(cart_store(ctx).set_quantity(id, quantity))?;
    let page = CartPage::new(&ctx.storage, SystemClock, &ctx.config);
    let message = if quantity <= 0 {
        "Item removed from cart"
    } else {
        "Quantity updated successfully!"
    };
    emit_cart(ctx, &page.view(), Some(message))
}

fn remove(ctx: &AppContext, id: &ProductId) -> Result<(), CliError> {
    ensure_in_cart(ctx, id)?;
    let mut page = CartPage::new(&ctx.storage, SystemClock, &ctx.config);
    page.dispatch(CartPageAction::Remove(id.clone()))?;
    let message = page.notifications().latest().map(|n| n.message.clone());
    emit_cart(ctx, &page.view(), message.as_deref())
}

fn emit_cart(ctx: &AppContext, view: &CartView, message: Option<&str>) -> Result<(), CliError> {
    let stats = cart_store(ctx).stats();
    let payload = json!({
        "message": message,
        "lines": view.lines,
        "totals": view.totals,
        "item_label": view.item_label,
        "checkout_enabled": view.checkout_enabled,
        "stats": stats,
    });
    ctx.output.emit(&payload, || {
        let mut out = String::new();
        if let Some(message) = message {
            let _ = writeln!(out, "{message}");
        }
        if view.is_empty() {
            out.push_str("Your cart is empty.");
            return out;
        }
        for line in &view.lines {
            let _ = writeln!(
                out,
                "{:<14} {:<36} {:>3} x {:>9} = {:>9}",
                line.id.as_str(),
                line.title,
                line.quantity,
                format_price(line.unit_price),
                format_price(line.line_total)
            );
        }
        let _ = writeln!(out, "Subtotal: {}", format_price(view.totals.subtotal));
        let _ = writeln!(out, "Tax: {}", format_price(view.totals.tax));
        let _ = write!(
            out,
            "Total: {} ({})",
            format_price(view.totals.total),
            view.item_label
        );
        out
    })
}
