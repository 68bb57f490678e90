// SPDX-License-Identifier: Apache-2.0

use clap::{Args, Subcommand};
use pixelvault_core::{ProductId, SystemClock};
use pixelvault_model::format_price;
use pixelvault_store::{CatalogSource, NewsletterStore, WishlistChange, WishlistStore};
use pixelvault_storefront::{
    validate_contact_form, ConsentBanner, ContactForm, NewsletterState, NewsletterWidget,
};
use serde_json::json;

use crate::context::AppContext;
use crate::errors::CliError;

const CONTACT_SENT: &str =
    "Thank you! Your message has been sent successfully. We'll get back to you soon.";

#[derive(Subcommand)]
pub(crate) enum NewsletterCommand {
    Subscribe {
        #[arg(long)]
        email: String,
    },
    List,
}

#[derive(Subcommand)]
pub(crate) enum WishlistCommand {
    Add {
        #[arg(long)]
        id: String,
    },
    Remove {
        #[arg(long)]
        id: String,
    },
    List,
}

#[derive(Subcommand)]
pub(crate) enum ConsentCommand {
    Status,
    Accept,
}

#[derive(Args)]
pub(crate) struct ContactArgs {
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
}

pub(crate) fn run_newsletter(ctx: &AppContext, command: NewsletterCommand) -> Result<(), CliError> {
    match command {
        NewsletterCommand::Subscribe { email } => {
            let mut widget = NewsletterWidget::new(&ctx.storage, SystemClock);
            if widget.submit(&email) != NewsletterState::Subscribed {
                return Err(CliError::validation(
                    "invalid_email",
                    "Please enter a valid email address.",
                ));
            }
            let subscribers = NewsletterStore::new(&ctx.storage).list().len();
            let payload = json!({
                "email": email.trim(),
                "status": "subscribed",
                "subscribers": subscribers,
            });
            ctx.output
                .emit(&payload, || format!("Subscribed {}", email.trim()))
        }
        NewsletterCommand::List => {
            let entries = NewsletterStore::new(&ctx.storage).list();
            let payload = json!({ "subscriptions": entries });
            ctx.output.emit(&payload, || {
                entries
                    .iter()
                    .map(|e| format!("{}  {}", e.email, e.date.format("%Y-%m-%d")))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
    }
}

pub(crate) fn run_wishlist(ctx: &AppContext, command: WishlistCommand) -> Result<(), CliError> {
    let wishlist = WishlistStore::new(&ctx.storage);
    let (change, id) = match command {
        WishlistCommand::Add { id } => {
            let id = ProductId::new(&id)?;
            let doc = ctx.catalog_source().fetch_catalog()?;
            let product = doc.find(&id).ok_or_else(|| {
                CliError::validation("not_found", &format!("unknown product {id}"))
                    .with_detail("id", id.as_str())
            })?;
            (wishlist.add(product)?, id)
        }
        WishlistCommand::Remove { id } => {
            let id = ProductId::new(&id)?;
            (wishlist.remove(&id)?, id)
        }
        WishlistCommand::List => {
            let items = wishlist.list();
            let payload = json!({ "items": items });
            return ctx.output.emit(&payload, || {
                if items.is_empty() {
                    return "Your wishlist is empty.".to_string();
                }
                items
                    .iter()
                    .map(|p| {
                        format!(
                            "{:<14} {:<36} {:>9}",
                            p.id.as_str(),
                            p.title,
                            format_price(p.price)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            });
        }
    };

    let message = match change {
        WishlistChange::Added => "Game added to wishlist!",
        WishlistChange::Removed => "Game removed from wishlist!",
        WishlistChange::AlreadyPresent => "Game is already on your wishlist.",
        WishlistChange::Absent => "Game is not on your wishlist.",
    };
    let payload = json!({
        "id": id,
        "message": message,
        "items": wishlist.list().len(),
    });
    ctx.output.emit(&payload, || message.to_string())
}

pub(crate) fn run_consent(ctx: &AppContext, command: ConsentCommand) -> Result<(), CliError> {
    let banner = ConsentBanner::new(&ctx.storage);
    if let ConsentCommand::Accept = command {
        banner.accept()?;
    }
    let consented = !banner.is_visible();
    let payload = json!({ "consented": consented, "banner_visible": !consented });
    ctx.output.emit(&payload, || {
        if consented {
            "Cookie consent: accepted".to_string()
        } else {
            "Cookie consent: not given".to_string()
        }
    })
}

pub(crate) fn run_contact(ctx: &AppContext, args: ContactArgs) -> Result<(), CliError> {
    let form = ContactForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        phone: args.phone,
        subject: args.subject,
        message: args.message,
    };
    let errors = validate_contact_form(&form);
    if let Some((field, message)) = errors.iter().next() {
        let mut err = CliError::validation("invalid_form", &format!("{field}: {message}"));
        for (field, message) in &errors {
            err = err.with_detail(&field.to_string(), message);
        }
        return Err(err);
    }
    let payload = json!({ "status": "sent", "message": CONTACT_SENT });
    ctx.output.emit(&payload, || CONTACT_SENT.to_string())
}
