// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;
use std::fs;

use clap::{Args, Subcommand};
use pixelvault_core::{sha256_hex, ProductId, ResultExt, SystemClock};
use pixelvault_model::{
    format_price, parse_catalog_json, parse_selection, Category, Platform, PriceRange, Product,
    SortKey,
};
use pixelvault_query::{
    new_releases, normalized_query_hash, trending, trending_score, DeepLink, NEW_RELEASES_COUNT,
    TRENDING_COUNT,
};
use pixelvault_store::CatalogSource;
use pixelvault_storefront::{
    CatalogPage, CatalogState, CatalogView, GameDetails, GameDetailsView,
};
use serde_json::json;

use crate::context::AppContext;
use crate::errors::CliError;

#[derive(Subcommand)]
pub(crate) enum CatalogCommand {
    /// Filter, sort and page through the catalog.
    List(ListArgs),
    Show {
        #[arg(long)]
        id: String,
    },
    /// Parse and check the catalog file, printing its checksum.
    Validate,
    Trending,
    NewReleases,
}

#[derive(Args)]
pub(crate) struct ListArgs {
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value = "all")]
    category: String,
    #[arg(long, default_value = "all")]
    platform: String,
    #[arg(long, default_value = "all")]
    price: String,
    #[arg(long, default_value = "featured")]
    sort: String,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long)]
    page_size: Option<usize>,
}

pub(crate) fn run(ctx: &AppContext, command: CatalogCommand) -> Result<(), CliError> {
    match command {
        CatalogCommand::List(args) => list(ctx, args),
        CatalogCommand::Show { id } => show(ctx, &id),
        CatalogCommand::Validate => validate(ctx),
        CatalogCommand::Trending => featured(ctx, "trending", |products| {
            trending(products, TRENDING_COUNT)
        }),
        CatalogCommand::NewReleases => featured(ctx, "new_releases", |products| {
            new_releases(products, NEW_RELEASES_COUNT)
        }),
    }
}

fn product_row(product: &Product) -> String {
    format!(
        "{:<14} {:<36} {:>9}  {}",
        product.id.as_str(),
        product.title,
        format_price(product.price),
        product.category
    )
}

fn list(ctx: &AppContext, args: ListArgs) -> Result<(), CliError> {
    let mut config = ctx.config.clone();
    if let Some(size) = args.page_size {
        config.page_size = size;
        config.validate()?;
    }
    let link = DeepLink {
        id: None,
        category: Some(parse_selection::<Category>(&args.category)?),
        platform: Some(parse_selection::<Platform>(&args.platform)?),
        price_range: Some(parse_selection::<PriceRange>(&args.price)?),
        search: Some(args.search),
        sort: Some(args.sort.parse::<SortKey>()?),
        page: Some(args.page),
    };

    let mut page = CatalogPage::new(ctx.catalog_source(), &ctx.storage, SystemClock, &config);
    page.load();
    if let CatalogState::Failed { message } = page.state() {
        return Err(CliError::dependency("catalog_unavailable", message));
    }
    page.apply_deep_link(&link)?;

    let info = page.page_info();
    let query_hash = normalized_query_hash(page.query())?;
    let view = page.view();
    let items: Vec<&Product> = match &view {
        CatalogView::Results(results) => results.items.clone(),
        _ => Vec::new(),
    };
    let payload = json!({
        "page": info.page,
        "page_size": info.page_size,
        "total_pages": info.total_pages,
        "total_items": info.total_items,
        "catalog_size": page.products().len(),
        "query_hash": query_hash,
        "items": items,
    });
    ctx.output.emit(&payload, || match &view {
        CatalogView::Results(results) => {
            let mut out = String::new();
            for product in &results.items {
                let _ = writeln!(out, "{}", product_row(product));
            }
            let (first, last) = results.range.unwrap_or((0, 0));
            let _ = write!(
                out,
                "Showing {first}-{last} of {} games (page {} of {})",
                results.info.total_items, results.info.page, results.info.total_pages
            );
            out
        }
        _ => "No games match your filters.".to_string(),
    })
}

fn show(ctx: &AppContext, raw_id: &str) -> Result<(), CliError> {
    let link = DeepLink {
        id: Some(ProductId::new(raw_id)?),
        ..DeepLink::default()
    };
    let mut details = GameDetails::new(&ctx.storage, SystemClock, &ctx.config);
    details.open(&ctx.catalog_source(), &link);

    let (product, similar, in_wishlist) = match details.view() {
        Some(GameDetailsView::Ready {
            product,
            similar,
            in_wishlist,
        }) => (product, similar, in_wishlist),
        Some(GameDetailsView::Error { message }) => {
            return Err(CliError::validation("not_found", message).with_detail("id", raw_id))
        }
        None => return Err(CliError::internal("game details were not resolved")),
    };

    let similar_ids: Vec<&str> = similar.iter().map(|p| p.id.as_str()).collect();
    let payload = json!({
        "product": product,
        "similar": similar_ids,
        "in_wishlist": in_wishlist,
    });
    ctx.output.emit(&payload, || {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", product.title, product.id);
        if !product.subtitle.is_empty() {
            let _ = writeln!(out, "{}", product.subtitle);
        }
        if product.has_discount() {
            let _ = writeln!(
                out,
                "Price: {} (was {}, -{}%)",
                format_price(product.price),
                format_price(product.original_price()),
                product.discount_percentage
            );
        } else {
            let _ = writeln!(out, "Price: {}", format_price(product.price));
        }
        let _ = writeln!(out, "Category: {}", product.category);
        let _ = writeln!(out, "Platforms: {}", product.platforms.join(", "));
        if let Some(date) = &product.release_date {
            let _ = writeln!(out, "Released: {date}");
        }
        let _ = writeln!(
            out,
            "Scores: user {:.1}, critic {:.0}",
            product.user_score, product.critic_score
        );
        if !product.description.is_empty() {
            let _ = writeln!(out, "\n{}", product.description);
        }
        if in_wishlist {
            let _ = writeln!(out, "\nOn your wishlist.");
        }
        if !similar.is_empty() {
            let _ = writeln!(out, "\nSimilar games:");
            for game in &similar {
                let _ = writeln!(out, "  {}", product_row(game));
            }
        }
        out.trim_end().to_string()
    })
}

fn validate(ctx: &AppContext) -> Result<(), CliError> {
    let raw = fs::read_to_string(&ctx.catalog_path).with_context("read catalog file")?;
    let doc = parse_catalog_json(&raw)?;
    doc.validate()?;
    let checksum = sha256_hex(raw.as_bytes());
    let payload = json!({
        "status": "ok",
        "path": ctx.catalog_path,
        "products": doc.products().len(),
        "sha256": checksum,
    });
    ctx.output.emit(&payload, || {
        format!(
            "catalog validation: OK ({} products, sha256 {checksum})",
            doc.products().len()
        )
    })
}

fn featured<F>(ctx: &AppContext, label: &str, select: F) -> Result<(), CliError>
where
    F: for<'a> FnOnce(&'a [Product]) -> Vec<&'a Product>,
{
    let doc = ctx.catalog_source().fetch_catalog()?;
    let picks = select(doc.products());
    let rows: Vec<_> = picks
        .iter()
        .map(|p| {
            json!({
                "id": p.id,
                "title": p.title,
                "price": p.price,
                "release_date": p.release_date,
                "trending_score": trending_score(p),
            })
        })
        .collect();
    let payload = json!({ "selection": label, "items": rows });
    ctx.output.emit(&payload, || {
        picks
            .iter()
            .map(|p| product_row(p))
            .collect::<Vec<_>>()
            .join("\n")
    })
}
