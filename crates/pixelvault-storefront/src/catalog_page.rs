// SPDX-License-Identifier: Apache-2.0

use pixelvault_core::{Clock, ProductId};
use pixelvault_model::{Category, Platform, PriceRange, Product, SortKey};
use pixelvault_query::{
    apply_filters, get_page, pagination_window, validate_query, CatalogQuery, DeepLink, PageInfo,
    QueryLimits,
};
use pixelvault_store::{CartStore, CatalogSource, KeyValueStorage, MutationOutcome};
use tracing::{info, warn};

use crate::config::StorefrontConfig;
use crate::error::{StorefrontError, StorefrontErrorCode};
use crate::notifications::Notifications;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Ready,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    Search(String),
    Category(Option<Category>),
    Platform(Option<Platform>),
    PriceRange(Option<PriceRange>),
    Sort(SortKey),
    GoToPage(usize),
    NextPage,
    PreviousPage,
    Reset,
    AddToCart(ProductId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub items: Vec<&'a Product>,
    pub info: PageInfo,
    /// Page numbers for the pager buttons.
    pub window: Vec<usize>,
    /// 1-based positions of the first and last item shown.
    pub range: Option<(usize, usize)>,
    pub catalog_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogView<'a> {
    Loading,
    Error { message: String },
    NoResults,
    Results(PageView<'a>),
}

/// The browse page. Holds the dataset fetched once per page load plus the
/// filter/sort/page state; the visible slice is always recomputed from
/// the full dataset.
pub struct CatalogPage<Src, S, C> {
    source: Src,
    cart: CartStore<S>,
    notifications: Notifications<C>,
    limits: QueryLimits,
    default_page_size: usize,
    products: Vec<Product>,
    query: CatalogQuery,
    state: CatalogState,
}

impl<Src, S, C> CatalogPage<Src, S, C>
where
    Src: CatalogSource,
    S: KeyValueStorage,
    C: Clock,
{
    #[must_use]
    pub fn new(source: Src, storage: S, clock: C, config: &StorefrontConfig) -> Self {
        Self {
            source,
            cart: CartStore::with_tax_rate(storage, config.tax_rate),
            notifications: Notifications::new(clock, config.notification_ttl()),
            limits: config.query_limits(),
            default_page_size: config.page_size,
            products: Vec::new(),
            query: CatalogQuery {
                page_size: config.page_size,
                ..CatalogQuery::default()
            },
            state: CatalogState::Loading,
        }
    }

    /// Fetches the dataset. On failure the page shows the error view until
    /// [`CatalogPage::retry`] is called.
    pub fn load(&mut self) -> &CatalogState {
        self.state = CatalogState::Loading;
        match self.source.fetch_catalog() {
            Ok(doc) => {
                self.products = doc.into_products();
                self.state = CatalogState::Ready;
                self.clamp_page();
                info!(products = self.products.len(), "catalog ready");
            }
            Err(err) => {
                warn!(error = %err, "catalog load failed");
                self.products.clear();
                self.state = CatalogState::Failed {
                    message: err.to_string(),
                };
            }
        }
        &self.state
    }

    /// Re-fetches only from the failed state. Returns whether a fetch ran.
    pub fn retry(&mut self) -> bool {
        if !matches!(self.state, CatalogState::Failed { .. }) {
            return false;
        }
        self.load();
        true
    }

    pub fn apply_deep_link(&mut self, link: &DeepLink) -> Result<(), StorefrontError> {
        let mut next = self.query.clone();
        link.apply_to(&mut next);
        self.commit(next)
    }

    pub fn dispatch(&mut self, action: CatalogAction) -> Result<(), StorefrontError> {
        if self.state != CatalogState::Ready {
            return Ok(());
        }
        let mut next = self.query.clone();
        match action {
            CatalogAction::Search(text) => {
                next.filter.search = text;
                next.page = 1;
            }
            CatalogAction::Category(category) => {
                next.filter.category = category;
                next.page = 1;
            }
            CatalogAction::Platform(platform) => {
                next.filter.platform = platform;
                next.page = 1;
            }
            CatalogAction::PriceRange(range) => {
                next.filter.price_range = range;
                next.page = 1;
            }
            CatalogAction::Sort(sort) => next.sort = sort,
            CatalogAction::GoToPage(page) => {
                self.go_to_page(page);
                return Ok(());
            }
            CatalogAction::NextPage => {
                self.go_to_page(self.query.page + 1);
                return Ok(());
            }
            CatalogAction::PreviousPage => {
                self.go_to_page(self.query.page.saturating_sub(1));
                return Ok(());
            }
            CatalogAction::Reset => {
                next = CatalogQuery {
                    page_size: self.default_page_size,
                    ..CatalogQuery::default()
                };
            }
            CatalogAction::AddToCart(id) => return self.add_to_cart(&id).map(|_| ()),
        }
        self.commit(next)
    }

    pub fn add_to_cart(&mut self, id: &ProductId) -> Result<MutationOutcome, StorefrontError> {
        let product = self
            .products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| {
                StorefrontError::new(StorefrontErrorCode::NotFound, format!("unknown product {id}"))
            })?;
        let outcome = self.cart.add_product(product);
        self.notifications
            .push_cart_outcome(&outcome, format!("{} added to cart!", product.title));
        Ok(outcome)
    }

    #[must_use]
    pub fn view(&self) -> CatalogView<'_> {
        match &self.state {
            CatalogState::Loading => CatalogView::Loading,
            CatalogState::Failed { message } => CatalogView::Error {
                message: message.clone(),
            },
            CatalogState::Ready => {
                let filtered = apply_filters(&self.products, &self.query);
                if filtered.is_empty() {
                    return CatalogView::NoResults;
                }
                let info = PageInfo::new(self.query.page, self.query.page_size, filtered.len());
                CatalogView::Results(PageView {
                    items: get_page(&filtered, info.page, info.page_size).to_vec(),
                    window: pagination_window(
                        info.page,
                        info.total_pages,
                        self.limits.max_visible_pages,
                    ),
                    range: info.display_range(),
                    info,
                    catalog_size: self.products.len(),
                })
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    #[must_use]
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    #[must_use]
    pub fn notifications(&self) -> &Notifications<C> {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications<C> {
        &mut self.notifications
    }

    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        let filtered = apply_filters(&self.products, &self.query);
        PageInfo::new(self.query.page, self.query.page_size, filtered.len())
    }

    // Out-of-range requests are ignored, like a disabled pager button.
    fn go_to_page(&mut self, page: usize) {
        let info = self.page_info();
        if page >= 1 && page <= info.total_pages {
            self.query.page = page;
        }
    }

    fn commit(&mut self, next: CatalogQuery) -> Result<(), StorefrontError> {
        validate_query(&next, &self.limits)?;
        self.query = next;
        self.clamp_page();
        Ok(())
    }

    fn clamp_page(&mut self) {
        self.query.page = self.page_info().page;
    }
}
