//! Shared controller behind the bookings and payments list pages.
//!
//! `Idle → Loading → Loaded | Errored`, re-entering `Loading` whenever the
//! page, a filter, or the committed search changes. Mutators return `true`
//! when a reload is due; the caller then runs [`ListController::refresh`]
//! (or `begin_load` / `finish_load` when it drives the fetch itself).
//!
//! Every load gets a ticket with an increasing sequence number. Only the
//! most recently issued ticket may update the state, so a slow response for
//! an old page can never overwrite a newer one.

use crate::client::{ClientError, ListQuery};
use crate::models::{Booking, BookingStatus, BookingType, Currency, ExchangeRateTable, Page, Payment, PaymentStatus};

use super::currency::convert;
use super::debounce::normalize_search;
use super::pagination::total_pages;
use super::source::PageSource;

/// A row type a list page can show.
pub trait ListRow: Clone + Send + Sync + 'static {
    /// Local search over the loaded page. `needle` is already lowercased.
    fn matches_search(&self, needle: &str) -> bool;

    /// Amount in the home currency.
    fn amount(&self) -> f64;

    /// Canonical status for a user-selected filter value.
    fn canonical_status(raw: &str) -> Option<String>;
}

impl ListRow for Booking {
    fn matches_search(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle) || self.user.to_lowercase().contains(needle)
    }

    fn amount(&self) -> f64 {
        self.total_amount
    }

    fn canonical_status(raw: &str) -> Option<String> {
        BookingStatus::parse(raw).map(String::from)
    }
}

impl ListRow for Payment {
    fn matches_search(&self, needle: &str) -> bool {
        self.payment_id.to_lowercase().contains(needle) || self.user.to_lowercase().contains(needle)
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn canonical_status(raw: &str) -> Option<String> {
        PaymentStatus::parse(raw).map(String::from)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(Page<T>),
    Errored { message: String, unauthorized: bool },
}

/// Identity of one issued load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    seq: u64,
    query: ListQuery,
}

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown status filter '{0}'")]
pub struct UnknownStatus(pub String);

pub struct ListController<T, S> {
    source: S,
    page_size: u32,
    page: u32,
    default_kind: Option<BookingType>,
    kind: Option<BookingType>,
    unavailable_kind: Option<BookingType>,
    send_kind: bool,
    status: Option<String>,
    date: Option<String>,
    search: String,
    currency: Currency,
    rates: Option<ExchangeRateTable>,
    state: LoadState<T>,
    issued: u64,
}

impl<T, S> ListController<T, S>
where
    T: ListRow,
    S: PageSource<T>,
{
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            page_size,
            page: 1,
            default_kind: None,
            kind: None,
            unavailable_kind: None,
            send_kind: true,
            status: None,
            date: None,
            search: String::new(),
            currency: Currency::NGN,
            rates: None,
            state: LoadState::Idle,
            issued: 0,
        }
    }

    /// Start on, and reset back to, this type tab.
    pub fn with_kind(mut self, kind: BookingType) -> Self {
        self.default_kind = Some(kind.clone());
        self.kind = Some(kind);
        self
    }

    /// A type tab that is not served yet: selecting it shows an empty list
    /// without asking the server.
    pub fn with_unavailable_kind(mut self, kind: BookingType) -> Self {
        self.unavailable_kind = Some(kind);
        self
    }

    /// The type tab only gates the view and is never sent as a filter.
    pub fn with_tab_only_kind(mut self) -> Self {
        self.send_kind = false;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// `"all"` (or blank) clears the filter; anything else is normalised
    /// (`"confirmed"` → `"Confirmed"`) and must name a known status.
    pub fn set_status_filter(&mut self, raw: &str) -> Result<bool, UnknownStatus> {
        let raw = raw.trim();
        let status = if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(T::canonical_status(raw).ok_or_else(|| UnknownStatus(raw.to_string()))?)
        };
        let changed = replace(&mut self.status, status);
        Ok(self.filters_changed(changed))
    }

    pub fn set_kind(&mut self, kind: Option<BookingType>) -> bool {
        let changed = replace(&mut self.kind, kind);
        self.filters_changed(changed)
    }

    pub fn set_date_filter(&mut self, date: Option<String>) -> bool {
        let date = date.map(|d| d.trim().to_string()).filter(|d| !d.is_empty());
        let changed = replace(&mut self.date, date);
        self.filters_changed(changed)
    }

    /// Commit a debounced search value. Always returns to the first page.
    pub fn commit_search(&mut self, value: &str) -> bool {
        let search = normalize_search(value);
        let changed = self.search != search || self.page != 1;
        self.search = search;
        self.page = 1;
        changed
    }

    /// Clear search, status, date and type back to their initial values.
    pub fn reset_filters(&mut self) -> bool {
        let before = (self.page, self.kind.clone(), self.status.clone(), self.date.clone(), self.search.clone());
        self.page = 1;
        self.kind = self.default_kind.clone();
        self.status = None;
        self.date = None;
        self.search.clear();
        before != (self.page, self.kind.clone(), self.status.clone(), self.date.clone(), self.search.clone())
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    pub fn set_rates(&mut self, rates: Option<ExchangeRateTable>) {
        self.rates = rates;
    }

    /// Query for the current page and filters.
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            limit: self.page_size,
            kind: self.kind.clone().filter(|_| self.send_kind),
            status: self.status.clone(),
            date: self.date.clone(),
            search: Some(self.search.clone()).filter(|s| !s.is_empty()),
        }
    }

    /// Enter `Loading` and issue a ticket. `None` means nothing needs
    /// fetching (an unavailable type tab) and the state is already final.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        self.issued += 1;

        if self.kind.is_some() && self.kind == self.unavailable_kind {
            self.state = LoadState::Loaded(Page::default());
            return None;
        }

        self.state = LoadState::Loading;
        Some(LoadTicket {
            seq: self.issued,
            query: self.query(),
        })
    }

    /// Apply a finished load. Returns `false` when the ticket is stale and
    /// the result was discarded.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Page<T>, ClientError>) -> bool {
        if ticket.seq != self.issued {
            tracing::debug!(stale = ticket.seq, latest = self.issued, "discarding stale list response");
            return false;
        }

        self.state = match result {
            Ok(mut page) => {
                page.items.truncate(self.page_size as usize);
                LoadState::Loaded(page)
            }
            Err(e) => {
                tracing::warn!("list load failed: {}", e);
                LoadState::Errored {
                    message: e.to_string(),
                    unauthorized: e.is_unauthorized(),
                }
            }
        };
        true
    }

    /// Load the current page and apply the result.
    pub async fn refresh(&mut self) -> bool {
        let Some(ticket) = self.begin_load() else {
            return true;
        };
        let result = self.source.fetch_page(ticket.query()).await;
        self.finish_load(ticket, result)
    }

    /// Rows to show.
    ///
    /// With a search active this filters only the rows of the loaded page;
    /// matches on other pages are not found here. The same term is also sent
    /// to the server as `search`, which is where a complete match comes from.
    pub fn visible_items(&self) -> Vec<&T> {
        let LoadState::Loaded(page) = &self.state else {
            return Vec::new();
        };
        if self.search.is_empty() {
            return page.items.iter().collect();
        }
        page.items.iter().filter(|row| row.matches_search(&self.search)).collect()
    }

    /// Server total, or the local match count while a search is active.
    pub fn effective_total(&self) -> u64 {
        match &self.state {
            LoadState::Loaded(_) if !self.search.is_empty() => self.visible_items().len() as u64,
            LoadState::Loaded(page) => page.total,
            _ => 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.effective_total(), self.page_size)
    }

    pub fn shows_pagination(&self) -> bool {
        self.total_pages() > 1
    }

    /// Row amount in the selected display currency.
    pub fn display_amount(&self, row: &T) -> f64 {
        convert(row.amount(), self.currency, self.rates.as_ref())
    }

    /// Any filter change returns to the first page.
    fn filters_changed(&mut self, changed: bool) -> bool {
        if changed {
            self.page = 1;
        }
        changed
    }
}

fn replace<V: PartialEq>(slot: &mut V, value: V) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
