//! One checkout, from address search to payment.
//!
//! [`CheckoutSession`] is the only writer of its [`OrderState`]. Remote
//! lookups are split into a pending request that runs without borrowing
//! the session and an `apply_*` step that accepts the response only if no
//! newer request of the same kind was issued in the meantime.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use hire_core::calculations::{QUICK_SELECT_COUNT, quick_select_dates};
use hire_core::search::SearchTicket;
use hire_core::{
    AddressCandidate, AddressLookup, AddressSearchInput, CatalogStatus, CatalogView,
    GuardFailure, HeavyWasteType, LatestRequest, OrderConfirmation, OrderError, OrderState,
    PaymentDetails, PaymentError, PhotoError, ServiceError, SkipCatalog, SkipListing,
    SkipPhoto, SkipPlacement, SkipSort, Ticket, WasteType, WizardStep,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("there is no address suggestion number {0}")]
    NoSuchCandidate(usize),

    #[error("there is no skip number {0}")]
    NoSuchSkip(usize),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Photo(#[from] PhotoError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Guard(#[from] GuardFailure),
}

/// Identifies one catalog fetch: the postcode district and optional area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogKey {
    pub postcode: String,
    pub area: Option<String>,
}

impl std::fmt::Display for CatalogKey {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match &self.area {
            Some(area) => write!(f, "{} ({area})", self.postcode),
            None => f.write_str(&self.postcode),
        }
    }
}

/// An address lookup issued by the session but not yet run.
pub struct PendingSearch {
    ticket: SearchTicket,
    lookup: Arc<dyn AddressLookup>,
}

pub struct SearchResponse {
    pub ticket: SearchTicket,
    pub result: Result<Vec<AddressCandidate>, ServiceError>,
}

impl PendingSearch {
    pub fn ticket(&self) -> &SearchTicket {
        &self.ticket
    }

    pub async fn run(self) -> SearchResponse {
        let result = self.lookup.search(self.ticket.key()).await;
        SearchResponse {
            ticket: self.ticket,
            result,
        }
    }
}

/// A catalog fetch issued by the session but not yet run.
pub struct PendingCatalog {
    ticket: Ticket<CatalogKey>,
    catalog: Arc<dyn SkipCatalog>,
}

pub struct CatalogResponse {
    pub ticket: Ticket<CatalogKey>,
    pub result: Result<SkipListing, ServiceError>,
}

impl PendingCatalog {
    pub fn ticket(&self) -> &Ticket<CatalogKey> {
        &self.ticket
    }

    pub async fn run(self) -> CatalogResponse {
        let key = self.ticket.key();
        let result = self
            .catalog
            .skips_by_location(&key.postcode, key.area.as_deref())
            .await;
        CatalogResponse {
            ticket: self.ticket,
            result,
        }
    }
}

pub struct CheckoutSession {
    order: OrderState,
    address_lookup: Arc<dyn AddressLookup>,
    skip_catalog: Arc<dyn SkipCatalog>,
    search: AddressSearchInput,
    catalog: CatalogView,
    catalog_requests: LatestRequest<CatalogKey>,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutSession {
    pub fn new(
        address_lookup: Arc<dyn AddressLookup>,
        skip_catalog: Arc<dyn SkipCatalog>,
    ) -> Self {
        Self {
            order: OrderState::new(),
            address_lookup,
            skip_catalog,
            search: AddressSearchInput::new(),
            catalog: CatalogView::new(),
            catalog_requests: LatestRequest::new(),
            confirmation: None,
        }
    }

    pub fn order(&self) -> &OrderState {
        &self.order
    }

    pub fn search(&self) -> &AddressSearchInput {
        &self.search
    }

    pub fn catalog(&self) -> &CatalogView {
        &self.catalog
    }

    pub fn step(&self) -> WizardStep {
        self.order.step()
    }

    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    // ── navigation ─────────────────────────────────────────────────────

    /// Leaves the current step if its guard passes.
    pub fn advance(&mut self) -> Result<WizardStep, GuardFailure> {
        self.order.try_advance()
    }

    pub fn back(&mut self) {
        self.order.prev_step();
    }

    /// Returns to a completed step. Returns whether the wizard moved.
    pub fn jump_to(
        &mut self,
        step: WizardStep,
    ) -> bool {
        self.order.jump_back(step)
    }

    // ── step 1: address ────────────────────────────────────────────────

    pub fn type_query(
        &mut self,
        query: impl Into<String>,
        now: Instant,
    ) {
        self.search.on_query_changed(query, now);
    }

    /// Issues an address lookup if the query has settled.
    pub fn poll_search(
        &mut self,
        now: Instant,
    ) -> Option<PendingSearch> {
        let ticket = self.search.poll(now)?;
        Some(PendingSearch {
            ticket,
            lookup: Arc::clone(&self.address_lookup),
        })
    }

    /// Shows a lookup response unless it was superseded. Returns whether
    /// it was applied.
    pub fn apply_search(
        &mut self,
        response: SearchResponse,
    ) -> bool {
        match response.result {
            Ok(candidates) => {
                let count = candidates.len();
                let applied = self.search.apply_results(&response.ticket, candidates);
                if applied {
                    debug!(count, "address suggestions shown");
                } else {
                    warn!(ticket = %response.ticket, "stale address suggestions dropped");
                }
                applied
            }
            Err(err) => {
                error!(ticket = %response.ticket, error = %err, "address search failed");
                self.search.apply_failure(&response.ticket, err.to_string())
            }
        }
    }

    /// Polls, runs and applies in one go. Returns the number of
    /// suggestions shown, or `None` when no lookup was due.
    pub async fn search_now(
        &mut self,
        now: Instant,
    ) -> Option<Result<usize, ServiceError>> {
        let pending = self.poll_search(now)?;
        let response = pending.run().await;
        let failure = response.result.as_ref().err().cloned();
        self.apply_search(response);
        Some(match failure {
            Some(err) => Err(err),
            None => Ok(self.search.results().len()),
        })
    }

    /// Picks suggestion `index` as the delivery address.
    pub fn choose_address(
        &mut self,
        index: usize,
    ) -> Result<(), SessionError> {
        let candidate = self
            .search
            .select(index)
            .cloned()
            .ok_or(SessionError::NoSuchCandidate(index))?;
        self.order.select_address(&candidate);
        Ok(())
    }

    pub fn clear_address(&mut self) {
        self.search.clear_selection();
        self.order.clear_address();
    }

    // ── step 2: waste ──────────────────────────────────────────────────

    pub fn set_waste_types(
        &mut self,
        types: impl IntoIterator<Item = WasteType>,
    ) {
        self.order.set_waste_types(types);
    }

    pub fn toggle_waste_type(
        &mut self,
        waste: WasteType,
    ) {
        self.order.toggle_waste_type(waste);
    }

    pub fn set_heavy_waste_types(
        &mut self,
        types: impl IntoIterator<Item = HeavyWasteType>,
    ) -> Result<(), SessionError> {
        self.order.set_heavy_waste_types(types)?;
        Ok(())
    }

    // ── step 3: skip ───────────────────────────────────────────────────

    /// The location the catalog should be showing for the chosen address.
    pub fn catalog_key(&self) -> Option<CatalogKey> {
        let address = self.order.selected_address()?;
        let postcode = address.postcode_prefix();
        if postcode.is_empty() {
            return None;
        }
        let area = Some(address.city.clone()).filter(|c| !c.is_empty());
        Some(CatalogKey { postcode, area })
    }

    /// Issues a catalog fetch when the location differs from the one last
    /// requested, or when the last fetch failed.
    pub fn begin_catalog_load(&mut self) -> Option<PendingCatalog> {
        let key = self.catalog_key()?;
        let failed = matches!(self.catalog.status(), CatalogStatus::Failed(_));
        if !failed && !self.catalog_requests.key_changed(&key) {
            return None;
        }
        Some(self.issue_catalog_load(key))
    }

    /// Fetches the catalog again for the current location.
    pub fn reload_catalog(&mut self) -> Option<PendingCatalog> {
        let key = self.catalog_key()?;
        Some(self.issue_catalog_load(key))
    }

    fn issue_catalog_load(
        &mut self,
        key: CatalogKey,
    ) -> PendingCatalog {
        info!(location = %key, "loading skip catalog");
        self.catalog.start_loading();
        PendingCatalog {
            ticket: self.catalog_requests.issue(key),
            catalog: Arc::clone(&self.skip_catalog),
        }
    }

    /// Shows a catalog response unless the location changed since it was
    /// requested. Returns whether it was applied.
    pub fn apply_catalog(
        &mut self,
        response: CatalogResponse,
    ) -> bool {
        if !self.catalog_requests.is_current(&response.ticket) {
            warn!(ticket = %response.ticket.seq(), "stale skip catalog dropped");
            return false;
        }
        match response.result {
            Ok(listing) => self.catalog.finish(listing),
            Err(err) => {
                error!(location = %response.ticket.key(), error = %err, "skip catalog failed");
                self.catalog.fail(err.to_string());
            }
        }
        true
    }

    /// Loads the catalog for the chosen address if it is not already
    /// showing it.
    pub async fn load_catalog(&mut self) -> &CatalogStatus {
        if let Some(pending) = self.begin_catalog_load() {
            let response = pending.run().await;
            self.apply_catalog(response);
        }
        self.catalog.status()
    }

    pub fn set_sort(
        &mut self,
        sort: SkipSort,
    ) {
        self.catalog.set_sort(sort);
    }

    /// Chooses skip `index` in the displayed order.
    pub fn choose_skip(
        &mut self,
        index: usize,
    ) -> Result<(), SessionError> {
        let skip = self
            .catalog
            .skip_at(index)
            .ok_or(SessionError::NoSuchSkip(index))?;
        self.order.select_skip(skip);
        Ok(())
    }

    // ── step 4: permit ─────────────────────────────────────────────────

    pub fn set_placement(
        &mut self,
        placement: SkipPlacement,
    ) {
        self.order.set_skip_location(placement);
    }

    pub fn attach_photo(
        &mut self,
        photo: SkipPhoto,
    ) {
        self.order.attach_photo(photo);
    }

    pub fn remove_photo(&mut self) {
        self.order.remove_photo();
    }

    // ── step 5: date ───────────────────────────────────────────────────

    /// Recomputes the delivery window for `today` and returns the dates
    /// offered for one-tap selection.
    pub fn delivery_options(
        &mut self,
        today: NaiveDate,
    ) -> Vec<NaiveDate> {
        let minimum = self.order.refresh_delivery_window(today);
        quick_select_dates(minimum, QUICK_SELECT_COUNT)
    }

    pub fn choose_date(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), SessionError> {
        self.order.set_delivery_date(date, today)?;
        Ok(())
    }

    // ── step 6: payment ────────────────────────────────────────────────

    /// Takes the simulated payment. The order stays on the payment step.
    pub fn submit_payment(
        &mut self,
        details: &PaymentDetails,
        order_number: u32,
    ) -> Result<&OrderConfirmation, SessionError> {
        let confirmation = self.order.confirm_payment(details, order_number)?;
        Ok(self.confirmation.insert(confirmation))
    }
}
