use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use nestmetrics_core::api::ApiClient;
use nestmetrics_core::cache::{next_local_id, CachedData, MirrorStore};
use nestmetrics_core::filter::ListingFilter;
use nestmetrics_core::loader::Dashboard;
use nestmetrics_core::models::{
    AdvancedAnalytics, BookingAnalysis, BookingOptimization, BookingScore, ConnectionStatus,
    DealsResponse, Listing, MlPrediction, Stats, TopHost, TravelInsights,
};
use nestmetrics_core::{Config, Fetched, Loader};

use crate::forms::{self, Form};

// ============================================================================
// Constants
// ============================================================================

/// Size of the channel buffer for background page loads
const CHANNEL_BUFFER_SIZE: usize = 32;

/// How long a toast stays in the status bar
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Filtered listings beyond this many are not displayed
pub const MAX_VISIBLE_LISTINGS: usize = 50;

/// Rows moved by PageUp/PageDown
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// Tabs and state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Dashboard,
    Listings,
    Hosts,
    Deals,
    Booking,
    Travel,
    Predictor,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 8] = [
        Tab::Dashboard,
        Tab::Listings,
        Tab::Hosts,
        Tab::Deals,
        Tab::Booking,
        Tab::Travel,
        Tab::Predictor,
        Tab::Analytics,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Listings => "Listings",
            Tab::Hosts => "Hosts",
            Tab::Deals => "Deals",
            Tab::Booking => "Booking",
            Tab::Travel => "Travel",
            Tab::Predictor => "Predictor",
            Tab::Analytics => "Analytics",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    /// Tab for a 1-based number key
    pub fn from_number(n: u32) -> Option<Tab> {
        (n as usize).checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Tabs with an editable form
    pub fn has_form(&self) -> bool {
        matches!(
            self,
            Tab::Hosts | Tab::Deals | Tab::Booking | Tab::Travel | Tab::Predictor
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Normal,
    Searching,
    EditingForm,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_DURATION
    }
}

/// Add/edit form on the Listings tab
#[derive(Debug, Clone)]
pub struct ListingEdit {
    pub form: Form,
    /// Id of the listing being edited, `None` when adding
    pub editing: Option<i64>,
}

/// Results from background page loads.
///
/// Each spawned load sends exactly one of these back through the MPSC
/// channel. They are applied in arrival order.
#[derive(Debug)]
pub enum PageResult {
    /// Backend liveness, checked once at startup
    Connection(Fetched<ConnectionStatus>),
    Dashboard(Fetched<Dashboard>),
    /// Merged API and mirrored listings
    Listings(Fetched<Vec<Listing>>),
    TopHosts(Fetched<Vec<TopHost>>),
    /// Quick booking score from the Hosts tab
    HostScore(Fetched<BookingScore>),
    /// Market stats shown beside the deal finder
    DealStats(Fetched<Stats>),
    Deals(Fetched<DealsResponse>),
    Booking(Fetched<BookingAnalysis>),
    /// Trip optimizer run on its own from the Booking tab
    TripPlan(Fetched<BookingOptimization>),
    TravelStats(Fetched<Stats>),
    /// Travel insights tagged with the request sequence number
    Travel {
        seq: u64,
        insights: Fetched<TravelInsights>,
    },
    Prediction(Fetched<MlPrediction>),
    Analytics(Fetched<AdvancedAnalytics>),
}

impl PageResult {
    /// Tab whose pending count this result settles
    fn tab(&self) -> Option<Tab> {
        let tab = match self {
            PageResult::Connection(_) => return None,
            PageResult::Dashboard(_) => Tab::Dashboard,
            PageResult::Listings(_) => Tab::Listings,
            PageResult::TopHosts(_) | PageResult::HostScore(_) => Tab::Hosts,
            PageResult::DealStats(_) | PageResult::Deals(_) => Tab::Deals,
            PageResult::Booking(_) | PageResult::TripPlan(_) => Tab::Booking,
            PageResult::TravelStats(_) | PageResult::Travel { .. } => Tab::Travel,
            PageResult::Prediction(_) => Tab::Predictor,
            PageResult::Analytics(_) => Tab::Analytics,
        };
        Some(tab)
    }
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub config: Config,
    loader: Loader,
    mirror: MirrorStore,

    pub state: AppState,
    pub current_tab: Tab,
    visited: HashSet<Tab>,
    pending: HashMap<Tab, usize>,
    pub toast: Option<Toast>,
    pub status_message: Option<String>,
    /// Vertical scroll for read-only tabs
    pub scroll: u16,

    result_tx: mpsc::Sender<PageResult>,
    result_rx: mpsc::Receiver<PageResult>,

    pub connection: Option<Fetched<ConnectionStatus>>,

    // ===== Dashboard =====
    pub dashboard: Option<Fetched<Dashboard>>,

    // ===== Listings =====
    pub listings: Vec<Listing>,
    pub listings_fallback: Option<String>,
    pub filter: ListingFilter,
    pub listing_selection: usize,
    pub listing_edit: Option<ListingEdit>,
    /// Size and timestamp of the saved mirror
    pub mirror_info: Option<CachedData<usize>>,

    // ===== Hosts =====
    pub hosts: Option<Fetched<Vec<TopHost>>>,
    pub host_selection: usize,
    pub host_score_form: Form,
    pub host_score: Option<Fetched<BookingScore>>,

    // ===== Deals =====
    pub deal_form: Form,
    pub deal_stats: Option<Fetched<Stats>>,
    pub deals: Option<Fetched<DealsResponse>>,

    // ===== Booking =====
    pub booking_form: Form,
    pub booking: Option<Fetched<BookingAnalysis>>,
    /// Optimizer output, from the last analysis or a standalone run
    pub trip_plan: Option<Fetched<BookingOptimization>>,

    // ===== Travel =====
    pub travel_form: Form,
    pub travel_stats: Option<Fetched<Stats>>,
    pub travel: Option<Fetched<TravelInsights>>,
    travel_seq: u64,

    // ===== Predictor =====
    pub predict_form: Form,
    pub prediction: Option<Fetched<MlPrediction>>,

    // ===== Analytics =====
    pub analytics: Option<Fetched<AdvancedAnalytics>>,
}

impl App {
    /// App with its mirror in the config's data directory
    pub fn new(config: Config) -> Result<Self> {
        let mirror = MirrorStore::new(config.data_dir()?)?;
        Self::with_parts(config, mirror)
    }

    pub fn with_parts(config: Config, mirror: MirrorStore) -> Result<Self> {
        let client = ApiClient::new(&config.api_base_url)?;
        let loader = Loader::new(client).with_dashboard_limit(config.dashboard_listings_limit);
        let (result_tx, result_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let mirror_info = match mirror.load() {
            Ok(Some(cached)) => Some(CachedData {
                data: cached.data.len(),
                cached_at: cached.cached_at,
            }),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Listings mirror is unreadable");
                None
            }
        };

        info!(api = %config.api_base_url, "Starting NestMetrics");

        Ok(Self {
            config,
            loader,
            mirror,
            state: AppState::Normal,
            current_tab: Tab::Dashboard,
            visited: HashSet::new(),
            pending: HashMap::new(),
            toast: None,
            status_message: None,
            scroll: 0,
            result_tx,
            result_rx,
            connection: None,
            dashboard: None,
            listings: Vec::new(),
            listings_fallback: None,
            filter: ListingFilter::default(),
            listing_selection: 0,
            listing_edit: None,
            mirror_info,
            hosts: None,
            host_selection: 0,
            host_score_form: forms::quick_score_form(),
            host_score: None,
            deal_form: forms::deal_form(),
            deal_stats: None,
            deals: None,
            booking_form: forms::booking_form(),
            booking: None,
            trip_plan: None,
            travel_form: forms::travel_form(),
            travel_stats: None,
            travel: None,
            travel_seq: 0,
            predict_form: forms::predict_form(),
            prediction: None,
            analytics: None,
        })
    }

    /// Ask the backend whether it is up. The answer feeds the title bar.
    pub fn check_connection(&self) {
        self.spawn_untracked(|loader| async move { PageResult::Connection(loader.connection().await) });
    }

    /// Backend status for the title bar, `None` until the check returns
    pub fn backend_online(&self) -> Option<bool> {
        self.connection.as_ref().map(|c| !c.is_fallback() && c.data().is_ok())
    }

    // ===== Navigation =====

    pub fn switch_tab(&mut self, tab: Tab) {
        if self.current_tab != tab {
            self.current_tab = tab;
            self.scroll = 0;
        }
        self.mount_current_tab();
    }

    /// Run the current tab's load the first time it becomes active
    pub fn mount_current_tab(&mut self) {
        if self.visited.insert(self.current_tab) {
            debug!(tab = self.current_tab.title(), "Mounting tab");
            self.load_tab(self.current_tab);
        }
    }

    /// Re-run the current tab's load
    pub fn refresh_current_tab(&mut self) {
        let tab = self.current_tab;
        if self.load_tab(tab) {
            self.status_message = Some(format!("Refreshing {}...", tab.title()));
        } else {
            self.status_message = Some(format!("{} loads on submit", tab.title()));
        }
    }

    /// Start the background loads for a tab. Returns false when the tab has
    /// nothing to load until a form is submitted.
    fn load_tab(&mut self, tab: Tab) -> bool {
        match tab {
            Tab::Dashboard => {
                self.spawn(tab, |loader| async move { PageResult::Dashboard(loader.dashboard().await) });
            }
            Tab::Listings => {
                let limit = self.config.listings_limit;
                let mirror = self.mirror.clone();
                self.spawn(tab, move |loader| async move {
                    PageResult::Listings(loader.listings(limit, &mirror).await)
                });
            }
            Tab::Hosts => {
                self.spawn(tab, |loader| async move { PageResult::TopHosts(loader.top_hosts().await) });
            }
            Tab::Deals => {
                self.spawn(tab, |loader| async move { PageResult::DealStats(loader.stats().await) });
            }
            Tab::Travel => {
                self.spawn(tab, |loader| async move { PageResult::TravelStats(loader.stats().await) });
                self.load_travel_insights();
            }
            Tab::Analytics => {
                self.spawn(tab, |loader| async move { PageResult::Analytics(loader.analytics().await) });
            }
            Tab::Booking | Tab::Predictor => return false,
        }
        true
    }

    pub fn is_loading(&self, tab: Tab) -> bool {
        self.pending.get(&tab).is_some_and(|n| *n > 0)
    }

    // ===== Background tasks =====

    /// Helper to send page results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<PageResult>, result: PageResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send page result - channel closed");
        }
    }

    /// Spawn a load on the runtime. Its result comes back through the channel.
    fn spawn<F, Fut>(&mut self, tab: Tab, load: F)
    where
        F: FnOnce(Loader) -> Fut,
        Fut: Future<Output = PageResult> + Send + 'static,
    {
        *self.pending.entry(tab).or_insert(0) += 1;
        self.spawn_untracked(load);
    }

    fn spawn_untracked<F, Fut>(&self, load: F)
    where
        F: FnOnce(Loader) -> Fut,
        Fut: Future<Output = PageResult> + Send + 'static,
    {
        let tx = self.result_tx.clone();
        let task = load(self.loader.clone());
        tokio::spawn(async move {
            let result = task.await;
            Self::send_result(&tx, result).await;
        });
    }

    /// Drain finished loads and expire the toast
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.result_rx.try_recv() {
            results.push(result);
        }
        for result in results {
            self.process_result(result);
        }

        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Apply a single page result
    fn process_result(&mut self, result: PageResult) {
        if let Some(tab) = result.tab() {
            if let Some(count) = self.pending.get_mut(&tab) {
                *count = count.saturating_sub(1);
            }
            let refreshing = self.status_message.as_deref().is_some_and(|m| m.starts_with("Refreshing"));
            if refreshing && !self.is_loading(tab) {
                self.status_message = None;
            }
        }

        match result {
            PageResult::Connection(fetched) => {
                info!(online = fetched.data().is_ok(), "Backend status");
                self.connection = Some(fetched);
            }
            PageResult::Dashboard(fetched) => {
                if let Some(reason) = fetched.reason() {
                    self.show_error(format!("Failed to load dashboard data: {}", reason));
                }
                self.dashboard = Some(fetched);
            }
            PageResult::Listings(fetched) => {
                self.listings_fallback = fetched.reason().map(str::to_string);
                if let Some(reason) = fetched.reason() {
                    self.show_error(format!("Failed to load listings: {}", reason));
                }
                let live = !fetched.is_fallback();
                self.listings = fetched.into_data();
                self.clamp_listing_selection();
                if live {
                    self.persist_listings();
                }
            }
            PageResult::TopHosts(fetched) => {
                if let Some(reason) = fetched.reason() {
                    self.show_error(format!("Failed to load host insights: {}", reason));
                }
                self.host_selection = self.host_selection.min(fetched.data().len().saturating_sub(1));
                self.hosts = Some(fetched);
            }
            PageResult::HostScore(fetched) => {
                if let Some(reason) = fetched.reason() {
                    self.show_error(format!("Failed to calculate booking score: {}", reason));
                }
                self.host_score = Some(fetched);
            }
            PageResult::DealStats(fetched) => {
                self.deal_stats = Some(fetched);
            }
            PageResult::Deals(fetched) => {
                match &fetched {
                    Fetched::Live(response) => {
                        self.show_success(format!("Found {} deals!", response.deals_found))
                    }
                    Fetched::Fallback { .. } => self.show_error("Failed to find deals"),
                }
                self.deals = Some(fetched);
            }
            PageResult::Booking(fetched) => {
                match fetched.reason() {
                    None => self.show_success("Booking analysis completed!"),
                    Some(reason) => {
                        self.show_error(format!("Failed to calculate booking score: {}", reason))
                    }
                }
                self.trip_plan = fetched.data().optimization.clone().map(Fetched::Live);
                self.booking = Some(fetched);
            }
            PageResult::TripPlan(fetched) => {
                if let Some(reason) = fetched.reason() {
                    self.show_error(format!("Failed to optimize trip: {}", reason));
                }
                self.trip_plan = Some(fetched);
            }
            PageResult::TravelStats(fetched) => {
                self.travel_stats = Some(fetched);
            }
            PageResult::Travel { seq, insights } => {
                if seq != self.travel_seq {
                    debug!(seq, latest = self.travel_seq, "Dropping stale travel insights");
                    return;
                }
                if let Some(reason) = insights.reason() {
                    self.show_error(format!("Failed to load travel insights: {}", reason));
                }
                self.travel = Some(insights);
            }
            PageResult::Prediction(fetched) => {
                match &fetched {
                    Fetched::Live(_) => self.show_success("ML prediction generated!"),
                    Fetched::Fallback { .. } => self.show_error("Prediction failed"),
                }
                self.prediction = Some(fetched);
            }
            PageResult::Analytics(fetched) => {
                if let Some(reason) = fetched.reason() {
                    self.show_error(format!("Failed to load analytics: {}", reason));
                }
                self.analytics = Some(fetched);
            }
        }
    }

    // ===== Toasts =====

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.set_toast(message.into(), ToastKind::Success);
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.set_toast(message.into(), ToastKind::Error);
    }

    fn set_toast(&mut self, message: String, kind: ToastKind) {
        self.toast = Some(Toast {
            message,
            kind,
            shown_at: Instant::now(),
        });
    }

    /// Whether the current tab is showing sample data
    pub fn showing_sample_data(&self) -> bool {
        fn fb<T>(f: &Option<Fetched<T>>) -> bool {
            f.as_ref().is_some_and(Fetched::is_fallback)
        }
        match self.current_tab {
            Tab::Dashboard => fb(&self.dashboard),
            Tab::Listings => self.listings_fallback.is_some(),
            Tab::Hosts => fb(&self.hosts) || fb(&self.host_score),
            Tab::Deals => fb(&self.deal_stats) || fb(&self.deals),
            Tab::Booking => fb(&self.booking) || fb(&self.trip_plan),
            Tab::Travel => fb(&self.travel_stats) || fb(&self.travel),
            Tab::Predictor => fb(&self.prediction),
            Tab::Analytics => fb(&self.analytics),
        }
    }

    // ===== Forms =====

    /// The form the current tab edits, if any
    pub fn active_form(&self) -> Option<&Form> {
        match self.current_tab {
            Tab::Listings => self.listing_edit.as_ref().map(|e| &e.form),
            Tab::Hosts => Some(&self.host_score_form),
            Tab::Deals => Some(&self.deal_form),
            Tab::Booking => Some(&self.booking_form),
            Tab::Travel => Some(&self.travel_form),
            Tab::Predictor => Some(&self.predict_form),
            Tab::Dashboard | Tab::Analytics => None,
        }
    }

    pub fn active_form_mut(&mut self) -> Option<&mut Form> {
        match self.current_tab {
            Tab::Listings => self.listing_edit.as_mut().map(|e| &mut e.form),
            Tab::Hosts => Some(&mut self.host_score_form),
            Tab::Deals => Some(&mut self.deal_form),
            Tab::Booking => Some(&mut self.booking_form),
            Tab::Travel => Some(&mut self.travel_form),
            Tab::Predictor => Some(&mut self.predict_form),
            Tab::Dashboard | Tab::Analytics => None,
        }
    }

    /// Called after every edit to the active form
    pub fn form_changed(&mut self) {
        if self.current_tab == Tab::Travel {
            self.load_travel_insights();
        }
    }

    /// Submit the current tab's form
    pub fn submit_form(&mut self) {
        match self.current_tab {
            Tab::Listings => self.save_listing_form(),
            Tab::Hosts => match forms::quick_score_request(&self.host_score_form) {
                Ok(request) => self.spawn(Tab::Hosts, move |loader| async move {
                    PageResult::HostScore(loader.booking_score(&request).await)
                }),
                Err(e) => self.show_error(e.to_string()),
            },
            Tab::Deals => match forms::deal_request(&self.deal_form) {
                Ok(request) => self.spawn(Tab::Deals, move |loader| async move {
                    PageResult::Deals(loader.find_deals(&request).await)
                }),
                Err(e) => self.show_error(e.to_string()),
            },
            Tab::Booking => match forms::booking_values(&self.booking_form) {
                Ok(form) => self.spawn(Tab::Booking, move |loader| async move {
                    PageResult::Booking(loader.booking_analysis(&form).await)
                }),
                Err(e) => self.show_error(e.to_string()),
            },
            Tab::Travel => self.load_travel_insights(),
            Tab::Predictor => match forms::predict_request(&self.predict_form) {
                Ok(request) => self.spawn(Tab::Predictor, move |loader| async move {
                    PageResult::Prediction(loader.ml_predict(&request).await)
                }),
                Err(e) => self.show_error(e.to_string()),
            },
            Tab::Dashboard | Tab::Analytics => {}
        }
    }

    /// Run the trip optimizer alone with the booking form's values
    pub fn plan_trip(&mut self) {
        match forms::booking_values(&self.booking_form) {
            Ok(form) => {
                let request = form.optimizer_request();
                self.spawn(Tab::Booking, move |loader| async move {
                    PageResult::TripPlan(loader.booking_optimizer(&request).await)
                });
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    /// Request insights for the travel form's current values. Any earlier
    /// request still in flight becomes stale.
    fn load_travel_insights(&mut self) {
        let (neighborhood, budget) = match forms::travel_params(&self.travel_form) {
            Ok(params) => params,
            Err(e) => {
                debug!(error = %e, "Travel form incomplete, not fetching");
                return;
            }
        };
        self.travel_seq += 1;
        let seq = self.travel_seq;
        self.spawn(Tab::Travel, move |loader| async move {
            let insights = loader.travel_insights(&neighborhood, budget).await;
            PageResult::Travel { seq, insights }
        });
    }

    // ===== Listings =====

    /// Filtered listings in display order, capped for display
    pub fn visible_listings(&self) -> Vec<&Listing> {
        let mut filtered = self.filter.apply(&self.listings);
        filtered.truncate(MAX_VISIBLE_LISTINGS);
        filtered
    }

    pub fn filtered_count(&self) -> usize {
        self.listings.iter().filter(|l| self.filter.matches(l)).count()
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.visible_listings().get(self.listing_selection).copied()
    }

    pub fn clamp_listing_selection(&mut self) {
        let len = self.visible_listings().len();
        self.listing_selection = self.listing_selection.min(len.saturating_sub(1));
    }

    /// Local edits wait for the listings load. Until it lands the in-memory
    /// array is not merged with the mirror, and saving it would overwrite
    /// the mirror with a partial copy.
    fn listings_ready(&mut self) -> bool {
        if self.is_loading(Tab::Listings) {
            self.show_error("Listings are still loading");
            return false;
        }
        true
    }

    pub fn open_add_listing(&mut self) {
        if !self.listings_ready() {
            return;
        }
        self.listing_edit = Some(ListingEdit {
            form: forms::listing_form(None),
            editing: None,
        });
        self.state = AppState::EditingForm;
    }

    pub fn open_edit_listing(&mut self) {
        if !self.listings_ready() {
            return;
        }
        let Some(listing) = self.selected_listing() else {
            return;
        };
        let edit = ListingEdit {
            form: forms::listing_form(Some(listing)),
            editing: Some(listing.id),
        };
        self.listing_edit = Some(edit);
        self.state = AppState::EditingForm;
    }

    pub fn cancel_listing_edit(&mut self) {
        self.listing_edit = None;
        self.state = AppState::Normal;
    }

    /// Apply the add/edit form. New listings go to the front. Invalid input
    /// keeps the form open.
    fn save_listing_form(&mut self) {
        let Some((editing, parsed)) = self
            .listing_edit
            .as_ref()
            .map(|edit| (edit.editing, forms::listing_draft(&edit.form)))
        else {
            return;
        };
        let draft = match parsed {
            Ok(draft) => draft,
            Err(e) => {
                self.show_error(e.to_string());
                return;
            }
        };
        if !self.listings_ready() {
            return;
        }

        match editing {
            None => {
                let id = next_local_id(&self.listings);
                self.listings.insert(0, Listing::from_draft(id, &draft));
                info!(id, "Added local listing");
                self.show_success("Listing added successfully!");
            }
            Some(id) => {
                if let Some(listing) = self.listings.iter_mut().find(|l| l.id == id) {
                    listing.apply_draft(&draft);
                }
                info!(id, "Updated listing");
                self.show_success("Listing updated successfully!");
            }
        }

        self.listing_edit = None;
        self.state = AppState::Normal;
        self.clamp_listing_selection();
        self.persist_listings();
    }

    /// Write the in-memory listings to the mirror slot
    fn persist_listings(&mut self) {
        match self.mirror.save(&self.listings) {
            Ok(()) => self.mirror_info = Some(CachedData::new(self.listings.len())),
            Err(e) => {
                warn!(error = %e, "Failed to save listings mirror");
                self.show_error(format!("Failed to save listings: {}", e));
            }
        }
    }

    // ===== Selection =====

    fn selection_len(&self) -> usize {
        match self.current_tab {
            Tab::Listings => self.visible_listings().len(),
            Tab::Hosts => self.hosts.as_ref().map_or(0, |h| h.data().len()),
            _ => 0,
        }
    }

    fn selection_mut(&mut self) -> Option<&mut usize> {
        match self.current_tab {
            Tab::Listings => Some(&mut self.listing_selection),
            Tab::Hosts => Some(&mut self.host_selection),
            _ => None,
        }
    }

    /// Move the list selection, or scroll read-only tabs
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.selection_len();
        match self.selection_mut() {
            Some(selection) => {
                if len == 0 {
                    *selection = 0;
                } else {
                    let next = (*selection as isize + delta).clamp(0, len as isize - 1);
                    *selection = next as usize;
                }
            }
            None => {
                let next = (self.scroll as isize + delta).clamp(0, u16::MAX as isize);
                self.scroll = next as u16;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestmetrics_core::fallback;

    /// App pointed at a closed port with its mirror in a temp dir
    fn offline_app(dir: &tempfile::TempDir) -> App {
        let config = Config {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let mirror = MirrorStore::new(dir.path().to_path_buf()).unwrap();
        App::with_parts(config, mirror).unwrap()
    }

    async fn wait_idle(app: &mut App, tab: Tab) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while app.is_loading(tab) && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(20)).await;
            app.check_background_tasks();
        }
    }

    #[test]
    fn test_tab_next() {
        assert_eq!(Tab::Dashboard.next(), Tab::Listings);
        assert_eq!(Tab::Predictor.next(), Tab::Analytics);
        assert_eq!(Tab::Analytics.next(), Tab::Dashboard);
    }

    #[test]
    fn test_tab_prev() {
        assert_eq!(Tab::Listings.prev(), Tab::Dashboard);
        assert_eq!(Tab::Dashboard.prev(), Tab::Analytics);
    }

    #[test]
    fn test_tab_from_number() {
        assert_eq!(Tab::from_number(1), Some(Tab::Dashboard));
        assert_eq!(Tab::from_number(8), Some(Tab::Analytics));
        assert_eq!(Tab::from_number(0), None);
        assert_eq!(Tab::from_number(9), None);
    }

    #[tokio::test]
    async fn test_mount_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);

        app.switch_tab(Tab::Analytics);
        assert!(app.is_loading(Tab::Analytics));
        wait_idle(&mut app, Tab::Analytics).await;

        let analytics = app.analytics.as_ref().unwrap();
        assert!(analytics.is_fallback());
        assert_eq!(analytics.data(), &fallback::advanced_analytics());
        assert!(app.showing_sample_data());

        app.switch_tab(Tab::Dashboard);
        app.switch_tab(Tab::Analytics);
        assert!(!app.is_loading(Tab::Analytics));
    }

    #[tokio::test]
    async fn test_tabs_without_mount_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.switch_tab(Tab::Booking);
        assert!(!app.is_loading(Tab::Booking));
        app.refresh_current_tab();
        assert_eq!(app.status_message.as_deref(), Some("Booking loads on submit"));
    }

    #[tokio::test]
    async fn test_dashboard_fallback_raises_toast() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.mount_current_tab();
        wait_idle(&mut app, Tab::Dashboard).await;

        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Failed to load dashboard data: Network Error");
    }

    #[tokio::test]
    async fn test_failed_prediction_keeps_sample_estimate() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.switch_tab(Tab::Predictor);
        app.submit_form();
        wait_idle(&mut app, Tab::Predictor).await;

        assert_eq!(app.toast.as_ref().unwrap().message, "Prediction failed");
        let prediction = app.prediction.as_ref().unwrap();
        assert_eq!(prediction.data().similar_listings_count, 0);
    }

    #[tokio::test]
    async fn test_offline_backend_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        assert_eq!(app.backend_online(), None);
        app.process_result(PageResult::Connection(Fetched::fallback(
            fallback::connection_status(),
            "Network Error",
        )));
        assert_eq!(app.backend_online(), Some(false));
    }

    #[tokio::test]
    async fn test_standalone_trip_plan_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.current_tab = Tab::Booking;
        app.plan_trip();
        wait_idle(&mut app, Tab::Booking).await;

        let plan = app.trip_plan.as_ref().unwrap();
        assert!(plan.is_fallback());
        let budget = plan.data().budget_optimization.unwrap();
        assert_eq!(budget.daily_limit, Some(150.0));
        assert!(app.showing_sample_data());
    }

    #[tokio::test]
    async fn test_stale_travel_results_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.travel_seq = 2;

        app.process_result(PageResult::Travel {
            seq: 1,
            insights: Fetched::Live(fallback::travel_insights("Queens", 100.0)),
        });
        assert!(app.travel.is_none());

        let latest = fallback::travel_insights("Bronx", 90.0);
        app.process_result(PageResult::Travel {
            seq: 2,
            insights: Fetched::Live(latest.clone()),
        });
        assert_eq!(app.travel.as_ref().unwrap().data(), &latest);
    }

    #[tokio::test]
    async fn test_add_listing_prepends_and_saves_mirror() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.current_tab = Tab::Listings;
        app.listings = fallback::listings();

        app.open_add_listing();
        assert_eq!(app.state, AppState::EditingForm);
        let form = app.active_form_mut().unwrap();
        for c in "Garden flat".chars() {
            form.input_char(c);
        }
        form.focus = 4;
        form.input_char('9');
        form.input_char('5');
        app.submit_form();

        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.listings.len(), 3);
        assert_eq!(app.listings[0].display_name(), "Garden flat");
        assert_eq!(app.listings[0].price, Some(95.0));
        assert_eq!(app.listings[0].number_of_reviews, Some(0));
        assert_eq!(app.toast.as_ref().unwrap().message, "Listing added successfully!");

        let mirror = MirrorStore::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(mirror.load_or_empty(), app.listings);
        assert_eq!(app.mirror_info.as_ref().unwrap().data, 3);
    }

    #[tokio::test]
    async fn test_add_waits_for_listings_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        let saved: Vec<Listing> = (1..=3)
            .map(|id| Listing { id, ..Listing::default() })
            .collect();
        app.mirror.save(&saved).unwrap();

        app.switch_tab(Tab::Listings);
        assert!(app.is_loading(Tab::Listings));
        app.open_add_listing();
        assert!(app.listing_edit.is_none());
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.toast.as_ref().unwrap().message, "Listings are still loading");

        wait_idle(&mut app, Tab::Listings).await;
        let ids: Vec<i64> = app.listings.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        app.open_add_listing();
        let form = app.active_form_mut().unwrap();
        for c in "New".chars() {
            form.input_char(c);
        }
        form.focus = 4;
        form.input_char('9');
        app.submit_form();

        assert_eq!(app.listings.len(), 4);
        let slot: Vec<i64> = app.mirror.load_or_empty().iter().map(|l| l.id).collect();
        assert_eq!(slot.len(), 4);
        assert_eq!(&slot[1..], &[1, 2, 3]);
    }

    #[tokio::test]
    async fn test_save_blocked_while_refresh_pending() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.current_tab = Tab::Listings;
        app.open_add_listing();
        app.active_form_mut().unwrap().input_char('x');

        app.refresh_current_tab();
        app.submit_form();
        assert_eq!(app.toast.as_ref().unwrap().message, "Listings are still loading");
        assert!(app.listings.is_empty());
        assert_eq!(app.state, AppState::EditingForm);
        assert!(app.listing_edit.is_some());
        wait_idle(&mut app, Tab::Listings).await;
    }

    #[tokio::test]
    async fn test_edit_listing_updates_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.current_tab = Tab::Listings;
        app.listings = fallback::listings();
        app.listing_selection = 1;
        let id = app.listings[1].id;

        app.open_edit_listing();
        app.active_form_mut().unwrap().input_char('!');
        app.submit_form();

        assert_eq!(app.listings[1].id, id);
        assert!(app.listings[1].display_name().ends_with('!'));
        assert_eq!(app.toast.as_ref().unwrap().message, "Listing updated successfully!");
    }

    #[tokio::test]
    async fn test_invalid_listing_keeps_form_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.current_tab = Tab::Listings;
        app.open_add_listing();
        app.submit_form();

        assert_eq!(app.state, AppState::EditingForm);
        assert!(app.listings.is_empty());
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Error);
    }

    #[tokio::test]
    async fn test_visible_listings_capped() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.current_tab = Tab::Listings;
        app.listings = (1..=120)
            .map(|id| Listing { id, ..Listing::default() })
            .collect();

        assert_eq!(app.visible_listings().len(), MAX_VISIBLE_LISTINGS);
        assert_eq!(app.filtered_count(), 120);

        app.move_selection(100);
        assert_eq!(app.listing_selection, MAX_VISIBLE_LISTINGS - 1);
        app.move_selection(-100);
        assert_eq!(app.listing_selection, 0);
    }

    #[tokio::test]
    async fn test_toast_expires() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        app.show_success("done");
        app.check_background_tasks();
        assert!(app.toast.is_some());

        if let Some(toast) = app.toast.as_mut() {
            if let Some(earlier) = Instant::now().checked_sub(TOAST_DURATION) {
                toast.shown_at = earlier;
            }
        }
        app.check_background_tasks();
        assert!(app.toast.is_none());
    }
}
