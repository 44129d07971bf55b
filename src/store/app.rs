//! App-level UI state slice: onboarding, navigation hints, search, scan
//! history, and favorites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scans retained in history.
const SCAN_HISTORY_LIMIT: usize = 50;
/// Recent searches retained.
const RECENT_SEARCH_LIMIT: usize = 10;

/// Connectivity as reported by the platform shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    Online,
    Offline,
}

/// Optional identification details attached to a scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanDetails {
    pub scientific_name: Option<String>,
    pub family: Option<String>,
    pub description: Option<String>,
}

/// One completed plant scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub id: Uuid,
    pub plant_name: String,
    /// Identification confidence in [0, 1]
    pub confidence: f64,
    pub image_uri: String,
    pub timestamp: DateTime<Utc>,
    pub details: Option<ScanDetails>,
}

/// App-level UI state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppState {
    pub is_onboarding_completed: bool,
    pub current_screen: String,
    pub is_loading: bool,
    pub network_status: NetworkStatus,
    pub search_query: String,
    pub selected_category: Option<String>,
    /// Most recent scan first
    pub scan_history: Vec<ScanResult>,
    pub favorites: Vec<String>,
    /// Most recent search first
    pub recent_searches: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            is_onboarding_completed: false,
            current_screen: "Onboarding".to_string(),
            is_loading: false,
            network_status: NetworkStatus::Online,
            search_query: String::new(),
            selected_category: None,
            scan_history: Vec::new(),
            favorites: Vec::new(),
            recent_searches: Vec::new(),
        }
    }
}

/// Dispatchable app-state actions.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    SetOnboardingCompleted(bool),
    SetCurrentScreen(String),
    SetLoading(bool),
    SetNetworkStatus(NetworkStatus),
    SetSearchQuery(String),
    SetSelectedCategory(Option<String>),
    AddScanResult(ScanResult),
    RemoveScanResult(Uuid),
    ClearScanHistory,
    AddToFavorites(String),
    RemoveFromFavorites(String),
    AddRecentSearch(String),
    ClearRecentSearches,
}

impl AppState {
    /// Apply a dispatched action.
    pub fn apply(&mut self, action: AppAction) {
        match action {
            AppAction::SetOnboardingCompleted(done) => self.is_onboarding_completed = done,
            AppAction::SetCurrentScreen(screen) => self.current_screen = screen,
            AppAction::SetLoading(loading) => self.is_loading = loading,
            AppAction::SetNetworkStatus(status) => self.network_status = status,
            AppAction::SetSearchQuery(query) => self.search_query = query,
            AppAction::SetSelectedCategory(category) => self.selected_category = category,
            AppAction::AddScanResult(scan) => {
                self.scan_history.insert(0, scan);
                self.scan_history.truncate(SCAN_HISTORY_LIMIT);
            }
            AppAction::RemoveScanResult(id) => self.scan_history.retain(|s| s.id != id),
            AppAction::ClearScanHistory => self.scan_history.clear(),
            AppAction::AddToFavorites(id) => {
                if !self.favorites.contains(&id) {
                    self.favorites.push(id);
                }
            }
            AppAction::RemoveFromFavorites(id) => self.favorites.retain(|f| f != &id),
            AppAction::AddRecentSearch(query) => {
                let query = query.trim().to_string();
                if !query.is_empty() && !self.recent_searches.contains(&query) {
                    self.recent_searches.insert(0, query);
                    self.recent_searches.truncate(RECENT_SEARCH_LIMIT);
                }
            }
            AppAction::ClearRecentSearches => self.recent_searches.clear(),
        }
    }
}
