//! User profile slice: signed-in user, preferences, and auth flags.

use serde::{Deserialize, Serialize};

/// Theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Per-user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub notifications: bool,
    pub language: String,
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            language: "en".to_string(),
            theme: Theme::Light,
        }
    }
}

/// Signed-in user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Partial user update; only provided fields are merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub is_premium: Option<bool>,
}

/// Partial preferences update; only provided fields are merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferencesUpdate {
    pub notifications: Option<bool>,
    pub language: Option<String>,
    pub theme: Option<Theme>,
}

/// User slice state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// Dispatchable user actions.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Install a profile and mark the session authenticated.
    SetUser(User),
    /// Merge profile fields; a no-op while signed out.
    UpdateUser(UserUpdate),
    /// Merge preference fields; a no-op while signed out.
    UpdatePreferences(PreferencesUpdate),
    SetPremiumStatus(bool),
    SetLoading(bool),
    SetError(Option<String>),
    ClearError,
    Logout,
}

impl UserState {
    /// Apply a dispatched action.
    pub fn apply(&mut self, action: UserAction) {
        match action {
            UserAction::SetUser(user) => {
                self.user = Some(user);
                self.is_authenticated = true;
                self.error = None;
            }
            UserAction::UpdateUser(update) => {
                if let Some(user) = &mut self.user {
                    if let Some(name) = update.name {
                        user.name = Some(name);
                    }
                    if let Some(email) = update.email {
                        user.email = Some(email);
                    }
                    if let Some(avatar) = update.avatar {
                        user.avatar = Some(avatar);
                    }
                    if let Some(premium) = update.is_premium {
                        user.is_premium = premium;
                    }
                }
            }
            UserAction::UpdatePreferences(update) => {
                if let Some(user) = &mut self.user {
                    if let Some(notifications) = update.notifications {
                        user.preferences.notifications = notifications;
                    }
                    if let Some(language) = update.language {
                        user.preferences.language = language;
                    }
                    if let Some(theme) = update.theme {
                        user.preferences.theme = theme;
                    }
                }
            }
            UserAction::SetPremiumStatus(premium) => {
                if let Some(user) = &mut self.user {
                    user.is_premium = premium;
                }
            }
            UserAction::SetLoading(loading) => self.loading = loading,
            UserAction::SetError(error) => self.error = error,
            UserAction::ClearError => self.error = None,
            UserAction::Logout => {
                self.user = None;
                self.is_authenticated = false;
                self.error = None;
            }
        }
    }
}
