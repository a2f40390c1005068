//! Session shell: current user, active view, and role dispatch.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::fixtures;
use crate::models::{Admin, Donor, HospitalStaff, Role, User};

/// Navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Dashboard,
    Donors,
    Requests,
    Inventory,
    Bloodstock,
    Profile,
    EditProfile,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Donors => "donors",
            View::Requests => "requests",
            View::Inventory => "inventory",
            View::Bloodstock => "bloodstock",
            View::Profile => "profile",
            View::EditProfile => "editProfile",
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(View::Dashboard),
            "donors" => Ok(View::Donors),
            "requests" => Ok(View::Requests),
            "inventory" => Ok(View::Inventory),
            "bloodstock" => Ok(View::Bloodstock),
            "profile" => Ok(View::Profile),
            "editProfile" => Ok(View::EditProfile),
            other => Err(format!("Unknown view: {}", other)),
        }
    }
}

/// A sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub view: View,
    pub label: &'static str,
}

/// Sidebar entries available to a role.
pub fn nav_items(role: Role) -> Vec<NavItem> {
    let item = |view, label| NavItem { view, label };
    match role {
        Role::Admin => vec![
            item(View::Dashboard, "Dashboard"),
            item(View::Donors, "Donors"),
            item(View::Requests, "Requests"),
            item(View::Inventory, "Inventory"),
        ],
        Role::Hospital => vec![
            item(View::Dashboard, "Dashboard"),
            item(View::Bloodstock, "Blood Stock"),
        ],
        Role::Donor => vec![item(View::Dashboard, "Dashboard")],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdminScreen {
    Dashboard,
    Donors,
    Requests,
    Inventory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HospitalScreen {
    Dashboard,
    BloodStock,
}

/// What the main content area shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Screen {
    Login,
    Donor(Donor),
    Admin(Admin, AdminScreen),
    Hospital(HospitalStaff, HospitalScreen),
}

/// Current user and active view.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    view: View,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in as the mock user for `role` and land on the dashboard.
    pub fn login(&mut self, role: Role) -> &User {
        let user = match role {
            Role::Donor => User::Donor(fixtures::donor()),
            Role::Admin => User::Admin(fixtures::admin()),
            Role::Hospital => User::Hospital(fixtures::hospital_staff()),
        };
        info!(role = role.as_str(), user_id = user.id(), "Signed in");
        self.view = View::Dashboard;
        self.user.insert(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = user.id(), "Signed out");
        }
    }

    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn active_view(&self) -> View {
        self.view
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        self.user
            .as_ref()
            .map(|u| nav_items(u.role()))
            .unwrap_or_default()
    }

    /// Dispatch to the screen for the current role and view. Views a role
    /// does not own fall back to its dashboard.
    pub fn screen(&self) -> Screen {
        match &self.user {
            None => Screen::Login,
            Some(User::Donor(donor)) => Screen::Donor(donor.clone()),
            Some(User::Admin(admin)) => {
                let screen = match self.view {
                    View::Donors => AdminScreen::Donors,
                    View::Requests => AdminScreen::Requests,
                    View::Inventory => AdminScreen::Inventory,
                    _ => AdminScreen::Dashboard,
                };
                Screen::Admin(admin.clone(), screen)
            }
            Some(User::Hospital(staff)) => {
                let screen = match self.view {
                    View::Bloodstock => HospitalScreen::BloodStock,
                    _ => HospitalScreen::Dashboard,
                };
                Screen::Hospital(staff.clone(), screen)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_login() {
        let session = Session::new();
        assert_eq!(session.screen(), Screen::Login);
        assert!(session.nav_items().is_empty());
    }

    #[test]
    fn test_login_resets_view() {
        let mut session = Session::new();
        session.login(Role::Admin);
        session.navigate(View::Inventory);
        assert!(matches!(session.screen(), Screen::Admin(_, AdminScreen::Inventory)));

        session.logout();
        assert_eq!(session.screen(), Screen::Login);

        session.login(Role::Admin);
        assert_eq!(session.active_view(), View::Dashboard);
    }

    #[test]
    fn test_unowned_view_falls_back() {
        let mut session = Session::new();
        session.login(Role::Hospital);
        session.navigate(View::Donors);
        assert!(matches!(
            session.screen(),
            Screen::Hospital(_, HospitalScreen::Dashboard)
        ));

        session.navigate(View::Bloodstock);
        assert!(matches!(
            session.screen(),
            Screen::Hospital(_, HospitalScreen::BloodStock)
        ));
    }

    #[test]
    fn test_donor_always_sees_dashboard() {
        let mut session = Session::new();
        let user = session.login(Role::Donor);
        assert_eq!(user.name(), "Jane Smith");
        session.navigate(View::Inventory);
        assert!(matches!(session.screen(), Screen::Donor(_)));
    }

    #[test]
    fn test_nav_items_per_role() {
        assert_eq!(nav_items(Role::Admin).len(), 4);
        assert_eq!(nav_items(Role::Hospital)[1].label, "Blood Stock");
        assert_eq!(nav_items(Role::Donor).len(), 1);
    }

    #[test]
    fn test_view_round_trips_through_str() {
        for view in [View::Dashboard, View::EditProfile, View::Bloodstock] {
            assert_eq!(view.as_str().parse::<View>().unwrap(), view);
        }
        assert!("settings".parse::<View>().is_err());
    }
}
