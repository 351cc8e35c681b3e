//! View/access gate.
//!
//! Maps URL fragments to views and decides, per identity, whether a view
//! renders, hits the auth wall, or is forbidden. The capability check is
//! kept separate from routing so the policy can be tested on its own.

use serde::Serialize;

use crate::middleware::auth::Claims;
use crate::models::profile::Role;

/// Fragment the SPA has always used for the admin console. A leftover from
/// the launch-era obscurity gate; kept so old bookmarks keep working, but it
/// is not an access control — the role check below is.
pub const ADMIN_FRAGMENT_ALIAS: &str = "adminoba";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Home,
    Gigs,
    Post,
    Dashboard,
    Admin,
    About,
    Founder,
    Privacy,
    Terms,
    Safety,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Gigs => "gigs",
            View::Post => "post",
            View::Dashboard => "dashboard",
            View::Admin => "admin",
            View::About => "about",
            View::Founder => "founder",
            View::Privacy => "privacy",
            View::Terms => "terms",
            View::Safety => "safety",
        }
    }
}

/// Unknown or empty fragments land on home; home is always reachable.
pub fn resolve_fragment(fragment: &str) -> View {
    match fragment {
        "" | "home" => View::Home,
        "gigs" => View::Gigs,
        "post" => View::Post,
        "dashboard" => View::Dashboard,
        "admin" => View::Admin,
        "about" => View::About,
        "founder" => View::Founder,
        "privacy" => View::Privacy,
        "terms" => View::Terms,
        "safety" => View::Safety,
        alias if alias == ADMIN_FRAGMENT_ALIAS => View::Admin,
        _ => View::Home,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    BrowseGigs,
    PostJob,
    ViewDashboard,
    ManageBoard,
}

/// Single policy point: what a role may do, independent of navigation.
pub fn role_allows(role: Option<Role>, capability: Capability) -> bool {
    match capability {
        Capability::BrowseGigs | Capability::PostJob | Capability::ViewDashboard => role.is_some(),
        Capability::ManageBoard => role == Some(Role::Admin),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewDecision {
    Render,
    AuthWall,
    Forbidden,
}

/// Gate a resolved view for the given identity. Anonymous requests to
/// member views get the auth wall rather than an error; a signed-in
/// non-admin asking for the admin console gets the forbidden state.
pub fn decide(view: View, identity: Option<&Claims>) -> ViewDecision {
    let signed_in = identity.is_some();
    let role = identity.and_then(Claims::role_parsed);

    match view {
        View::Gigs | View::Post | View::Dashboard | View::Admin if !signed_in => {
            ViewDecision::AuthWall
        }
        View::Admin if !role_allows(role, Capability::ManageBoard) => ViewDecision::Forbidden,
        _ => ViewDecision::Render,
    }
}
