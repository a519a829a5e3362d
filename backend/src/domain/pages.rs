//! Copy and form descriptors for the listing, dashboard and auth pages.

use serde::Serialize;

use super::opportunity::Category;

/// Fixed text for the opportunities listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingCopy {
    pub heading: &'static str,
    pub subtitle: &'static str,
    pub empty_state: &'static str,
    pub apply_label: &'static str,
}

pub const LISTING: ListingCopy = ListingCopy {
    heading: "Recent Opportunities",
    subtitle: "See what people in your community need help with right now.",
    empty_state: "No opportunities available yet.",
    apply_label: "Apply to Help",
};

/// Fixed text for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCopy {
    pub heading: &'static str,
    pub create_label: &'static str,
    pub opportunities_heading: &'static str,
    pub opportunities_empty: &'static str,
    pub applications_heading: &'static str,
    pub applications_empty: &'static str,
    pub categories: [&'static str; 4],
}

pub const DASHBOARD: DashboardCopy = DashboardCopy {
    heading: "Dashboard",
    create_label: "Create Opportunity",
    opportunities_heading: "My Opportunities",
    opportunities_empty: "No opportunities created yet. Click \"Create Opportunity\" to get started!",
    applications_heading: "My Applications",
    applications_empty: "No applications yet. Browse opportunities to get started!",
    categories: [
        Category::ALL[0].as_str(),
        Category::ALL[1].as_str(),
        Category::ALL[2].as_str(),
        Category::ALL[3].as_str(),
    ],
};

/// One of the two modes of the auth form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthMode {
    pub submit_label: &'static str,
    pub toggle_label: &'static str,
    pub action: &'static str,
    pub fields: &'static [&'static str],
}

/// Auth page view shown to anonymous visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCopy {
    pub title: &'static str,
    pub description: &'static str,
    pub sign_in: AuthMode,
    pub sign_up: AuthMode,
}

pub const AUTH: AuthCopy = AuthCopy {
    title: "Welcome",
    description: "Sign in to start making a difference in your community",
    sign_in: AuthMode {
        submit_label: "Sign In",
        toggle_label: "Need an account? Sign up",
        action: "/api/v1/auth/sign-in",
        fields: &["email", "password"],
    },
    sign_up: AuthMode {
        submit_label: "Sign Up",
        toggle_label: "Have an account? Sign in",
        action: "/api/v1/auth/sign-up",
        fields: &["fullName", "email", "password"],
    },
};
