//! Page shell: the header shown on every page and the static footer.

use serde::Serialize;

use super::auth::{Session, SessionUser};

/// Brand shown in the header.
pub const BRAND: &str = "Community";

/// A navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// A form action triggered from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavAction {
    pub label: &'static str,
    pub method: &'static str,
    pub action: &'static str,
}

const SIGN_IN: NavLink = NavLink {
    label: "Sign In",
    href: "/auth",
};
const BROWSE: NavLink = NavLink {
    label: "Browse",
    href: "/opportunities",
};
const DASHBOARD: NavLink = NavLink {
    label: "Dashboard",
    href: "/dashboard",
};
const SIGN_OUT: NavAction = NavAction {
    label: "Sign Out",
    method: "POST",
    action: "/api/v1/auth/sign-out",
};

/// Header rendered for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderView {
    pub brand: &'static str,
    pub brand_href: &'static str,
    pub user: Option<SessionUser>,
    pub links: Vec<NavLink>,
    pub sign_out: Option<NavAction>,
}

impl HeaderView {
    /// Anonymous visitors get a single sign-in link; signed-in users get
    /// browse and dashboard links plus sign out.
    pub fn for_session(session: Option<&Session>) -> Self {
        match session {
            None => Self {
                brand: BRAND,
                brand_href: "/",
                user: None,
                links: vec![SIGN_IN],
                sign_out: None,
            },
            Some(session) => Self {
                brand: BRAND,
                brand_href: "/",
                user: Some(session.user.clone()),
                links: vec![BROWSE, DASHBOARD],
                sign_out: Some(SIGN_OUT),
            },
        }
    }
}

/// Titled group of footer links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FooterSection {
    pub title: &'static str,
    pub links: &'static [NavLink],
}

/// Static footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FooterView {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub sections: &'static [FooterSection],
}

const PLATFORM_LINKS: &[NavLink] = &[
    NavLink {
        label: "Browse Tasks",
        href: "/opportunities",
    },
    NavLink {
        label: "How It Works",
        href: "/",
    },
    NavLink {
        label: "Become a Volunteer",
        href: "/dashboard",
    },
    NavLink {
        label: "Request Help",
        href: "/dashboard",
    },
];

const COMPANY_LINKS: &[NavLink] = &[
    NavLink {
        label: "About Us",
        href: "/",
    },
    NavLink {
        label: "Contact",
        href: "/",
    },
    NavLink {
        label: "Privacy Policy",
        href: "/",
    },
    NavLink {
        label: "Terms of Service",
        href: "/",
    },
];

pub const FOOTER: FooterView = FooterView {
    brand: BRAND,
    tagline: "Connecting volunteers with those who need help. Building stronger communities through meaningful action.",
    sections: &[
        FooterSection {
            title: "Platform",
            links: PLATFORM_LINKS,
        },
        FooterSection {
            title: "Company",
            links: COMPANY_LINKS,
        },
    ],
};
