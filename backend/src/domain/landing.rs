//! Static landing page content.

use serde::Serialize;

use super::shell::NavLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub badge: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub primary_action: NavLink,
    pub secondary_action: NavLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section<T: 'static> {
    pub heading: &'static str,
    pub intro: &'static str,
    pub items: &'static [T],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub heading: &'static str,
    pub action: NavLink,
}

/// Everything rendered on `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingContent {
    pub hero: Hero,
    pub stats: &'static [Stat],
    pub features: Section<Feature>,
    pub how_it_works: Section<Step>,
    pub call_to_action: CallToAction,
}

pub const LANDING: LandingContent = LandingContent {
    hero: Hero {
        badge: "Powered by Community",
        title: "Make a Difference, One Task at a Time",
        subtitle: "Connect volunteers with those who need help. Build stronger communities through meaningful action and shared purpose.",
        primary_action: NavLink {
            label: "Get Started",
            href: "/opportunities",
        },
        secondary_action: NavLink {
            label: "Learn More",
            href: "/opportunities",
        },
    },
    stats: &[
        Stat {
            value: "10K+",
            label: "Volunteers",
        },
        Stat {
            value: "25K+",
            label: "Tasks Completed",
        },
        Stat {
            value: "100+",
            label: "Communities",
        },
    ],
    features: Section {
        heading: "Everything You Need to Make an Impact",
        intro: "Simple, powerful tools to connect volunteers with those who need help most.",
        items: &[
            Feature {
                icon: "search",
                title: "Browse Tasks",
                description: "Discover meaningful volunteer opportunities in your area that match your skills and interests.",
            },
            Feature {
                icon: "hand-heart",
                title: "Apply to Help",
                description: "Connect directly with people who need assistance and make a real impact in your community.",
            },
            Feature {
                icon: "bell",
                title: "Real-time Notifications",
                description: "Get instant alerts when someone needs help or when your application is accepted.",
            },
            Feature {
                icon: "filter",
                title: "Smart Filtering",
                description: "Filter opportunities by category, location, time commitment, and skills required.",
            },
            Feature {
                icon: "map-pin",
                title: "Location-based",
                description: "Find volunteer opportunities near you and see where you can make a difference.",
            },
            Feature {
                icon: "calendar",
                title: "Flexible Scheduling",
                description: "Choose tasks that fit your schedule and availability, from one-time to recurring commitments.",
            },
        ],
    },
    how_it_works: Section {
        heading: "How It Works",
        intro: "Getting started is simple. Follow these four easy steps to begin making a difference.",
        items: &[
            Step {
                number: 1,
                title: "Sign Up",
                description: "Create your free account and tell us about your interests and availability.",
            },
            Step {
                number: 2,
                title: "Find Tasks",
                description: "Browse volunteer opportunities that match your skills and location.",
            },
            Step {
                number: 3,
                title: "Help Out",
                description: "Apply to tasks, connect with those in need, and make a difference.",
            },
            Step {
                number: 4,
                title: "Build Impact",
                description: "Track your contributions and see the positive change you're creating.",
            },
        ],
    },
    call_to_action: CallToAction {
        heading: "Ready to make a difference in your community?",
        action: NavLink {
            label: "Join Now - It's Free",
            href: "/auth",
        },
    },
};
