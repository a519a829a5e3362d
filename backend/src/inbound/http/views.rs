//! JSON views of domain values returned by the API and page endpoints.
//!
//! Identifiers travel as strings and timestamps as RFC 3339 so the payloads
//! stay stable regardless of how the domain types serialise.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::DashboardData;
use crate::domain::{
    Application, ApplicationWithOpportunity, BadgeTone, FormMode, Opportunity, OpportunityForm,
    Session,
};

/// Opportunity card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityView {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Park Cleanup")]
    pub title: String,
    pub description: String,
    #[schema(example = "Environment")]
    pub category: String,
    /// Colour class derived from the category.
    #[schema(example = "green")]
    pub badge: String,
    pub location: String,
    #[schema(example = "3 hours")]
    pub duration: String,
    #[schema(example = 5)]
    pub people_needed: u32,
    #[schema(example = "🌳")]
    pub emoji: String,
    pub created_by: String,
    #[schema(example = "2024-05-01T09:00:00+00:00")]
    pub created_at: String,
}

impl From<&Opportunity> for OpportunityView {
    fn from(value: &Opportunity) -> Self {
        let fields = value.fields();
        let category = fields.category();
        Self {
            id: value.id().to_string(),
            title: fields.title().to_owned(),
            description: fields.description().to_owned(),
            category: category.as_str().to_owned(),
            badge: badge_class(category.badge()).to_owned(),
            location: fields.location().to_owned(),
            duration: fields.duration().to_owned(),
            people_needed: fields.people_needed().get(),
            emoji: fields.emoji().to_owned(),
            created_by: value.created_by().to_string(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

fn badge_class(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Red => "red",
        BadgeTone::Blue => "blue",
        BadgeTone::Green => "green",
        BadgeTone::Primary => "primary",
    }
}

pub(crate) fn opportunity_views(opportunities: &[Opportunity]) -> Vec<OpportunityView> {
    opportunities.iter().map(OpportunityView::from).collect()
}

/// A stored application without its opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub id: String,
    pub opportunity_id: String,
    pub user_id: String,
    #[schema(example = "pending")]
    pub status: String,
    pub created_at: String,
}

impl From<&Application> for ApplicationSummary {
    fn from(value: &Application) -> Self {
        Self {
            id: value.id.to_string(),
            opportunity_id: value.opportunity_id.to_string(),
            user_id: value.user_id.to_string(),
            status: value.status.as_str().to_owned(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Entry of "My Applications": the application plus the opportunity card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    pub id: String,
    pub opportunity_id: String,
    #[schema(example = "pending")]
    pub status: String,
    pub created_at: String,
    pub opportunity: OpportunityView,
}

impl From<&ApplicationWithOpportunity> for ApplicationView {
    fn from(value: &ApplicationWithOpportunity) -> Self {
        let application = &value.application;
        Self {
            id: application.id.to_string(),
            opportunity_id: application.opportunity_id.to_string(),
            status: application.status.as_str().to_owned(),
            created_at: application.created_at.to_rfc3339(),
            opportunity: OpportunityView::from(&value.opportunity),
        }
    }
}

/// The signed-in user's opportunities and applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub opportunities: Vec<OpportunityView>,
    pub applications: Vec<ApplicationView>,
}

impl From<&DashboardData> for DashboardView {
    fn from(value: &DashboardData) -> Self {
        Self {
            opportunities: opportunity_views(&value.opportunities),
            applications: value.applications.iter().map(ApplicationView::from).collect(),
        }
    }
}

/// Dashboard form state. `opportunityId` is present only in edit mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityFormView {
    #[schema(example = "create")]
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<String>,
    /// Heading for the form, "Create Opportunity" or "Edit Opportunity".
    pub heading: String,
    pub title: String,
    pub description: String,
    #[schema(example = "Education")]
    pub category: String,
    pub location: String,
    pub duration: String,
    #[schema(example = 1)]
    pub people_needed: i64,
    #[schema(example = "🤝")]
    pub emoji: String,
}

impl From<&OpportunityForm> for OpportunityFormView {
    fn from(value: &OpportunityForm) -> Self {
        let mode = match value.mode {
            FormMode::Create => "create",
            FormMode::Edit { .. } => "edit",
        };
        Self {
            mode: mode.to_owned(),
            opportunity_id: value.mode.editing().map(|id| id.to_string()),
            heading: value.mode.title().to_owned(),
            title: value.title.clone(),
            description: value.description.clone(),
            category: value.category.as_str().to_owned(),
            location: value.location.clone(),
            duration: value.duration.clone(),
            people_needed: value.people_needed,
            emoji: value.emoji.clone(),
        }
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserView {
    pub id: String,
    #[schema(example = "ada@example.org")]
    pub email: String,
    #[schema(example = "Ada Lovelace")]
    pub display_name: String,
}

/// Current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub user: SessionUserView,
}

impl From<&Session> for SessionView {
    fn from(value: &Session) -> Self {
        Self {
            user: SessionUserView {
                id: value.user.id.to_string(),
                email: value.user.email.as_ref().to_owned(),
                display_name: value.user.display_name.as_ref().to_owned(),
            },
        }
    }
}

/// Outcome notice with an optional client-side redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoticeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Signed in successfully!")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/")]
    pub redirect: Option<String>,
}

impl NoticeResponse {
    pub fn with_redirect(notice: Option<&str>, redirect: &str) -> Self {
        Self {
            notice: notice.map(str::to_owned),
            redirect: Some(redirect.to_owned()),
        }
    }

    pub fn notice(notice: &str) -> Self {
        Self {
            notice: Some(notice.to_owned()),
            redirect: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ApplicationId, ApplicationStatus, Category, OpportunityDraft, OpportunityFields,
        OpportunityId, UserId,
    };
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;

    fn opportunity(category: &str) -> Opportunity {
        let fields = OpportunityFields::try_from(OpportunityDraft {
            title: "Park Cleanup".to_owned(),
            description: "Help tidy the riverside park".to_owned(),
            category: category.to_owned(),
            location: "Riverside Park".to_owned(),
            duration: "3 hours".to_owned(),
            people_needed: 5,
            emoji: "🌳".to_owned(),
        })
        .expect("valid fields");
        let created_at = Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .expect("timestamp");
        Opportunity::new(OpportunityId::random(), fields, UserId::random(), created_at)
    }

    #[rstest]
    #[case("Event Safety", "red")]
    #[case("Education", "blue")]
    #[case("Environment", "green")]
    #[case("Community", "primary")]
    fn cards_carry_the_category_badge(#[case] category: &str, #[case] badge: &str) {
        let view = OpportunityView::from(&opportunity(category));
        assert_eq!(view.badge, badge);
        assert_eq!(view.category, category);
    }

    #[rstest]
    fn cards_serialise_in_camel_case() {
        let view = OpportunityView::from(&opportunity("Environment"));
        let value = serde_json::to_value(&view).expect("serialise");
        assert_eq!(value["peopleNeeded"], json!(5));
        assert_eq!(value["createdAt"], json!("2024-05-01T09:00:00+00:00"));
    }

    #[rstest]
    fn application_views_embed_the_opportunity() {
        let target = opportunity("Education");
        let application = Application {
            id: ApplicationId::random(),
            opportunity_id: target.id(),
            user_id: UserId::random(),
            status: ApplicationStatus::Pending,
            created_at: target.created_at(),
        };
        let view = ApplicationView::from(&ApplicationWithOpportunity {
            application,
            opportunity: target.clone(),
        });
        assert_eq!(view.status, "pending");
        assert_eq!(view.opportunity.id, target.id().to_string());
    }

    #[rstest]
    fn create_forms_omit_the_target_id() {
        let view = OpportunityFormView::from(&OpportunityForm::create());
        assert_eq!(view.mode, "create");
        assert_eq!(view.heading, "Create Opportunity");
        assert_eq!(view.category, Category::Education.as_str());
        let value = serde_json::to_value(&view).expect("serialise");
        assert!(value.get("opportunityId").is_none());
    }

    #[rstest]
    fn edit_forms_carry_the_target_id() {
        let existing = opportunity("Environment");
        let view = OpportunityFormView::from(&OpportunityForm::edit(&existing));
        assert_eq!(view.mode, "edit");
        assert_eq!(view.opportunity_id, Some(existing.id().to_string()));
        assert_eq!(view.heading, "Edit Opportunity");
    }
}
