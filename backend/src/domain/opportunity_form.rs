//! Dashboard form state for creating or editing an opportunity.
//!
//! A form is a record of field values plus a mode. Create and edit are
//! mutually exclusive: an edit form always carries its target id, a create
//! form never does.

use serde::{Deserialize, Serialize};

use super::opportunity::{
    Category, DEFAULT_EMOJI, Opportunity, OpportunityDraft, OpportunityFields, OpportunityId,
    OpportunityValidationError, PeopleNeeded,
};

/// Whether a form creates a new opportunity or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum FormMode {
    #[default]
    Create,
    Edit {
        #[serde(rename = "opportunityId")]
        opportunity_id: OpportunityId,
    },
}

impl FormMode {
    /// Heading shown above the form.
    pub fn title(self) -> &'static str {
        match self {
            Self::Create => "Create Opportunity",
            Self::Edit { .. } => "Edit Opportunity",
        }
    }

    /// Target of an edit, if any.
    pub fn editing(self) -> Option<OpportunityId> {
        match self {
            Self::Create => None,
            Self::Edit { opportunity_id } => Some(opportunity_id),
        }
    }
}

/// Field values and mode of the dashboard opportunity form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityForm {
    #[serde(flatten)]
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    pub duration: String,
    pub people_needed: i64,
    pub emoji: String,
}

impl Default for OpportunityForm {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            category: Category::default(),
            location: String::new(),
            duration: String::new(),
            people_needed: i64::from(PeopleNeeded::ONE),
            emoji: DEFAULT_EMOJI.to_owned(),
        }
    }
}

impl OpportunityForm {
    /// Empty create form with default values.
    pub fn create() -> Self {
        Self::default()
    }

    /// Edit form pre-populated from a stored opportunity.
    pub fn edit(opportunity: &Opportunity) -> Self {
        let fields = opportunity.fields();
        Self {
            mode: FormMode::Edit {
                opportunity_id: opportunity.id(),
            },
            title: fields.title().to_owned(),
            description: fields.description().to_owned(),
            category: fields.category(),
            location: fields.location().to_owned(),
            duration: fields.duration().to_owned(),
            people_needed: i64::from(fields.people_needed()),
            emoji: fields.emoji().to_owned(),
        }
    }

    /// Same values, switched to create mode.
    pub fn into_create(self) -> Self {
        Self {
            mode: FormMode::Create,
            ..self
        }
    }

    /// Same values, targeting `opportunity_id`.
    pub fn into_edit(self, opportunity_id: OpportunityId) -> Self {
        Self {
            mode: FormMode::Edit { opportunity_id },
            ..self
        }
    }

    /// Validate the field values.
    pub fn to_fields(&self) -> Result<OpportunityFields, OpportunityValidationError> {
        OpportunityFields::try_from(OpportunityDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.as_str().to_owned(),
            location: self.location.clone(),
            duration: self.duration.clone(),
            people_needed: self.people_needed,
            emoji: self.emoji.clone(),
        })
    }
}
