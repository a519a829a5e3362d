//! Volunteer opportunities: tasks posted by a user that need helpers.
//!
//! Raw form input arrives as an [`OpportunityDraft`] and is validated into
//! [`OpportunityFields`], the full editable field set. Identity, ownership
//! and creation time live on [`Opportunity`] and never change after insert.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Emoji used when the form leaves it blank.
pub const DEFAULT_EMOJI: &str = "🤝";
/// Upper bound on emoji length, in characters.
pub const EMOJI_MAX: usize = 8;
/// Upper bound on the length of short text fields, in characters.
pub const SHORT_TEXT_MAX: usize = 120;
/// Upper bound on the description length, in characters.
pub const DESCRIPTION_MAX: usize = 4000;
/// Largest helper count the `INTEGER` column holds.
pub const PEOPLE_NEEDED_MAX: i32 = i32::MAX;

/// Validation errors raised while building opportunity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpportunityValidationError {
    EmptyField { field: &'static str },
    FieldTooLong { field: &'static str, max: usize },
    UnknownCategory { value: String },
    PeopleNeededTooLow,
    PeopleNeededTooHigh { max: i32 },
    InvalidId,
}

impl OpportunityValidationError {
    /// Name of the form field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field } | Self::FieldTooLong { field, .. } => field,
            Self::UnknownCategory { .. } => "category",
            Self::PeopleNeededTooLow | Self::PeopleNeededTooHigh { .. } => "peopleNeeded",
            Self::InvalidId => "id",
        }
    }
}

impl fmt::Display for OpportunityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::FieldTooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::UnknownCategory { value } => write!(
                f,
                "unknown category '{value}'; expected Education, Environment, Event Safety or Community"
            ),
            Self::PeopleNeededTooLow => write!(f, "people needed must be at least 1"),
            Self::PeopleNeededTooHigh { max } => write!(f, "people needed must be at most {max}"),
            Self::InvalidId => write!(f, "opportunity id must be a valid UUID"),
        }
    }
}

impl std::error::Error for OpportunityValidationError {}

/// Stable opportunity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpportunityId(Uuid);

impl OpportunityId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for OpportunityId {
    type Err = OpportunityValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| OpportunityValidationError::InvalidId)
    }
}

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opportunity category. Serialised with its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Education,
    Environment,
    #[serde(rename = "Event Safety")]
    EventSafety,
    Community,
}

impl Category {
    /// Every category in the order the form offers them.
    pub const ALL: [Self; 4] = [
        Self::Education,
        Self::Environment,
        Self::EventSafety,
        Self::Community,
    ];

    /// Display string, also used as the stored value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Environment => "Environment",
            Self::EventSafety => "Event Safety",
            Self::Community => "Community",
        }
    }

    /// Badge tone shown on listing cards.
    pub fn badge(self) -> BadgeTone {
        match self {
            Self::EventSafety => BadgeTone::Red,
            Self::Education => BadgeTone::Blue,
            Self::Environment => BadgeTone::Green,
            Self::Community => BadgeTone::Primary,
        }
    }
}

impl FromStr for Category {
    type Err = OpportunityValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| OpportunityValidationError::UnknownCategory {
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour class for a category badge. Presentation maps these to styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Red,
    Blue,
    Green,
    Primary,
}

/// Number of helpers an opportunity asks for, between one and
/// [`PEOPLE_NEEDED_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PeopleNeeded(i32);

impl PeopleNeeded {
    /// The form default.
    pub const ONE: Self = Self(1);

    /// Validate a helper count.
    pub fn new(count: i64) -> Result<Self, OpportunityValidationError> {
        if count < 1 {
            return Err(OpportunityValidationError::PeopleNeededTooLow);
        }
        i32::try_from(count)
            .map(Self)
            .map_err(|_| OpportunityValidationError::PeopleNeededTooHigh {
                max: PEOPLE_NEEDED_MAX,
            })
    }

    /// Count as an unsigned integer.
    pub fn get(self) -> u32 {
        self.0.unsigned_abs()
    }

    /// Count in its stored column type.
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for PeopleNeeded {
    type Error = OpportunityValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PeopleNeeded> for i64 {
    fn from(value: PeopleNeeded) -> Self {
        i64::from(value.0)
    }
}

/// Raw, unvalidated opportunity input as submitted by the dashboard form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpportunityDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub duration: String,
    pub people_needed: i64,
    pub emoji: String,
}

/// Validated, editable opportunity fields.
///
/// ## Invariants
/// - `title`, `description`, `location` and `duration` are trimmed and non-empty.
/// - `emoji` is trimmed; blank input becomes [`DEFAULT_EMOJI`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityFields {
    title: String,
    description: String,
    category: Category,
    location: String,
    duration: String,
    people_needed: PeopleNeeded,
    emoji: String,
}

fn required_text(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, OpportunityValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OpportunityValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(OpportunityValidationError::FieldTooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

fn emoji_or_default(value: &str) -> Result<String, OpportunityValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_EMOJI.to_owned());
    }
    if trimmed.chars().count() > EMOJI_MAX {
        return Err(OpportunityValidationError::FieldTooLong {
            field: "emoji",
            max: EMOJI_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

impl TryFrom<OpportunityDraft> for OpportunityFields {
    type Error = OpportunityValidationError;

    fn try_from(draft: OpportunityDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            title: required_text(&draft.title, "title", SHORT_TEXT_MAX)?,
            description: required_text(&draft.description, "description", DESCRIPTION_MAX)?,
            category: draft.category.trim().parse()?,
            location: required_text(&draft.location, "location", SHORT_TEXT_MAX)?,
            duration: required_text(&draft.duration, "duration", SHORT_TEXT_MAX)?,
            people_needed: PeopleNeeded::new(draft.people_needed)?,
            emoji: emoji_or_default(&draft.emoji)?,
        })
    }
}

impl From<OpportunityFields> for OpportunityDraft {
    fn from(fields: OpportunityFields) -> Self {
        Self {
            title: fields.title,
            description: fields.description,
            category: fields.category.as_str().to_owned(),
            location: fields.location,
            duration: fields.duration,
            people_needed: i64::from(fields.people_needed),
            emoji: fields.emoji,
        }
    }
}

impl OpportunityFields {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn people_needed(&self) -> PeopleNeeded {
        self.people_needed
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }
}

/// Insert request. The store assigns the id and creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOpportunity {
    pub created_by: UserId,
    pub fields: OpportunityFields,
}

/// A stored opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    id: OpportunityId,
    #[serde(flatten)]
    fields: OpportunityFields,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

impl Opportunity {
    /// Assemble a stored opportunity, typically from a repository row.
    pub fn new(
        id: OpportunityId,
        fields: OpportunityFields,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            fields,
            created_by,
            created_at,
        }
    }

    pub fn id(&self) -> OpportunityId {
        self.id
    }

    pub fn fields(&self) -> &OpportunityFields {
        &self.fields
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `user` owns this opportunity.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.created_by == user
    }

    /// Replace the editable fields, keeping identity and ownership.
    pub fn with_fields(self, fields: OpportunityFields) -> Self {
        Self { fields, ..self }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn park_cleanup() -> OpportunityDraft {
        OpportunityDraft {
            title: "Park Cleanup".to_owned(),
            description: "Help tidy the riverside park".to_owned(),
            category: "Environment".to_owned(),
            location: "Riverside Park".to_owned(),
            duration: "3 hours".to_owned(),
            people_needed: 5,
            emoji: "🌳".to_owned(),
        }
    }

    #[rstest]
    fn valid_draft_builds_fields(park_cleanup: OpportunityDraft) {
        let fields = OpportunityFields::try_from(park_cleanup).expect("valid draft");
        assert_eq!(fields.title(), "Park Cleanup");
        assert_eq!(fields.category(), Category::Environment);
        assert_eq!(fields.people_needed().get(), 5);
        assert_eq!(fields.emoji(), "🌳");
    }

    #[rstest]
    fn blank_emoji_falls_back_to_default(mut park_cleanup: OpportunityDraft) {
        park_cleanup.emoji = "   ".to_owned();
        let fields = OpportunityFields::try_from(park_cleanup).expect("valid draft");
        assert_eq!(fields.emoji(), DEFAULT_EMOJI);
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn people_needed_must_be_positive(mut park_cleanup: OpportunityDraft, #[case] count: i64) {
        park_cleanup.people_needed = count;
        let err = OpportunityFields::try_from(park_cleanup).expect_err("invalid count");
        assert_eq!(err, OpportunityValidationError::PeopleNeededTooLow);
        assert_eq!(err.field(), "peopleNeeded");
    }

    #[rstest]
    fn people_needed_is_capped_at_the_column_range(mut park_cleanup: OpportunityDraft) {
        park_cleanup.people_needed = 3_000_000_000;
        let err = OpportunityFields::try_from(park_cleanup.clone()).expect_err("too many");
        assert_eq!(
            err,
            OpportunityValidationError::PeopleNeededTooHigh {
                max: PEOPLE_NEEDED_MAX
            }
        );
        assert_eq!(err.field(), "peopleNeeded");

        park_cleanup.people_needed = i64::from(PEOPLE_NEEDED_MAX);
        let fields = OpportunityFields::try_from(park_cleanup).expect("largest count");
        assert_eq!(fields.people_needed().as_i32(), PEOPLE_NEEDED_MAX);
    }

    #[rstest]
    fn duration_is_required(mut park_cleanup: OpportunityDraft) {
        park_cleanup.duration = " ".to_owned();
        let err = OpportunityFields::try_from(park_cleanup).expect_err("missing duration");
        assert_eq!(
            err,
            OpportunityValidationError::EmptyField { field: "duration" }
        );
    }

    #[rstest]
    fn unknown_categories_are_rejected(mut park_cleanup: OpportunityDraft) {
        park_cleanup.category = "Sports".to_owned();
        let err = OpportunityFields::try_from(park_cleanup).expect_err("bad category");
        assert!(matches!(
            err,
            OpportunityValidationError::UnknownCategory { ref value } if value == "Sports"
        ));
    }

    #[rstest]
    #[case(Category::EventSafety, BadgeTone::Red)]
    #[case(Category::Education, BadgeTone::Blue)]
    #[case(Category::Environment, BadgeTone::Green)]
    #[case(Category::Community, BadgeTone::Primary)]
    fn categories_map_to_badges(#[case] category: Category, #[case] tone: BadgeTone) {
        assert_eq!(category.badge(), tone);
    }

    #[rstest]
    fn event_safety_uses_display_string_on_the_wire() {
        let json = serde_json::to_string(&Category::EventSafety).expect("serialise");
        assert_eq!(json, "\"Event Safety\"");
        assert_eq!("Event Safety".parse::<Category>(), Ok(Category::EventSafety));
    }

    #[rstest]
    fn with_fields_keeps_identity(park_cleanup: OpportunityDraft) {
        let fields = OpportunityFields::try_from(park_cleanup.clone()).expect("valid draft");
        let owner = UserId::random();
        let id = OpportunityId::random();
        let stored = Opportunity::new(id, fields, owner.clone(), Utc::now());

        let mut edited = park_cleanup;
        edited.people_needed = 8;
        let updated =
            stored.with_fields(OpportunityFields::try_from(edited).expect("valid edit"));

        assert_eq!(updated.id(), id);
        assert!(updated.is_owned_by(&owner));
        assert_eq!(updated.fields().people_needed().get(), 8);
    }
}
