//! User-facing notice strings shown after actions and fetch failures.

pub const SIGNED_IN: &str = "Signed in successfully!";
pub const ACCOUNT_CREATED: &str = "Account created! Please check your email.";
pub const EMAIL_CONFIRMED: &str = "Email confirmed! You can now sign in.";
pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";
pub const EMAIL_NOT_CONFIRMED: &str = "Email not confirmed";
pub const USER_ALREADY_REGISTERED: &str = "User already registered";
pub const INVALID_VERIFICATION_LINK: &str = "Verification link is invalid or has expired";

pub const SIGN_IN_TO_APPLY: &str = "Please sign in to apply";
pub const APPLICATION_SUBMITTED: &str = "Application submitted successfully!";
pub const ALREADY_APPLIED: &str = "You've already applied to this opportunity";
pub const APPLICATION_FAILED: &str = "Failed to submit application";

pub const FAILED_TO_LOAD_OPPORTUNITIES: &str = "Failed to load opportunities";
pub const FAILED_TO_LOAD_DATA: &str = "Failed to load data";

pub const OPPORTUNITY_CREATED: &str = "Opportunity created!";
pub const OPPORTUNITY_UPDATED: &str = "Opportunity updated!";
pub const OPPORTUNITY_SAVE_FAILED: &str = "Failed to save opportunity";
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this opportunity?";
pub const OPPORTUNITY_DELETED: &str = "Opportunity deleted";
pub const OPPORTUNITY_DELETE_FAILED: &str = "Failed to delete opportunity";
pub const OPPORTUNITY_NOT_FOUND: &str = "Opportunity not found";
pub const NOT_OPPORTUNITY_OWNER: &str = "You can only change opportunities you created";

pub const SIGN_IN_REQUIRED: &str = "Please sign in to continue";
