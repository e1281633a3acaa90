mod action;
mod admin_user;
mod patch;
mod signup;

pub use action::Action;
pub use admin_user::AdminUser;
pub use patch::{FieldUpdate, SignupPatch};
pub use signup::{PlanType, SignupRecord, Status};

/// One row of a table, keyed by column name.
pub type Fields = std::collections::BTreeMap<String, String>;
