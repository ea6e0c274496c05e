use serde::{Deserialize, Serialize};

/// Identity supplied by the authenticated session provider.
///
/// Only the display name and email are used, to seed the personal section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: Option<String>,
    pub email: Option<String>,
}
