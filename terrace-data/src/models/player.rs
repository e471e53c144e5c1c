//! Player payload for database writes

/// A player record ready to be written to the database
///
/// `id` is the identifier assigned by the external provider and is the
/// conflict key for upserts; everything else may be overwritten by a
/// later import.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub id: i64,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub birth_country: Option<String>,
    pub nationality: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub position: Option<String>,
    pub photo_url: Option<String>,
}

impl NewPlayer {
    /// Minimal payload with only the required fields set
    pub fn bare(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            first_name: None,
            last_name: None,
            age: None,
            birth_date: None,
            birth_place: None,
            birth_country: None,
            nationality: None,
            height: None,
            weight: None,
            position: None,
            photo_url: None,
        }
    }
}
