/// A row in the `users` table (profile fields only).
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    /// `"patient"`, `"doctor"`, or `"admin"`.
    pub role: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    /// Centimetres.
    pub height: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}
