//! Demo users kept in their own table, separate from login credentials.

/// Name used when a demo user is created without one.
pub const DEFAULT_DEMO_NAME: &str = "Usuario Demo";
/// Email used when a demo user is created without one.
pub const DEFAULT_DEMO_EMAIL: &str = "demo@mail.com";

/// A stored demo user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Values for a new demo user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDemoUser {
    pub name: String,
    pub email: String,
}

impl NewDemoUser {
    /// Trim the inputs, substituting the defaults for missing or blank values.
    ///
    /// # Examples
    /// ```
    /// use inventory_backend::domain::NewDemoUser;
    ///
    /// let user = NewDemoUser::with_defaults(Some("  Ariel "), None);
    /// assert_eq!(user.name, "Ariel");
    /// assert_eq!(user.email, "demo@mail.com");
    /// ```
    #[must_use]
    pub fn with_defaults(name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            name: non_blank(name).unwrap_or(DEFAULT_DEMO_NAME).to_owned(),
            email: non_blank(email).unwrap_or(DEFAULT_DEMO_EMAIL).to_owned(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
