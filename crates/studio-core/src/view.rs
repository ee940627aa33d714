//! Top-level site views. Unknown names land on the landing page.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Landing,
    Moes,
    AdminLogin,
    Admin,
}

impl View {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "moes" | "studio" => Self::Moes,
            "adminlogin" | "admin-login" => Self::AdminLogin,
            "admin" => Self::Admin,
            _ => Self::Landing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Moes => "moes",
            Self::AdminLogin => "adminLogin",
            Self::Admin => "admin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_view_is_landing() {
        assert_eq!(View::parse("pricing"), View::Landing);
        assert_eq!(View::parse("adminLogin"), View::AdminLogin);
        assert_eq!(View::parse(View::Moes.as_str()), View::Moes);
    }
}
