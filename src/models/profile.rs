use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role. Immutable once the profile exists; the wire strings match
/// the values stored for every account since launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Role {
    #[serde(rename = "EMPLOYEE")]
    Employee,
    #[serde(rename = "EMPLOYER")]
    Employer,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Employer => "EMPLOYER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "EMPLOYEE" => Some(Role::Employee),
            "EMPLOYER" => Some(Role::Employer),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// One account. `id` is the authentication identity and the record key;
/// follow edges are weak references to other profile ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub bio: Option<String>,
    pub institution: Option<String>,
    pub skills: Vec<String>,
    pub portfolio: Vec<PortfolioItem>,
    pub following: Vec<Uuid>,
    pub followers: Vec<Uuid>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub is_legally_registered: Option<bool>,
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Sign-up input for the store; sets are seeded empty per the defaults every
/// new account gets.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub is_legally_registered: Option<bool>,
    pub contact_phone: Option<String>,
}

impl NewProfile {
    pub fn into_profile(self, id: Uuid, created_at: DateTime<Utc>) -> Profile {
        Profile {
            id,
            display_name: self.display_name,
            email: self.email,
            role: self.role,
            bio: None,
            institution: None,
            skills: Vec::new(),
            portfolio: Vec::new(),
            following: Vec::new(),
            followers: Vec::new(),
            business_name: self.business_name,
            business_address: self.business_address,
            is_legally_registered: self.is_legally_registered,
            contact_phone: self.contact_phone,
            created_at,
            password_hash: self.password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_strings_round_trip() {
        for raw in ["EMPLOYEE", "EMPLOYER", "ADMIN"] {
            assert_eq!(Role::parse(raw).expect("known role").as_str(), raw);
        }
        assert!(Role::parse("employee").is_none());
    }

    #[test]
    fn new_profile_seeds_empty_sets() {
        let profile = NewProfile {
            display_name: "Ada".into(),
            email: "ada@example.com".into(),
            role: Role::Employee,
            password_hash: "hash".into(),
            business_name: None,
            business_address: None,
            is_legally_registered: None,
            contact_phone: None,
        }
        .into_profile(Uuid::new_v4(), Utc::now());

        assert!(profile.skills.is_empty());
        assert!(profile.portfolio.is_empty());
        assert!(profile.following.is_empty());
        assert!(profile.followers.is_empty());
    }
}
