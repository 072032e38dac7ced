use serde::{Deserialize, Serialize};

/// A registered student. Keyed by institutional email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub school: String,
    pub grade: String,
    pub group: String,
    /// Wallet balance in coins.
    pub balance: f64,
    pub loyalty_points: u32,
    pub avatar: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// Payload for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub school: String,
    pub grade: String,
    pub group: String,
    pub password_hash: String,
    pub balance: f64,
}

/// Payload for updating an existing user's profile.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub school: Option<String>,
    pub grade: Option<String>,
    pub group: Option<String>,
    pub avatar: Option<String>,
}

/// Registration form as typed by the student.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub school: String,
    pub grade: String,
    pub group: String,
}

/// Balance and points after a wallet operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wallet {
    pub balance: f64,
    pub loyalty_points: u32,
}

impl User {
    pub fn wallet(&self) -> Wallet {
        Wallet { balance: self.balance, loyalty_points: self.loyalty_points }
    }
}

/// Who is signed in.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Student(User),
    Admin(AdminProfile),
}

/// The staff operator. Not stored in the user collection.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminProfile {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl Session {
    pub fn email(&self) -> &str {
        match self {
            Session::Student(user) => &user.email,
            Session::Admin(admin) => &admin.email,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin(_))
    }
}
