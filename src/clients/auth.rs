//! Sign-up, sign-in and session persistence for [`UserClient`].

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::{debug, info, instrument, warn};
use crate::domain::{AdminProfile, RegisterForm, Session, User, UserCreate, UserPatch};
use crate::prefs::{Prefs, ACTIVE_SESSION_EMAIL, ADMIN_AVATAR};
use crate::user_actor::UserError;
use super::user_client::{normalize_email, UserClient};

const ADMIN_NAME: &str = "Administrador";

impl UserClient {
    /// Creates a student account with the configured starting balance.
    #[instrument(skip(self, form), fields(user_email = %form.email))]
    pub async fn register(&self, form: RegisterForm) -> Result<User, UserError> {
        info!("Processing register request");
        let email = normalize_email(&form.email);
        self.check_domain(&email)?;

        let required = [&form.name, &form.password, &form.school, &form.grade, &form.group];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(UserError::ValidationError("All fields are required".to_string()));
        }
        if email == normalize_email(&self.auth.admin_email) {
            return Err(UserError::AlreadyExists(email));
        }

        let password_hash = hash_password(form.password).await?;
        let payload = UserCreate {
            name: form.name.trim().to_string(),
            email: email.clone(),
            school: form.school.trim().to_string(),
            grade: form.grade.trim().to_string(),
            group: form.group.trim().to_string(),
            password_hash,
            balance: self.auth.starting_balance,
        };
        self.inner.insert(email.clone(), payload).await?;
        let user = self.inner.get(email.clone()).await?.ok_or(UserError::NotFound(email))?;
        info!(balance = user.balance, "User registered");
        Ok(user)
    }

    /// Signs in a student, or the operator with the configured credentials.
    #[instrument(skip(self, password, prefs))]
    pub async fn login(&self, email: &str, password: &str, prefs: &mut Prefs) -> Result<Session, UserError> {
        let email = normalize_email(email);
        let session = if email == normalize_email(&self.auth.admin_email) {
            if password != self.auth.admin_password {
                warn!("Rejected operator sign-in");
                return Err(UserError::InvalidCredentials(email));
            }
            Session::Admin(self.admin_profile(prefs))
        } else {
            self.check_domain(&email)?;
            let user = self.inner.get(email.clone()).await?.ok_or_else(|| UserError::NotFound(email.clone()))?;
            if !verify_password(password.to_string(), user.password_hash.clone()).await? {
                warn!("Rejected sign-in");
                return Err(UserError::InvalidCredentials(email));
            }
            Session::Student(user)
        };
        prefs.set(ACTIVE_SESSION_EMAIL, session.email())
            .map_err(|e| UserError::Preferences(e.to_string()))?;
        info!(admin = session.is_admin(), "Signed in");
        Ok(session)
    }

    /// Resumes the session remembered in `prefs`, if its account still exists.
    #[instrument(skip(self, prefs))]
    pub async fn restore_session(&self, prefs: &mut Prefs) -> Result<Option<Session>, UserError> {
        let Some(email) = prefs.active_session_email().map(normalize_email) else {
            debug!("No remembered session");
            return Ok(None);
        };
        if email == normalize_email(&self.auth.admin_email) {
            return Ok(Some(Session::Admin(self.admin_profile(prefs))));
        }
        match self.inner.get(email.clone()).await? {
            Some(user) => {
                info!(user_email = %email, "Session restored");
                Ok(Some(Session::Student(user)))
            }
            None => {
                warn!(user_email = %email, "Remembered account is gone, forgetting session");
                prefs.remove(ACTIVE_SESSION_EMAIL).map_err(|e| UserError::Preferences(e.to_string()))?;
                Ok(None)
            }
        }
    }

    pub fn logout(&self, prefs: &mut Prefs) -> Result<(), UserError> {
        prefs.remove(ACTIVE_SESSION_EMAIL).map_err(|e| UserError::Preferences(e.to_string()))?;
        info!("Signed out");
        Ok(())
    }

    /// Stores the avatar on the student record, or in `prefs` for the operator.
    #[instrument(skip(self, session, prefs), fields(user_email = %session.email()))]
    pub async fn set_avatar(&self, session: &Session, avatar: String, prefs: &mut Prefs) -> Result<Session, UserError> {
        match session {
            Session::Student(user) => {
                let patch = UserPatch { avatar: Some(avatar), ..Default::default() };
                let user = self.inner.update(user.email.clone(), patch).await?;
                Ok(Session::Student(user))
            }
            Session::Admin(admin) => {
                prefs.set(ADMIN_AVATAR, avatar.clone()).map_err(|e| UserError::Preferences(e.to_string()))?;
                Ok(Session::Admin(AdminProfile { avatar: Some(avatar), ..admin.clone() }))
            }
        }
    }

    fn admin_profile(&self, prefs: &Prefs) -> AdminProfile {
        AdminProfile {
            name: ADMIN_NAME.to_string(),
            email: normalize_email(&self.auth.admin_email),
            avatar: prefs.get(ADMIN_AVATAR).map(str::to_string),
        }
    }

    fn check_domain(&self, email: &str) -> Result<(), UserError> {
        let domain = self.auth.email_domain.to_lowercase();
        if email.len() <= domain.len() || !email.ends_with(&domain) {
            return Err(UserError::ValidationError(format!("Email must end with {}", self.auth.email_domain)));
        }
        Ok(())
    }
}

// Hashing runs on the blocking pool.

async fn hash_password(password: String) -> Result<String, UserError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    })
    .await
    .map_err(|e| UserError::PasswordHash(e.to_string()))?
}

async fn verify_password(password: String, stored: String) -> Result<bool, UserError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored).map_err(|e| UserError::PasswordHash(e.to_string()))?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    })
    .await
    .map_err(|e| UserError::PasswordHash(e.to_string()))?
}
