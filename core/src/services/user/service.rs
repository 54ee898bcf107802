//! Main user service implementation

use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;

use dc_shared::{validation, PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::time::parse_date;
use crate::domain::value_objects::{Actor, LoginResponse};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::integrations::{ImageStorage, ImageUpload, Mailer, OAuthProvider};
use crate::services::token::TokenService;

use super::types::{present, ProfileUpdate, RegisterUser};

/// Length of the email verification token
const VERIFY_TOKEN_LENGTH: usize = 16;

const PROFILE_IMAGE_FOLDER: &str = "darah-connect/users";

fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Service for user accounts
pub struct UserService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
    mailer: Arc<dyn Mailer>,
    images: Arc<dyn ImageStorage>,
    oauth: Option<Arc<dyn OAuthProvider>>,
    password_cost: u32,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<TokenService>,
        mailer: Arc<dyn Mailer>,
        images: Arc<dyn ImageStorage>,
    ) -> Self {
        Self {
            users,
            tokens,
            mailer,
            images,
            oauth: None,
            password_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_oauth(mut self, oauth: Arc<dyn OAuthProvider>) -> Self {
        self.oauth = Some(oauth);
        self
    }

    /// Lower bcrypt cost, for tests
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    fn hash_password(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.password_cost)
            .map_err(|e| DomainError::internal(format!("failed to hash password: {}", e)))
    }

    async fn find_user(&self, id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }

    /// Registers an unverified account and emails the verification link
    pub async fn register(&self, input: RegisterUser) -> DomainResult<User> {
        if input.name.trim().is_empty() {
            return Err(ValidationError::required("name").into());
        }
        if !validation::is_valid_email(&input.email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if input.password.is_empty() {
            return Err(ValidationError::required("password").into());
        }
        if !input.blood_type.is_empty() && !validation::is_valid_blood_type(&input.blood_type) {
            return Err(ValidationError::InvalidBloodType.into());
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let mut user = User::new(
            input.name.trim().to_string(),
            input.email,
            self.hash_password(&input.password)?,
        );
        user.gender = input.gender;
        user.phone = input.phone;
        user.blood_type = input.blood_type.trim().to_uppercase();
        user.birth_date = input.birth_date;
        user.address = input.address;
        user.verify_email_token = Some(random_token(VERIFY_TOKEN_LENGTH));

        let user = self.users.create(user).await.map_err(|e| {
            if e.is_conflict() {
                AuthError::EmailAlreadyRegistered.into()
            } else {
                e
            }
        })?;

        if let Some(token) = user.verify_email_token.as_deref() {
            if let Err(e) = self
                .mailer
                .send_verification_email(&user.email, &user.name, token)
                .await
            {
                tracing::warn!(user_id = %user.id, error = %e, "failed to send verification email");
            }
        }

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Password login
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResponse> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = bcrypt::verify(password, &user.password_hash).unwrap_or(false);
        if !matches {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        let token = self.tokens.generate_login_token(&user)?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(LoginResponse::new(token, user))
    }

    pub async fn verify_email(&self, token: &str) -> DomainResult<User> {
        let mut user = self
            .users
            .find_by_verify_token(token)
            .await?
            .ok_or(AuthError::InvalidVerificationToken)?;
        user.verify();
        self.users.update(user).await
    }

    /// Issues a reset-password token, stores it on the user and emails it
    pub async fn request_reset_password(&self, email: &str) -> DomainResult<()> {
        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = self.tokens.generate_reset_token(&user)?;
        user.set_reset_token(token.clone());
        let user = self.users.update(user).await?;

        self.mailer
            .send_reset_password_email(&user.email, &user.name, &token)
            .await
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> DomainResult<()> {
        if password.is_empty() {
            return Err(ValidationError::required("password").into());
        }

        let claims = self
            .tokens
            .verify_reset_token(token)
            .map_err(|_| AuthError::InvalidResetToken)?;
        let user_id = claims
            .user_id()
            .map_err(|_| AuthError::InvalidResetToken)?;
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        if user.reset_password_token.as_deref() != Some(token) {
            return Err(AuthError::InvalidResetToken.into());
        }

        user.change_password(self.hash_password(password)?);
        self.users.update(user).await?;
        Ok(())
    }

    fn oauth(&self) -> DomainResult<&Arc<dyn OAuthProvider>> {
        self.oauth
            .as_ref()
            .ok_or_else(|| DomainError::external("google", "oauth client not configured"))
    }

    pub fn google_login_url(&self, state: &str) -> DomainResult<String> {
        Ok(self.oauth()?.authorization_url(state))
    }

    /// Exchanges the code and logs in, creating a verified account on first use
    pub async fn google_login(&self, code: &str) -> DomainResult<LoginResponse> {
        let profile = self.oauth()?.exchange_code(code).await.map_err(|e| {
            tracing::warn!(error = %e, "google code exchange failed");
            DomainError::from(AuthError::OAuthFailed)
        })?;

        let user = match self.users.find_by_email(&profile.email).await? {
            Some(user) => user,
            None => {
                let mut user = User::new(
                    profile.name.clone(),
                    profile.email.clone(),
                    self.hash_password(&random_token(32))?,
                );
                user.is_verified = true;
                user.url_file = profile.picture.clone();
                let user = self.users.create(user).await?;
                tracing::info!(user_id = %user.id, "user registered through google");
                user
            }
        };

        let token = self.tokens.generate_login_token(&user)?;
        Ok(LoginResponse::new(token, user))
    }

    pub async fn get_profile(&self, actor: &Actor) -> DomainResult<User> {
        self.find_user(actor.user_id).await
    }

    /// Applies the non-empty fields of the patch
    pub async fn update_profile(&self, actor: &Actor, patch: ProfileUpdate) -> DomainResult<User> {
        let mut user = self.find_user(actor.user_id).await?;

        if let Some(name) = present(&patch.name) {
            user.name = name.to_string();
        }
        if let Some(gender) = present(&patch.gender) {
            user.gender = gender.to_string();
        }
        if let Some(email) = present(&patch.email) {
            if !validation::is_valid_email(email) {
                return Err(ValidationError::InvalidEmail.into());
            }
            let email = email.to_lowercase();
            if email != user.email {
                if self.users.find_by_email(&email).await?.is_some() {
                    return Err(AuthError::EmailAlreadyRegistered.into());
                }
                user.email = email;
            }
        }
        if let Some(password) = present(&patch.password) {
            user.password_hash = self.hash_password(password)?;
        }
        if let Some(phone) = present(&patch.phone) {
            user.phone = phone.to_string();
        }
        if let Some(blood_type) = present(&patch.blood_type) {
            if !validation::is_valid_blood_type(blood_type) {
                return Err(ValidationError::InvalidBloodType.into());
            }
            user.blood_type = blood_type.to_uppercase();
        }
        if let Some(birth_date) = present(&patch.birth_date) {
            user.birth_date = Some(parse_date("birth_date", birth_date)?);
        }
        if let Some(address) = present(&patch.address) {
            user.address = address.to_string();
        }
        if let Some(wallet) = present(&patch.wallet_address) {
            if !validation::is_valid_wallet_address(wallet) {
                return Err(ValidationError::format("wallet_address").into());
            }
            user.wallet_address = Some(wallet.to_string());
        }

        user.touch();
        self.users.update(user).await
    }

    /// Uploads a new profile image and deletes the previous one
    pub async fn upload_profile_image(
        &self,
        actor: &Actor,
        image: ImageUpload,
    ) -> DomainResult<User> {
        let mut user = self.find_user(actor.user_id).await?;

        let uploaded = self
            .images
            .upload(image.bytes, &image.content_type, PROFILE_IMAGE_FOLDER)
            .await?;
        let previous = user.set_image(uploaded.url, uploaded.public_id);
        let user = self.users.update(user).await?;

        if let Some(public_id) = previous {
            if let Err(e) = self.images.delete(&public_id).await {
                tracing::warn!(public_id = %public_id, error = %e, "failed to delete old profile image");
            }
        }
        Ok(user)
    }

    pub async fn list(&self, actor: &Actor, query: &PageQuery) -> DomainResult<Paginated<User>> {
        actor.ensure_admin()?;
        self.users.list(query).await
    }

    pub async fn get_by_id(&self, actor: &Actor, id: Uuid) -> DomainResult<User> {
        actor.ensure_owner(id)?;
        self.find_user(id).await
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        actor.ensure_admin()?;
        let user = self.find_user(id).await?;
        self.users.delete(id).await?;

        if let Some(public_id) = user.public_id.as_deref() {
            if let Err(e) = self.images.delete(public_id).await {
                tracing::warn!(public_id = %public_id, error = %e, "failed to delete profile image");
            }
        }
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}
