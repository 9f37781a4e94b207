//! In-crate mocks for grant and server tests.
//!
//! A single [`MockStore`] implements every repository and factory trait and
//! counts repository reads and writes so tests can assert on side effects.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::AuthResult;
use crate::factory::{AccessTokenFactory, AuthCodeFactory, MintContext, RefreshTokenFactory};
use crate::grant::GrantContext;
use crate::repository::{
    AccessTokenRepository, AuthCodeRepository, ClientRepository, RefreshTokenRepository,
    UserRepository, UserThirdPartyRepository,
};
use crate::types::{
    AccessToken, AuthCode, Client, GrantType, RefreshToken, User, UserThirdPartyLink,
};

pub(crate) const ACCESS_TOKEN_TTL: i64 = 3600;
pub(crate) const REFRESH_TOKEN_TTL: i64 = 86400;

#[derive(Default)]
pub(crate) struct MockStore {
    pub clients: RwLock<HashMap<String, Client>>,
    pub users: RwLock<HashMap<String, (User, String)>>,
    pub links: RwLock<Vec<UserThirdPartyLink>>,
    pub auth_codes: RwLock<HashMap<String, AuthCode>>,
    pub access_tokens: RwLock<HashMap<Uuid, AccessToken>>,
    pub refresh_tokens: RwLock<HashMap<String, RefreshToken>>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    counter: AtomicU64,
}

impl MockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn context(self: &Arc<Self>) -> GrantContext {
        GrantContext {
            clients: self.clone(),
            users: self.clone(),
            user_third_parties: self.clone(),
            auth_codes: self.clone(),
            access_tokens: self.clone(),
            refresh_tokens: self.clone(),
            auth_code_factory: self.clone(),
            access_token_factory: self.clone(),
            refresh_token_factory: self.clone(),
            default_scope: String::new(),
            refresh_token_rotation: false,
        }
    }

    pub fn add_client(&self, client: Client) {
        self.clients
            .write()
            .unwrap()
            .insert(client.client_id.clone(), client);
    }

    pub fn add_user(&self, id: &str, username: &str, password: &str) {
        self.users.write().unwrap().insert(
            id.to_string(),
            (User::new(id, username), password.to_string()),
        );
    }

    pub fn add_link(&self, link: UserThirdPartyLink) {
        self.links.write().unwrap().push(link);
    }

    pub fn insert_auth_code(&self, code: AuthCode) {
        self.auth_codes
            .write()
            .unwrap()
            .insert(code.code.clone(), code);
    }

    pub fn insert_access_token(&self, token: AccessToken) {
        self.access_tokens.write().unwrap().insert(token.id, token);
    }

    pub fn insert_refresh_token(&self, token: RefreshToken) {
        self.refresh_tokens
            .write()
            .unwrap()
            .insert(token.token.clone(), token);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn next(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) fn test_client() -> Client {
    Client::new("c1")
        .with_secret("secret")
        .with_grant_type(GrantType::AuthorizationCode)
        .with_grant_type(GrantType::Implicit)
        .with_grant_type(GrantType::ClientCredentials)
        .with_grant_type(GrantType::Password)
        .with_grant_type(GrantType::RefreshToken)
        .with_grant_type(GrantType::OpenId)
        .with_redirect_uri("https://a/cb")
        .with_scope("read")
}

pub(crate) fn auth_code(code: &str, expires_at: OffsetDateTime) -> AuthCode {
    AuthCode {
        code: code.to_string(),
        client_id: "c1".to_string(),
        user_id: "7".to_string(),
        scope: "read".to_string(),
        redirect_uri: "https://a/cb".to_string(),
        expires_at,
    }
}

pub(crate) fn access_token(user_id: Option<&str>) -> AccessToken {
    AccessToken {
        id: Uuid::new_v4(),
        token: "old-at".to_string(),
        client_id: "c1".to_string(),
        user_id: user_id.map(str::to_string),
        scope: "read".to_string(),
        expires_in: ACCESS_TOKEN_TTL,
        created_at: OffsetDateTime::now_utc(),
    }
}

pub(crate) fn refresh_token(
    token: &str,
    access_token: &AccessToken,
    created_at: OffsetDateTime,
) -> RefreshToken {
    RefreshToken {
        id: Uuid::new_v4(),
        token: token.to_string(),
        client_id: access_token.client_id.clone(),
        user_id: access_token.user_id.clone(),
        scope: access_token.scope.clone(),
        access_token_id: access_token.id,
        created_at,
        expires_in: REFRESH_TOKEN_TTL,
    }
}

#[async_trait]
impl ClientRepository for MockStore {
    async fn get_by_client_id(&self, client_id: &str) -> AuthResult<Option<Client>> {
        self.read();
        Ok(self.clients.read().unwrap().get(client_id).cloned())
    }
}

#[async_trait]
impl UserRepository for MockStore {
    async fn get_by_user_id(&self, user_id: &str) -> AuthResult<Option<User>> {
        self.read();
        Ok(self
            .users
            .read()
            .unwrap()
            .get(user_id)
            .map(|(user, _)| user.clone()))
    }

    async fn get_by_name_and_password(
        &self,
        user_name: &str,
        password: &str,
    ) -> AuthResult<Option<User>> {
        self.read();
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|(user, stored)| user.username == user_name && stored == password)
            .map(|(user, _)| user.clone()))
    }
}

#[async_trait]
impl UserThirdPartyRepository for MockStore {
    async fn get_by_union_id(
        &self,
        third_party: &str,
        union_id: &str,
    ) -> AuthResult<Option<UserThirdPartyLink>> {
        self.read();
        Ok(self
            .links
            .read()
            .unwrap()
            .iter()
            .find(|link| link.third_party == third_party && link.union_id == union_id)
            .cloned())
    }
}

#[async_trait]
impl AuthCodeRepository for MockStore {
    async fn add(&self, code: &AuthCode) -> AuthResult<()> {
        self.write();
        self.insert_auth_code(code.clone());
        Ok(())
    }

    async fn remove(&self, code: &AuthCode) -> AuthResult<()> {
        self.write();
        self.auth_codes.write().unwrap().remove(&code.code);
        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> AuthResult<Option<AuthCode>> {
        self.read();
        Ok(self.auth_codes.read().unwrap().get(code).cloned())
    }
}

#[async_trait]
impl AccessTokenRepository for MockStore {
    async fn add(&self, token: &AccessToken) -> AuthResult<()> {
        self.write();
        self.insert_access_token(token.clone());
        Ok(())
    }

    async fn remove_by_id(&self, id: Uuid) -> AuthResult<()> {
        self.write();
        self.access_tokens.write().unwrap().remove(&id);
        Ok(())
    }
}

#[async_trait]
impl RefreshTokenRepository for MockStore {
    async fn add(&self, token: &RefreshToken) -> AuthResult<()> {
        self.write();
        self.insert_refresh_token(token.clone());
        Ok(())
    }

    async fn remove(&self, token: &RefreshToken) -> AuthResult<()> {
        self.write();
        self.refresh_tokens.write().unwrap().remove(&token.token);
        Ok(())
    }

    async fn get_by_token(&self, token: &str) -> AuthResult<Option<RefreshToken>> {
        self.read();
        Ok(self.refresh_tokens.read().unwrap().get(token).cloned())
    }
}

impl AuthCodeFactory for MockStore {
    fn new_auth_code(&self, ctx: &MintContext<'_>, user: &User) -> AuthResult<AuthCode> {
        Ok(AuthCode {
            code: self.next("code"),
            client_id: ctx.client.client_id.clone(),
            user_id: user.id.clone(),
            scope: ctx.scope.to_string(),
            redirect_uri: ctx.request.redirect_uri.clone(),
            expires_at: OffsetDateTime::now_utc() + Duration::minutes(10),
        })
    }
}

impl AccessTokenFactory for MockStore {
    fn new_access_token(
        &self,
        ctx: &MintContext<'_>,
        _previous: Option<&RefreshToken>,
    ) -> AuthResult<AccessToken> {
        Ok(AccessToken {
            id: Uuid::new_v4(),
            token: self.next("at"),
            client_id: ctx.client.client_id.clone(),
            user_id: ctx.user.map(|user| user.id.clone()),
            scope: ctx.scope.to_string(),
            expires_in: ACCESS_TOKEN_TTL,
            created_at: OffsetDateTime::now_utc(),
        })
    }
}

impl RefreshTokenFactory for MockStore {
    fn new_refresh_token(
        &self,
        ctx: &MintContext<'_>,
        access_token: &AccessToken,
    ) -> AuthResult<RefreshToken> {
        Ok(RefreshToken {
            id: Uuid::new_v4(),
            token: self.next("rt"),
            client_id: ctx.client.client_id.clone(),
            user_id: ctx.user.map(|user| user.id.clone()),
            scope: ctx.scope.to_string(),
            access_token_id: access_token.id,
            created_at: OffsetDateTime::now_utc(),
            expires_in: REFRESH_TOKEN_TTL,
        })
    }
}
