use secrecy::Secret;
use vouch_adapters::{
    HashMapUserStore, HashSetConsumedTokenStore, JwtTokenService, MockEmailClient, TokenConfig,
};
use vouch_application::AccountMessages;
use vouch_core::{Email, NewUser, Password, TokenTtl, UserId, UserStore, Username};
use vouch_service::AccountService;

pub const BASE_URL: &str = "https://accounts.vouch.test";
pub const SECRET: &str = "integration-test-secret";

pub type TestService = AccountService<HashMapUserStore, HashSetConsumedTokenStore, MockEmailClient>;

pub struct TestApp {
    pub service: TestService,
    pub user_store: HashMapUserStore,
    pub consumed_tokens: HashSetConsumedTokenStore,
    pub email_client: MockEmailClient,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_token_config(TokenConfig::new(Secret::from(SECRET.to_owned())))
    }

    pub fn with_token_config(config: TokenConfig) -> Self {
        let user_store = HashMapUserStore::new();
        let consumed_tokens = HashSetConsumedTokenStore::new();
        let email_client = MockEmailClient::new();

        let service = AccountService::new(
            user_store.clone(),
            consumed_tokens.clone(),
            email_client.clone(),
            JwtTokenService::new(&config).unwrap(),
            AccountMessages::new("[Vouch]", BASE_URL),
            TokenTtl::default(),
        );

        Self {
            service,
            user_store,
            consumed_tokens,
            email_client,
        }
    }

    /// Token from the most recent email sent to `recipient`.
    pub async fn token_sent_to(&self, recipient: &Email) -> String {
        let sent = self
            .email_client
            .last_email_to(recipient)
            .await
            .expect("no email was sent");
        token_from(&sent.content)
    }

    pub async fn is_confirmed(&self, id: UserId) -> bool {
        self.user_store.get_user(id).await.unwrap().is_confirmed()
    }
}

pub fn token_from(content: &str) -> String {
    content
        .lines()
        .find(|line| line.starts_with(BASE_URL))
        .and_then(|link| link.rsplit('/').next())
        .expect("email contains no link")
        .to_owned()
}

pub fn email(raw: &str) -> Email {
    Email::parse(raw).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_owned())).unwrap()
}

pub fn new_user(raw_email: &str, username: &str, raw_password: &str) -> NewUser {
    NewUser {
        email: email(raw_email),
        username: Username::parse(username).unwrap(),
        password: password(raw_password),
    }
}
