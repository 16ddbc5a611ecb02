pub mod subscription;
pub mod user;

pub use subscription::PostgresSubscriptionRepository;
pub use user::PostgresUserRepository;
