pub mod contacts;
pub mod guardians;
pub mod health;
pub mod onboarding;
pub mod readings;
pub mod referrals;
pub mod root;
pub mod users;
pub mod verification;
