pub mod activity;
pub mod contacts;
pub mod guardians;
pub mod onboarding;
pub mod readings;
pub mod referrals;
pub mod users;
pub mod verification;

pub use activity::ActivityRepository;
pub use contacts::ContactRepository;
pub use guardians::GuardianRepository;
pub use onboarding::OnboardingRepository;
pub use readings::{fetch_month, ReadingRepository, ReadingSource};
pub use referrals::ReferralRepository;
pub use users::UserRepository;
pub use verification::VerificationRepository;
