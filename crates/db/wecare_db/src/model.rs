use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use vitals::ReadingKind;

#[derive(Debug, Clone, Serialize, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
	pub id: i64,
	pub firstname: Option<String>,
	pub lastname: Option<String>,
	pub email: String,
	#[serde(skip_serializing)]
	pub password_hash: String,
	pub rank_id: i64,
	pub number: String,
	pub number_verified: bool,
	pub referral_code: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
	#[serde(skip_serializing)]
	pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
	pub email: String,
	pub password_hash: String,
	pub number: String,
	pub firstname: Option<String>,
	pub lastname: Option<String>,
	pub referral_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Rank {
	pub id: i64,
	pub level: i64,
	pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthAction {
	Signup,
	VerifyNumber,
}

impl AuthAction {
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Signup => "SIGNUP",
			Self::VerifyNumber => "VERIFY_NUMBER",
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct AuthActivity {
	pub id: i64,
	pub user_id: i64,
	pub action: String,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Contact {
	pub id: i64,
	pub user_id: i64,
	pub name: String,
	pub number: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactFields {
	pub name: String,
	pub number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct GuardianSettings {
	pub id: i64,
	pub user_id: i64,
	pub notify_self: bool,
	pub notify_wecare: bool,
	pub heart_min: i64,
	pub heart_max: i64,
	pub breath_min: i64,
	pub breath_max: i64,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianUpdate {
	pub notify_self: bool,
	pub notify_wecare: bool,
	pub heart_min: i64,
	pub heart_max: i64,
	pub breath_min: i64,
	pub breath_max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreachDirection {
	Below,
	Above,
}

/// A reading that fell outside the user's Guardian thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breach {
	#[serde(rename = "type")]
	pub kind: ReadingKind,
	pub value: i64,
	pub min: i64,
	pub max: i64,
	pub direction: BreachDirection,
	pub notify_self: bool,
	pub notify_wecare: bool,
}

impl GuardianSettings {
	#[must_use]
	pub const fn bounds(&self, kind: ReadingKind) -> (i64, i64) {
		match kind {
			ReadingKind::Heart => (self.heart_min, self.heart_max),
			ReadingKind::Breath => (self.breath_min, self.breath_max),
		}
	}

	#[must_use]
	pub const fn breach(&self, kind: ReadingKind, value: i64) -> Option<Breach> {
		let (min, max) = self.bounds(kind);
		let direction = if value < min {
			BreachDirection::Below
		} else if value > max {
			BreachDirection::Above
		} else {
			return None;
		};

		Some(Breach {
			kind,
			value,
			min,
			max,
			direction,
			notify_self: self.notify_self,
			notify_wecare: self.notify_wecare,
		})
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedReading {
	pub id: i64,
	pub user_id: i64,
	#[serde(rename = "type")]
	pub kind: ReadingKind,
	pub value: i64,
	pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
	Unused,
	Credited,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Referral {
	pub id: i64,
	/// The referring user.
	pub user_id: i64,
	pub new_user_id: i64,
	pub credit_applied_at: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
}

impl Referral {
	#[must_use]
	pub const fn status(&self) -> ReferralStatus {
		if self.credit_applied_at.is_some() {
			ReferralStatus::Credited
		} else {
			ReferralStatus::Unused
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OnboardingAction {
	Through,
	Skip,
}

impl OnboardingAction {
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Through => "THROUGH",
			Self::Skip => "SKIP",
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Onboarding {
	pub id: i64,
	pub user_id: i64,
	pub action: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct VerificationCode {
	pub id: i64,
	pub number: String,
	pub code: String,
	pub purpose: Option<String>,
	/// Wrong guesses made against this code.
	pub attempts: i64,
	pub created_at: DateTime<Utc>,
	pub deleted_at: Option<DateTime<Utc>>,
}
