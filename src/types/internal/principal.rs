use crate::types::db::{clinic, user};

/// An authenticated identity: either a patient account or a clinic account.
///
/// The two kinds share one login surface, so code that resolves an email or
/// a token subject works with this union and matches exhaustively instead of
/// juggling two parallel optionals.
#[derive(Clone, Debug)]
pub enum Principal {
    User(user::Model),
    Clinic(clinic::Model),
}

impl Principal {
    pub fn id(&self) -> &str {
        match self {
            Principal::User(u) => &u.id,
            Principal::Clinic(c) => &c.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Principal::User(u) => &u.email,
            Principal::Clinic(c) => &c.email,
        }
    }

    /// Clinic principals administer their own bookings
    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::Clinic(_))
    }

    /// Stored credential material: an Argon2id hash for users, a hash or a
    /// legacy plaintext value for clinics.
    pub fn stored_credential(&self) -> &str {
        match self {
            Principal::User(u) => &u.password_hash,
            Principal::Clinic(c) => &c.password,
        }
    }
}
