use serde::{Deserialize, Serialize};

/// A user to be created by the seeder. The password is already hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
}
