use serde::{Deserialize, Serialize};
use validator::Validate;

use si_core::domain::entities::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUserDto {
    /// Display name
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Contact email, unique across users (exact match)
    #[validate(email, length(max = 320))]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(email, length(max = 320))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
