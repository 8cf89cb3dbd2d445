//! Request and response DTOs.
//!
//! DTOs carry declarative `validator` rules; handlers call [`check`] before
//! touching the services, so a malformed body never reaches the domain.

pub mod booking_dto;
pub mod item_dto;
pub mod request_dto;
pub mod user_dto;

pub use booking_dto::{BookingDto, NewBookingDto};
pub use item_dto::{CommentDto, ItemDetailsDto, ItemDto, NewCommentDto, NewItemDto, UpdateItemDto};
pub use request_dto::{NewRequestDto, RequestDto};
pub use user_dto::{NewUserDto, UpdateUserDto, UserDto};

use validator::Validate;

use crate::handlers::ApiError;
use si_core::errors::DomainError;

/// Run the DTO's declarative rules, folding the first violation into a
/// validation error.
pub fn check(dto: &impl Validate) -> Result<(), ApiError> {
    if let Err(errors) = dto.validate() {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(field, violations)| {
                violations.iter().map(move |violation| {
                    match &violation.message {
                        Some(message) => format!("{field}: {message}"),
                        None => format!("{field}: {}", violation.code),
                    }
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request body".to_string());
        return Err(ApiError(DomainError::validation(message)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reports_first_violation() {
        let dto = NewUserDto {
            name: String::new(),
            email: "not-an-email".into(),
        };
        let error = check(&dto).unwrap_err();
        assert!(matches!(error.0, DomainError::Validation { .. }));
    }

    #[test]
    fn test_check_passes_valid_dto() {
        let dto = NewUserDto {
            name: "Alice".into(),
            email: "alice@example.com".into(),
        };
        assert!(check(&dto).is_ok());
    }
}
