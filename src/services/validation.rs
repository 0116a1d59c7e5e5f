//! validation.rs
//!
//! Проверка заявки на бронирование перед тем, как она попадёт в реестр.
//! Правила проверяются строго по порядку: имя, email, количество билетов.
//! Срабатывает первое нарушенное правило. Состояние не меняется, остаток
//! билетов передаётся вызывающей стороной по значению.

use validator::{Validate, ValidationErrors};

use crate::models::BookingRequest;

/// Причина отказа в бронировании.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid name: first and last names must have at least 2 characters")]
    InvalidName,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("invalid ticket number: must be between 1 and {remaining}")]
    InvalidTicketCount { remaining: u32 },
}

// Всё, что нужно правилам: заявка, ошибки derive-валидации и текущий остаток
struct Candidate<'a> {
    request: &'a BookingRequest,
    field_errors: Option<ValidationErrors>,
    remaining: u32,
}

impl Candidate<'_> {
    fn field_failed(&self, field: &str) -> bool {
        self.field_errors
            .as_ref()
            .is_some_and(|errors| errors.field_errors().contains_key(field))
    }
}

type Rule = fn(&Candidate<'_>) -> Result<(), ValidationError>;

const RULES: [(&str, Rule); 3] = [
    ("name", check_name),
    ("email", check_email),
    ("ticket_count", check_ticket_count),
];

// Длина в байтах, а не в символах: "É" считается двумя
fn check_name(candidate: &Candidate<'_>) -> Result<(), ValidationError> {
    let request = candidate.request;
    if request.first_name.len() < 2 || request.last_name.len() < 2 {
        return Err(ValidationError::InvalidName);
    }
    Ok(())
}

fn check_email(candidate: &Candidate<'_>) -> Result<(), ValidationError> {
    if candidate.field_failed("email") {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn check_ticket_count(candidate: &Candidate<'_>) -> Result<(), ValidationError> {
    let tickets = candidate.request.ticket_count;
    if tickets == 0 || tickets > candidate.remaining {
        return Err(ValidationError::InvalidTicketCount {
            remaining: candidate.remaining,
        });
    }
    Ok(())
}

/// Проверяет заявку против текущего остатка билетов.
pub fn validate_booking(request: &BookingRequest, remaining: u32) -> Result<(), ValidationError> {
    let candidate = Candidate {
        request,
        field_errors: request.validate().err(),
        remaining,
    };

    for (name, rule) in RULES {
        if let Err(e) = rule(&candidate) {
            tracing::debug!(rule = name, error = %e, "booking request rejected");
            return Err(e);
        }
    }

    Ok(())
}
