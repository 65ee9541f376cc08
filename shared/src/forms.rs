//! Client forms
//!
//! Raw form state as entered by the user, validated into the request the
//! backend expects. A form that fails validation never produces a request.

use chrono::{FixedOffset, NaiveDate};
use rust_decimal::Decimal;

use crate::client::{SignInRequest, SignUpRequest};
use crate::models::ReservationCreate;
use crate::pricing::total_amount;
use crate::schedule::{ScheduleError, TimeSlot, combine_local, combine_with_offset};
use crate::validation::{
    ErrorKind, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PASSWORD_LEN, MIN_PARTY_SIZE, ValidationErrors,
    check_email, check_optional_text, check_required_text,
};

// =============================================================================
// Auth forms
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<SignInRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, "email", &self.email);
        check_required_text(&mut errors, "password", &self.password, MAX_PASSWORD_LEN);
        errors.into_result()?;

        Ok(SignInRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Besides the per-control rules, a `confirmPassword` that differs from
    /// `password` is reported on `confirmPassword` and blocks submission.
    pub fn validate(&self) -> Result<SignUpRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required_text(&mut errors, "firstName", &self.first_name, MAX_NAME_LEN);
        check_required_text(&mut errors, "lastName", &self.last_name, MAX_NAME_LEN);
        check_email(&mut errors, "email", &self.email);
        check_required_text(&mut errors, "password", &self.password, MAX_PASSWORD_LEN);
        check_required_text(
            &mut errors,
            "confirmPassword",
            &self.confirm_password,
            MAX_PASSWORD_LEN,
        );
        if self.password != self.confirm_password {
            errors.add(
                "confirmPassword",
                ErrorKind::PasswordMismatch,
                "passwords do not match",
            );
        }
        errors.into_result()?;

        Ok(SignUpRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

// =============================================================================
// Reservation form
// =============================================================================

/// Reservation form state
///
/// `time` holds the raw slot text so an unknown slot is reported as a
/// control error rather than rejected at parse time.
#[derive(Debug, Clone)]
pub struct ReservationForm {
    pub restaurant_id: i64,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub number_of_people: Option<u32>,
    pub additional_info: Option<String>,
}

impl ReservationForm {
    /// Empty form for `restaurant_id`, party size preset to one guest
    pub fn new(restaurant_id: i64) -> Self {
        Self {
            restaurant_id,
            date: None,
            time: None,
            number_of_people: Some(MIN_PARTY_SIZE),
            additional_info: None,
        }
    }

    pub fn set_number_of_people(&mut self, number_of_people: u32) {
        self.number_of_people = Some(number_of_people);
    }

    /// Displayed total for the current party size
    pub fn total_amount(&self, price_per_person: Decimal) -> Option<Decimal> {
        self.number_of_people
            .map(|size| total_amount(size, price_per_person))
    }

    /// Date and time are required, the time must be an available slot, the
    /// party size at least [`MIN_PARTY_SIZE`], and the date not before
    /// `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<ValidReservation, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match self.date {
            None => errors.add("reservationDate", ErrorKind::Required, "must not be empty"),
            Some(date) if date < today => errors.add(
                "reservationDate",
                ErrorKind::PastDate,
                format!("{date} is in the past"),
            ),
            Some(_) => {}
        }

        let slot = match self.time.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("reservationTime", ErrorKind::Required, "must not be empty");
                None
            }
            Some(raw) => match raw.parse::<TimeSlot>() {
                Ok(slot) => Some(slot),
                Err(e) => {
                    errors.add("reservationTime", ErrorKind::UnavailableTime, e.to_string());
                    None
                }
            },
        };

        match self.number_of_people {
            None => errors.add("numberOfPeople", ErrorKind::Required, "must not be empty"),
            Some(n) if n < MIN_PARTY_SIZE => errors.add(
                "numberOfPeople",
                ErrorKind::Min,
                format!("must be at least {MIN_PARTY_SIZE}"),
            ),
            Some(_) => {}
        }

        let note = self
            .additional_info
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        check_optional_text(&mut errors, "additionalInfo", note, MAX_NOTE_LEN);

        errors.into_result()?;

        match (self.date, slot, self.number_of_people) {
            (Some(date), Some(slot), Some(party_size)) => Ok(ValidReservation {
                restaurant_id: self.restaurant_id,
                date,
                slot,
                party_size,
                additional_info: note.map(str::to_string),
            }),
            // Every missing control recorded an error above.
            _ => Err(ValidationErrors::new()),
        }
    }
}

/// A reservation form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReservation {
    pub restaurant_id: i64,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub party_size: u32,
    pub additional_info: Option<String>,
}

impl ValidReservation {
    /// Request body, with the instant built in a zone `offset` from UTC
    pub fn into_request(self, offset: FixedOffset) -> ReservationCreate {
        ReservationCreate {
            restaurant_id: self.restaurant_id,
            reservation_date: combine_with_offset(self.date, self.slot, offset),
            number_of_people: self.party_size,
            additional_info: self.additional_info,
        }
    }

    /// Request body, with the instant built in the host's time zone
    pub fn into_local_request(self) -> Result<ReservationCreate, ScheduleError> {
        let reservation_date = combine_local(self.date, self.slot)?;
        Ok(ReservationCreate {
            restaurant_id: self.restaurant_id,
            reservation_date,
            number_of_people: self.party_size,
            additional_info: self.additional_info,
        })
    }
}
