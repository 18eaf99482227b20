//! Guest-info edit buffer: seeding from a booking, validation, and the
//! minimal set of changed fields to write back.

#[cfg(test)]
#[path = "guest_info_test.rs"]
mod guest_info_test;

use serde_json::{Map, Value};
use time::Date;
use time::macros::format_description;

use crate::net::types::Booking;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuestField {
    Name,
    Email,
    Phone,
    Count,
    CheckIn,
    CheckOut,
    Notes,
}

impl GuestField {
    pub const ALL: [Self; 7] =
        [Self::Name, Self::Email, Self::Phone, Self::Count, Self::CheckIn, Self::CheckOut, Self::Notes];

    /// Document field name.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "guestName",
            Self::Email => "guestEmail",
            Self::Phone => "guestPhone",
            Self::Count => "guestCount",
            Self::CheckIn => "checkIn",
            Self::CheckOut => "checkOut",
            Self::Notes => "notes",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Guest name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Count => "Number of guests",
            Self::CheckIn => "Check-in",
            Self::CheckOut => "Check-out",
            Self::Notes => "Notes",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: GuestField,
    pub message: String,
}

impl FieldError {
    fn new(field: GuestField, message: &str) -> Self {
        Self { field, message: message.to_owned() }
    }
}

/// String buffer behind the guest-info inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuestInfoForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub count: String,
    pub check_in: String,
    pub check_out: String,
    pub notes: String,
}

pub(crate) fn parse_day(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

impl GuestInfoForm {
    #[must_use]
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            name: booking.guest_name.clone(),
            email: booking.guest_email.clone().unwrap_or_default(),
            phone: booking.guest_phone.clone().unwrap_or_default(),
            count: if booking.guest_count > 0 { booking.guest_count.to_string() } else { String::new() },
            check_in: booking.check_in.clone().unwrap_or_default(),
            check_out: booking.check_out.clone().unwrap_or_default(),
            notes: booking.notes.clone().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn get(&self, field: GuestField) -> &str {
        match field {
            GuestField::Name => &self.name,
            GuestField::Email => &self.email,
            GuestField::Phone => &self.phone,
            GuestField::Count => &self.count,
            GuestField::CheckIn => &self.check_in,
            GuestField::CheckOut => &self.check_out,
            GuestField::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: GuestField, value: String) {
        let slot = match field {
            GuestField::Name => &mut self.name,
            GuestField::Email => &mut self.email,
            GuestField::Phone => &mut self.phone,
            GuestField::Count => &mut self.count,
            GuestField::CheckIn => &mut self.check_in,
            GuestField::CheckOut => &mut self.check_out,
            GuestField::Notes => &mut self.notes,
        };
        *slot = value;
    }

    /// All problems with the current buffer; empty means savable.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new(GuestField::Name, "Guest name is required"));
        }
        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            errors.push(FieldError::new(GuestField::Email, "Enter a valid email address"));
        }
        if !self.count.trim().is_empty() && !self.count.trim().parse::<u32>().is_ok_and(|n| n > 0) {
            errors.push(FieldError::new(GuestField::Count, "Number of guests must be a positive whole number"));
        }

        let check_in = self.check_in.trim();
        let check_out = self.check_out.trim();
        let in_day = parse_day(check_in);
        let out_day = parse_day(check_out);
        if !check_in.is_empty() && in_day.is_none() {
            errors.push(FieldError::new(GuestField::CheckIn, "Use the YYYY-MM-DD format"));
        }
        if !check_out.is_empty() && out_day.is_none() {
            errors.push(FieldError::new(GuestField::CheckOut, "Use the YYYY-MM-DD format"));
        }
        if let (Some(a), Some(b)) = (in_day, out_day)
            && b <= a
        {
            errors.push(FieldError::new(GuestField::CheckOut, "Check-out must be after check-in"));
        }
        errors
    }

    #[must_use]
    pub fn error_for(errors: &[FieldError], field: GuestField) -> Option<&str> {
        errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    /// Plain JSON value this buffer would store for `field`. Empty optional
    /// fields are written as null.
    fn value(&self, field: GuestField) -> Value {
        let raw = self.get(field).trim();
        match field {
            GuestField::Name => Value::String(raw.to_owned()),
            GuestField::Count => raw.parse::<i64>().map_or(Value::Null, Value::from),
            _ if raw.is_empty() => Value::Null,
            _ => Value::String(raw.to_owned()),
        }
    }

    /// Fields whose value differs from `original`, keyed by document field.
    #[must_use]
    pub fn changed_fields(&self, original: &Booking) -> Map<String, Value> {
        let baseline = Self::from_booking(original);
        GuestField::ALL
            .into_iter()
            .filter_map(|field| {
                let next = self.value(field);
                (next != baseline.value(field)).then(|| (field.key().to_owned(), next))
            })
            .collect()
    }

    /// Apply a successful save to the local read model.
    pub fn apply_to(&self, booking: &mut Booking) {
        let opt = |v: &str| {
            let v = v.trim();
            (!v.is_empty()).then(|| v.to_owned())
        };
        booking.guest_name = self.name.trim().to_owned();
        booking.guest_email = opt(&self.email);
        booking.guest_phone = opt(&self.phone);
        booking.guest_count = self.count.trim().parse().unwrap_or_default();
        booking.check_in = opt(&self.check_in);
        booking.check_out = opt(&self.check_out);
        booking.notes = opt(&self.notes);
    }
}

/// `local@domain.tld` shape check; the backend does real validation.
fn looks_like_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !raw.contains(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}
