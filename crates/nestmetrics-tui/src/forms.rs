//! Editable forms for the tabs that post to the backend.
//!
//! A form is an ordered list of fields with one focused field. Choice fields
//! cycle through a fixed option list with ←/→, number and text fields take
//! typed characters.

use anyhow::{anyhow, Result};

use nestmetrics_core::models::{
    BookingForm, BookingScoreRequest, DealRequest, Listing, ListingDraft, MlPredictRequest,
    BOOKABLE_ROOM_TYPES, NEIGHBORHOODS, ROOM_TYPES,
};
use nestmetrics_core::utils::format_amount;

/// Longest value a text field accepts
const MAX_TEXT_LEN: usize = 80;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Choice {
        options: &'static [&'static str],
        index: usize,
    },
    Number(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub fn choice(label: &'static str, options: &'static [&'static str], selected: &str) -> Self {
        let index = options.iter().position(|o| *o == selected).unwrap_or(0);
        Self {
            label,
            kind: FieldKind::Choice { options, index },
        }
    }

    pub fn number(label: &'static str, value: f64) -> Self {
        Self {
            label,
            kind: FieldKind::Number(format_amount(value)),
        }
    }

    pub fn text(label: &'static str, value: &str) -> Self {
        Self {
            label,
            kind: FieldKind::Text(value.to_string()),
        }
    }

    /// Current value as displayed
    pub fn display(&self) -> &str {
        match &self.kind {
            FieldKind::Choice { options, index } => options.get(*index).copied().unwrap_or(""),
            FieldKind::Number(buffer) | FieldKind::Text(buffer) => buffer,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Step the focused choice field forward or backward, wrapping around.
    /// Returns false when the focused field is not a choice.
    pub fn cycle(&mut self, forward: bool) -> bool {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return false;
        };
        match &mut field.kind {
            FieldKind::Choice { options, index } => {
                let len = options.len();
                if len > 0 {
                    *index = if forward { (*index + 1) % len } else { (*index + len - 1) % len };
                }
                true
            }
            _ => false,
        }
    }

    /// Type a character into the focused field. Number fields only accept
    /// digits and a single decimal point.
    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        match &mut field.kind {
            FieldKind::Number(buffer) => {
                let ok = c.is_ascii_digit() || (c == '.' && !buffer.contains('.'));
                if ok && buffer.len() < 12 {
                    buffer.push(c);
                }
            }
            FieldKind::Text(buffer) => {
                if !c.is_control() && buffer.chars().count() < MAX_TEXT_LEN {
                    buffer.push(c);
                }
            }
            FieldKind::Choice { .. } => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if let FieldKind::Number(buffer) | FieldKind::Text(buffer) = &mut field.kind {
                buffer.pop();
            }
        }
    }

    fn field(&self, label: &str) -> Result<&Field> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .ok_or_else(|| anyhow!("Unknown field: {}", label))
    }

    pub fn text(&self, label: &str) -> Result<String> {
        Ok(self.field(label)?.display().to_string())
    }

    pub fn number(&self, label: &str) -> Result<f64> {
        let raw = self.field(label)?.display().trim();
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| anyhow!("{} must be a number", label))
    }

    /// Whole number of at least 1
    pub fn count(&self, label: &str) -> Result<u32> {
        let value = self.number(label)?;
        if value < 1.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return Err(anyhow!("{} must be a whole number of at least 1", label));
        }
        Ok(value as u32)
    }
}

// ============================================================================
// Per-tab forms
// ============================================================================

pub fn deal_form() -> Form {
    let defaults = DealRequest::default();
    Form::new(vec![
        Field::choice("Room type", &BOOKABLE_ROOM_TYPES, &defaults.room_type),
        Field::choice("Neighborhood", &NEIGHBORHOODS, &defaults.neighborhood),
        Field::number("Guests", f64::from(defaults.guests)),
        Field::number("Max budget", defaults.max_budget),
    ])
}

pub fn deal_request(form: &Form) -> Result<DealRequest> {
    Ok(DealRequest {
        room_type: form.text("Room type")?,
        neighborhood: form.text("Neighborhood")?,
        guests: form.count("Guests")?,
        max_budget: form.number("Max budget")?,
    })
}

pub fn booking_form() -> Form {
    let defaults = BookingForm::default();
    Form::new(vec![
        Field::number("Price", defaults.price),
        Field::choice("Neighborhood", &NEIGHBORHOODS, &defaults.neighborhood),
        Field::text("Listing ID", &defaults.listing_id),
        Field::number("Guests", f64::from(defaults.guests)),
        Field::number("Nights", f64::from(defaults.trip_length)),
    ])
}

pub fn booking_values(form: &Form) -> Result<BookingForm> {
    Ok(BookingForm {
        price: form.number("Price")?,
        neighborhood: form.text("Neighborhood")?,
        listing_id: form.text("Listing ID")?,
        guests: form.count("Guests")?,
        trip_length: form.count("Nights")?,
    })
}

/// Quick check on the Hosts tab: price and area only
pub fn quick_score_form() -> Form {
    let defaults = BookingForm::default();
    Form::new(vec![
        Field::number("Price", defaults.price),
        Field::choice("Neighborhood", &NEIGHBORHOODS, &defaults.neighborhood),
    ])
}

pub fn quick_score_request(form: &Form) -> Result<BookingScoreRequest> {
    Ok(BookingScoreRequest {
        price: form.number("Price")?,
        neighborhood: form.text("Neighborhood")?,
        listing_id: None,
    })
}

pub fn travel_form() -> Form {
    Form::new(vec![
        Field::choice("Neighborhood", &NEIGHBORHOODS, "Manhattan"),
        Field::number("Budget", 200.0),
    ])
}

pub fn travel_params(form: &Form) -> Result<(String, f64)> {
    Ok((form.text("Neighborhood")?, form.number("Budget")?))
}

pub fn predict_form() -> Form {
    let defaults = MlPredictRequest::default();
    Form::new(vec![
        Field::choice("Room type", &BOOKABLE_ROOM_TYPES, &defaults.room_type),
        Field::choice("Neighbourhood", &NEIGHBORHOODS, &defaults.neighbourhood_group),
        Field::number("Min nights", f64::from(defaults.minimum_nights)),
        Field::number("Availability", f64::from(defaults.availability_365)),
        Field::number("Host listings", f64::from(defaults.host_listings)),
    ])
}

pub fn predict_request(form: &Form) -> Result<MlPredictRequest> {
    let availability = form.number("Availability")?;
    if !(0.0..=365.0).contains(&availability) || availability.fract() != 0.0 {
        return Err(anyhow!("Availability must be a whole number from 0 to 365"));
    }
    Ok(MlPredictRequest {
        room_type: form.text("Room type")?,
        neighbourhood_group: form.text("Neighbourhood")?,
        minimum_nights: form.count("Min nights")?,
        availability_365: availability as u32,
        host_listings: form.count("Host listings")?,
    })
}

/// Add form when `listing` is None, otherwise prefilled for editing
pub fn listing_form(listing: Option<&Listing>) -> Form {
    let draft = listing.map(ListingDraft::from_listing).unwrap_or_default();
    Form::new(vec![
        Field::text("Name", &draft.name),
        Field::text("Host", &draft.host_name),
        Field::choice("Neighborhood", &NEIGHBORHOODS, &draft.neighbourhood_group),
        Field::choice("Room type", &ROOM_TYPES, &draft.room_type),
        Field::number("Price", draft.price),
        Field::number("Min nights", draft.minimum_nights as f64),
        Field::number("Availability", draft.availability_365 as f64),
    ])
}

pub fn listing_draft(form: &Form) -> Result<ListingDraft> {
    let name = form.text("Name")?;
    if name.trim().is_empty() {
        return Err(anyhow!("Name is required"));
    }
    let availability = form.number("Availability")?;
    if !(0.0..=365.0).contains(&availability) {
        return Err(anyhow!("Availability must be between 0 and 365"));
    }
    Ok(ListingDraft {
        name,
        host_name: form.text("Host")?,
        neighbourhood_group: form.text("Neighborhood")?,
        room_type: form.text("Room type")?,
        price: form.number("Price")?,
        minimum_nights: i64::from(form.count("Min nights")?),
        availability_365: availability.round() as i64,
    })
}
