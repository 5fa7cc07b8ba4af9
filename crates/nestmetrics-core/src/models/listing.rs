use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

pub const NEIGHBORHOODS: [&str; 5] = ["Manhattan", "Brooklyn", "Queens", "Bronx", "Staten Island"];

pub const ROOM_TYPES: [&str; 4] = ["Entire home/apt", "Private room", "Shared room", "Hotel room"];

/// Room types the booking and prediction forms offer
pub const BOOKABLE_ROOM_TYPES: [&str; 3] = ["Entire home/apt", "Private room", "Shared room"];

// Candidate column names, canonical key first. The backend's CSV has been
// exported with both spaced and underscored headers.
const ID_KEYS: &[&str] = &["id"];
const NAME_KEYS: &[&str] = &["NAME", "name"];
const HOST_KEYS: &[&str] = &["host name", "host_name"];
const NEIGHBOURHOOD_KEYS: &[&str] = &["neighbourhood group", "neighbourhood_group"];
const ROOM_TYPE_KEYS: &[&str] = &["room type", "room_type"];
const PRICE_KEYS: &[&str] = &["price_$", "price"];
const MIN_NIGHTS_KEYS: &[&str] = &["minimum nights", "minimum_nights"];
const AVAILABILITY_KEYS: &[&str] = &["availability 365", "availability_365"];
const REVIEWS_KEYS: &[&str] = &["number of reviews", "number_of_reviews"];

/// A single Airbnb listing row as served by `/api/listings`.
///
/// The record is read tolerantly: each field is looked up under all known
/// column spellings, numbers may be strings, and columns this type doesn't
/// model are carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Listing {
    pub id: i64,
    pub name: Option<String>,
    pub host_name: Option<String>,
    pub neighbourhood_group: Option<String>,
    pub room_type: Option<String>,
    pub price: Option<f64>,
    pub minimum_nights: Option<i64>,
    pub availability_365: Option<i64>,
    pub number_of_reviews: Option<i64>,
    pub extra: Map<String, Value>,
}

/// Editable subset of a listing, as filled in by the add/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub name: String,
    pub host_name: String,
    pub neighbourhood_group: String,
    pub room_type: String,
    pub price: f64,
    pub minimum_nights: i64,
    pub availability_365: i64,
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            host_name: String::new(),
            neighbourhood_group: String::new(),
            room_type: String::new(),
            price: 0.0,
            minimum_nights: 1,
            availability_365: 365,
        }
    }
}

impl ListingDraft {
    /// Prefill a draft from an existing listing for editing
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            name: listing.name.clone().unwrap_or_default(),
            host_name: listing.host_name.clone().unwrap_or_default(),
            neighbourhood_group: listing.neighbourhood_group.clone().unwrap_or_default(),
            room_type: listing.room_type.clone().unwrap_or_default(),
            price: listing.price.unwrap_or(0.0),
            minimum_nights: listing.minimum_nights.filter(|n| *n > 0).unwrap_or(1),
            availability_365: listing.availability_365.filter(|n| *n > 0).unwrap_or(365),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Accept ints, floats and numeric strings
pub(crate) fn value_as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.round() as i64))
        }
        _ => None,
    }
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Remove every candidate key from the record and return the first usable value
fn take_field<T>(
    record: &mut Map<String, Value>,
    keys: &[&str],
    convert: fn(&Value) -> Option<T>,
) -> Option<T> {
    let mut found = None;
    for key in keys {
        if let Some(value) = record.remove(*key) {
            if found.is_none() {
                found = convert(&value);
            }
        }
    }
    found
}

impl Listing {
    /// Build a listing from a raw JSON record. Returns `None` when the record
    /// has no usable id.
    pub fn from_record(mut record: Map<String, Value>) -> Option<Self> {
        let id = take_field(&mut record, ID_KEYS, value_as_i64)?;
        Some(Self {
            id,
            name: take_field(&mut record, NAME_KEYS, value_as_string),
            host_name: take_field(&mut record, HOST_KEYS, value_as_string),
            neighbourhood_group: take_field(&mut record, NEIGHBOURHOOD_KEYS, value_as_string),
            room_type: take_field(&mut record, ROOM_TYPE_KEYS, value_as_string),
            price: take_field(&mut record, PRICE_KEYS, value_as_f64),
            minimum_nights: take_field(&mut record, MIN_NIGHTS_KEYS, value_as_i64),
            availability_365: take_field(&mut record, AVAILABILITY_KEYS, value_as_i64),
            number_of_reviews: take_field(&mut record, REVIEWS_KEYS, value_as_i64),
            extra: record,
        })
    }

    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(record) => Self::from_record(record),
            _ => None,
        }
    }

    /// New locally created listing
    pub fn from_draft(id: i64, draft: &ListingDraft) -> Self {
        let mut listing = Self {
            id,
            number_of_reviews: Some(0),
            ..Self::default()
        };
        listing.apply_draft(draft);
        listing
    }

    /// Overwrite the editable fields, keeping id, review count and extra columns
    pub fn apply_draft(&mut self, draft: &ListingDraft) {
        self.name = non_empty(draft.name.trim());
        self.host_name = non_empty(draft.host_name.trim());
        self.neighbourhood_group = non_empty(&draft.neighbourhood_group);
        self.room_type = non_empty(&draft.room_type);
        self.price = Some(draft.price).filter(|p| p.is_finite());
        self.minimum_nights = Some(draft.minimum_nights);
        self.availability_365 = Some(draft.availability_365);
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed listing")
    }

    /// Serialize with the backend's canonical column names, then the extra columns
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert(ID_KEYS[0].to_string(), Value::from(self.id));
        let text_fields = [
            (NAME_KEYS[0], &self.name),
            (HOST_KEYS[0], &self.host_name),
            (NEIGHBOURHOOD_KEYS[0], &self.neighbourhood_group),
            (ROOM_TYPE_KEYS[0], &self.room_type),
        ];
        for (key, value) in text_fields {
            if let Some(v) = value {
                record.insert(key.to_string(), Value::from(v.clone()));
            }
        }
        if let Some(price) = self.price {
            record.insert(PRICE_KEYS[0].to_string(), Value::from(price));
        }
        let int_fields = [
            (MIN_NIGHTS_KEYS[0], self.minimum_nights),
            (AVAILABILITY_KEYS[0], self.availability_365),
            (REVIEWS_KEYS[0], self.number_of_reviews),
        ];
        for (key, value) in int_fields {
            if let Some(v) = value {
                record.insert(key.to_string(), Value::from(v));
            }
        }
        for (key, value) in &self.extra {
            record.entry(key.clone()).or_insert_with(|| value.clone());
        }
        record
    }
}

impl Serialize for Listing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Listing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_record(record).ok_or_else(|| de::Error::custom("listing has no usable id"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_spaced_columns() {
        let listing = Listing::from_value(json!({
            "id": 1001254,
            "NAME": "Clean & quiet apt home by the park",
            "host name": "Madaline",
            "neighbourhood group": "Brooklyn",
            "room type": "Private room",
            "price_$": 966,
            "minimum nights": 10.0,
            "availability 365": 286,
            "number of reviews": 9,
            "reviews per month": 0.21
        }))
        .unwrap();

        assert_eq!(listing.id, 1001254);
        assert_eq!(listing.display_name(), "Clean & quiet apt home by the park");
        assert_eq!(listing.host_name.as_deref(), Some("Madaline"));
        assert_eq!(listing.price, Some(966.0));
        assert_eq!(listing.minimum_nights, Some(10));
        assert_eq!(listing.extra.get("reviews per month"), Some(&json!(0.21)));
        assert_eq!(listing.extra.len(), 1);
    }

    #[test]
    fn test_reads_underscored_columns_and_numeric_strings() {
        let listing = Listing::from_value(json!({
            "id": "2",
            "name": "Demo Property",
            "price": "120.50",
            "neighbourhood_group": "Brooklyn",
            "room_type": "Private room"
        }))
        .unwrap();

        assert_eq!(listing.id, 2);
        assert_eq!(listing.name.as_deref(), Some("Demo Property"));
        assert_eq!(listing.price, Some(120.5));
        assert_eq!(listing.neighbourhood_group.as_deref(), Some("Brooklyn"));
        assert!(listing.extra.is_empty());
    }

    #[test]
    fn test_canonical_key_wins() {
        let listing = Listing::from_value(json!({"id": 1, "NAME": "canonical", "name": "alias"})).unwrap();
        assert_eq!(listing.name.as_deref(), Some("canonical"));
        assert!(listing.extra.is_empty());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(Listing::from_value(json!({"NAME": "No id"})).is_none());
        assert!(Listing::from_value(json!({"id": null, "NAME": "Null id"})).is_none());
        assert!(serde_json::from_value::<Listing>(json!({"NAME": "x"})).is_err());
    }

    #[test]
    fn test_serializes_canonical_keys() {
        let listing = Listing::from_value(json!({"id": 7, "name": "Loft", "price": 99, "lat": 40.7})).unwrap();
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["NAME"], json!("Loft"));
        assert_eq!(value["price_$"], json!(99.0));
        assert_eq!(value["lat"], json!(40.7));
        assert!(value.get("name").is_none());

        let back: Listing = serde_json::from_value(value).unwrap();
        assert_eq!(back, listing);
    }

    #[test]
    fn test_from_draft_and_apply_draft() {
        let draft = ListingDraft {
            name: "  Sunny loft ".to_string(),
            host_name: "Ana".to_string(),
            neighbourhood_group: "Queens".to_string(),
            room_type: "Hotel room".to_string(),
            price: 130.0,
            ..ListingDraft::default()
        };
        let mut listing = Listing::from_draft(42, &draft);
        assert_eq!(listing.id, 42);
        assert_eq!(listing.name.as_deref(), Some("Sunny loft"));
        assert_eq!(listing.number_of_reviews, Some(0));
        assert_eq!(listing.minimum_nights, Some(1));
        assert_eq!(listing.availability_365, Some(365));

        listing.extra.insert("lat".to_string(), json!(40.7));
        let edit = ListingDraft {
            price: 150.0,
            ..ListingDraft::from_listing(&listing)
        };
        listing.apply_draft(&edit);
        assert_eq!(listing.price, Some(150.0));
        assert_eq!(listing.number_of_reviews, Some(0));
        assert_eq!(listing.extra.get("lat"), Some(&json!(40.7)));
    }
}
