//! Listing filters for the listings page.

use crate::models::{Listing, NEIGHBORHOODS, ROOM_TYPES};
use crate::utils::contains_ignore_case;

/// Current filter state. Criteria are AND-combined; an unset criterion
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub neighborhood: Option<String>,
    pub room_type: Option<String>,
    pub search: String,
}

/// Step `current` through `None` ("All") and then each choice in turn
fn cycle(current: &Option<String>, choices: &[&str]) -> Option<String> {
    let next_index = match current {
        None => 0,
        Some(value) => match choices.iter().position(|c| *c == value.as_str()) {
            Some(i) => i + 1,
            None => 0,
        },
    };
    choices.get(next_index).map(|c| c.to_string())
}

impl ListingFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(ref neighborhood) = self.neighborhood {
            if listing.neighbourhood_group.as_ref() != Some(neighborhood) {
                return false;
            }
        }
        if let Some(ref room_type) = self.room_type {
            if listing.room_type.as_ref() != Some(room_type) {
                return false;
            }
        }
        let search = self.search.as_str();
        if !search.is_empty() {
            let in_name = listing
                .name
                .as_deref()
                .is_some_and(|n| contains_ignore_case(n, search));
            let in_host = listing
                .host_name
                .as_deref()
                .is_some_and(|h| contains_ignore_case(h, search));
            if !in_name && !in_host {
                return false;
            }
        }
        true
    }

    /// Matching listings in input order
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }

    pub fn is_active(&self) -> bool {
        self.neighborhood.is_some() || self.room_type.is_some() || !self.search.is_empty()
    }

    pub fn cycle_neighborhood(&mut self) {
        self.neighborhood = cycle(&self.neighborhood, &NEIGHBORHOODS);
    }

    pub fn cycle_room_type(&mut self) {
        self.room_type = cycle(&self.room_type, &ROOM_TYPES);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// One-line summary for the filter bar
    pub fn describe(&self) -> String {
        format!(
            "Area: {} | Type: {} | Search: {}",
            self.neighborhood.as_deref().unwrap_or("All"),
            self.room_type.as_deref().unwrap_or("All"),
            if self.search.is_empty() { "-" } else { self.search.as_str() }
        )
    }
}
