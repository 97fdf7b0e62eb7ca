use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingDetails {
    pub origin_city: Option<String>,
    pub destination_city: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub budget: Option<String>,
}

impl BookingDetails {
    pub fn slot(&self, field: BookingField) -> Option<&str> {
        match field {
            BookingField::OriginCity => self.origin_city.as_deref(),
            BookingField::DestinationCity => self.destination_city.as_deref(),
            BookingField::DepartureDate => self.departure_date.as_deref(),
            BookingField::ReturnDate => self.return_date.as_deref(),
            BookingField::Budget => self.budget.as_deref(),
        }
    }

    pub fn slot_mut(&mut self, field: BookingField) -> &mut Option<String> {
        match field {
            BookingField::OriginCity => &mut self.origin_city,
            BookingField::DestinationCity => &mut self.destination_city,
            BookingField::DepartureDate => &mut self.departure_date,
            BookingField::ReturnDate => &mut self.return_date,
            BookingField::Budget => &mut self.budget,
        }
    }

    pub fn is_complete(&self) -> bool {
        BookingField::ALL.iter().all(|f| self.slot(*f).is_some())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    OriginCity,
    DestinationCity,
    DepartureDate,
    ReturnDate,
    Budget,
}

impl BookingField {
    pub const ALL: [BookingField; 5] = [
        BookingField::OriginCity,
        BookingField::DestinationCity,
        BookingField::DepartureDate,
        BookingField::ReturnDate,
        BookingField::Budget,
    ];

    /// Entity name the recognizer model uses for this field.
    pub fn entity_name(&self) -> &'static str {
        match self {
            BookingField::OriginCity => "or_city",
            BookingField::DestinationCity => "dst_city",
            BookingField::DepartureDate => "str_date",
            BookingField::ReturnDate => "end_date",
            BookingField::Budget => "budget",
        }
    }
}

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("paris"), "Paris");
        assert_eq!(capitalize("NEW YORK"), "New york");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_slot_mut_writes_matching_field() {
        let mut details = BookingDetails::default();
        *details.slot_mut(BookingField::ReturnDate) = Some("2023-01-17".to_string());
        assert_eq!(details.return_date.as_deref(), Some("2023-01-17"));
        assert_eq!(details.slot(BookingField::DepartureDate), None);
        assert!(!details.is_complete());
    }
}
