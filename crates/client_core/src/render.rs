//! Pure view descriptions built from fetched properties and the page state.
//!
//! Nothing here performs I/O; a front end decides how to draw the result. Every
//! view implements `Display` as the plain-text rendering used by the console.

use std::fmt;

use shared::domain::{Property, PropertyId, PropertyInput};

use crate::controller::PageState;

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCard {
    pub id: PropertyId,
    pub address: String,
    pub price: String,
    pub size: String,
    pub description: String,
}

impl From<&Property> for PropertyCard {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id,
            address: property.address.clone(),
            price: format_price(property.price),
            size: format_size(property.size),
            description: property.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Empty {
        prev_enabled: bool,
        next_enabled: bool,
    },
    Page {
        cards: Vec<PropertyCard>,
        /// 1-based index of the page on screen.
        showing: u32,
        total_pages: u32,
        total_elements: u64,
        prev_enabled: bool,
        next_enabled: bool,
    },
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    pub fn prev_enabled(&self) -> bool {
        match self {
            Self::Empty { prev_enabled, .. } | Self::Page { prev_enabled, .. } => *prev_enabled,
        }
    }

    pub fn next_enabled(&self) -> bool {
        match self {
            Self::Empty { next_enabled, .. } | Self::Page { next_enabled, .. } => *next_enabled,
        }
    }

    pub fn cards(&self) -> &[PropertyCard] {
        match self {
            Self::Empty { .. } => &[],
            Self::Page { cards, .. } => cards,
        }
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::Empty {
            prev_enabled: false,
            next_enabled: false,
        }
    }
}

pub fn render_list(properties: &[Property], state: &PageState) -> ListView {
    let prev_enabled = state.can_go_prev();
    let next_enabled = state.can_go_next();

    if properties.is_empty() {
        return ListView::Empty {
            prev_enabled,
            next_enabled,
        };
    }

    ListView::Page {
        cards: properties.iter().map(PropertyCard::from).collect(),
        showing: state.current_page + 1,
        total_pages: state.total_pages,
        total_elements: state.total_elements,
        prev_enabled,
        next_enabled,
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { .. } => {
                writeln!(f, "No properties found.")?;
            }
            Self::Page {
                cards,
                showing,
                total_pages,
                total_elements,
                ..
            } => {
                writeln!(f, "{} properties found", format_count(*total_elements))?;
                for card in cards {
                    write!(f, "{card}")?;
                }
                writeln!(
                    f,
                    "Page {} of {}",
                    format_count(u64::from(*showing)),
                    format_count(u64::from(*total_pages))
                )?;
            }
        }
        writeln!(
            f,
            "[prev: {}] [next: {}]",
            enabled_label(self.prev_enabled()),
            enabled_label(self.next_enabled())
        )
    }
}

impl fmt::Display for PropertyCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  #{} {}", self.id, self.address)?;
        writeln!(f, "     Price: {}  Size: {}", self.price, self.size)?;
        if !self.description.is_empty() {
            writeln!(f, "     {}", self.description)?;
        }
        Ok(())
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Read-only detail surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: PropertyId,
    pub address: String,
    pub price: String,
    pub size: String,
    pub description: String,
}

pub fn render_detail(property: &Property) -> DetailView {
    DetailView {
        id: property.id,
        address: property.address.clone(),
        price: format_price(property.price),
        size: format_size(property.size),
        description: property.description.clone(),
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Property #{}", self.id)?;
        writeln!(f, "  Address:     {}", self.address)?;
        writeln!(f, "  Price:       {}", self.price)?;
        writeln!(f, "  Size:        {}", self.size)?;
        writeln!(f, "  Description: {}", self.description)
    }
}

/// Text fields of the edit surface, pre-filled from a fetched property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub id: PropertyId,
    pub address: String,
    pub price: String,
    pub size: String,
    pub description: String,
}

impl From<&Property> for EditForm {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id,
            address: property.address.clone(),
            price: property.price.to_string(),
            size: property.size.to_string(),
            description: property.description.clone(),
        }
    }
}

impl EditForm {
    pub fn to_input(&self) -> PropertyInput {
        PropertyInput::from_form(&self.address, &self.price, &self.size, &self.description)
            .with_id(self.id)
    }
}

impl fmt::Display for EditForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Editing property #{}", self.id)?;
        writeln!(f, "  address:     {}", self.address)?;
        writeln!(f, "  price:       {}", self.price)?;
        writeln!(f, "  size:        {}", self.size)?;
        writeln!(f, "  description: {}", self.description)
    }
}

pub fn format_price(price: f64) -> String {
    format!("${}", format_number(price))
}

pub fn format_size(size: f64) -> String {
    format!("{} mt2", format_number(size))
}

fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

/// Locale-style number: thousands separators and at most three fraction digits.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(id: i64, address: &str) -> Property {
        Property {
            id: PropertyId(id),
            address: address.to_string(),
            price: 250000.0,
            size: 120.5,
            description: "Two bedrooms".to_string(),
        }
    }

    #[test]
    fn formats_numbers_like_locale_strings() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.891), "1,234,567.891");
        assert_eq!(format_number(12.34567), "12.346");
        assert_eq!(format_number(-4500.5), "-4,500.5");
        assert_eq!(format_price(250000.0), "$250,000");
        assert_eq!(format_size(80.0), "80 mt2");
    }

    #[test]
    fn empty_state_when_no_items() {
        let state = PageState::default();
        let view = render_list(&[], &state);
        assert!(view.is_empty());
        assert!(!view.prev_enabled());
        assert!(!view.next_enabled());
        assert!(view.to_string().contains("No properties found."));
    }

    #[test]
    fn page_view_shows_one_based_indicator_and_totals() {
        let state = PageState {
            current_page: 1,
            total_pages: 3,
            total_elements: 5,
            ..PageState::default()
        };
        let view = render_list(&[property(3, "Calle 3"), property(4, "Calle 4")], &state);

        match &view {
            ListView::Page {
                cards,
                showing,
                total_pages,
                total_elements,
                prev_enabled,
                next_enabled,
            } => {
                assert_eq!(cards.len(), 2);
                assert_eq!(cards[0].price, "$250,000");
                assert_eq!(cards[1].size, "120.5 mt2");
                assert_eq!(*showing, 2);
                assert_eq!(*total_pages, 3);
                assert_eq!(*total_elements, 5);
                assert!(*prev_enabled);
                assert!(*next_enabled);
            }
            other => panic!("unexpected view: {other:?}"),
        }

        let text = view.to_string();
        assert!(text.contains("5 properties found"));
        assert!(text.contains("Page 2 of 3"));
        assert!(text.contains("#3 Calle 3"));
    }

    #[test]
    fn edit_form_round_trips_into_update_body() {
        let form = EditForm::from(&property(7, "Calle 7"));
        assert_eq!(form.price, "250000");
        let input = form.to_input();
        assert_eq!(input.id, Some(PropertyId(7)));
        assert_eq!(input.price, Some(250000.0));
        assert_eq!(input.size, Some(120.5));
    }
}
