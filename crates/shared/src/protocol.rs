use serde::{Deserialize, Serialize};

use crate::domain::{Property, PropertyId};

pub fn properties_route() -> &'static str {
    "/properties"
}

pub fn property_route(id: PropertyId) -> String {
    format!("{}/{}", properties_route(), id.0)
}

/// Query string of `GET /properties`. Unset filters are left out entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(
        default,
        rename = "sizeProperty",
        skip_serializing_if = "Option::is_none"
    )]
    pub size_property: Option<f64>,
}

/// One page of the filtered result set as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPage {
    pub content: Vec<Property>,
    pub total_pages: u32,
    pub total_elements: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_spring_page_and_ignores_extra_fields() {
        let raw = r#"{
            "content": [{"id":1,"address":"A","price":1.0,"size":2.0,"description":"d"}],
            "pageable": {"pageNumber": 0, "pageSize": 2},
            "totalPages": 3,
            "totalElements": 5,
            "last": false,
            "number": 0,
            "size": 2,
            "first": true,
            "empty": false
        }"#;
        let page: PropertyPage = serde_json::from_str(raw).expect("page");
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 5);
    }

    #[test]
    fn property_route_uses_numeric_id() {
        assert_eq!(property_route(PropertyId(12)), "/properties/12");
    }
}
