//! Alert headers attached to entity responses.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Application name used as the alert header prefix.
pub const APPLICATION_NAME: &str = "jobdetailsApp";

pub const ALERT_HEADER: HeaderName = HeaderName::from_static("x-jobdetailsapp-alert");
pub const ERROR_HEADER: HeaderName = HeaderName::from_static("x-jobdetailsapp-error");
pub const PARAMS_HEADER: HeaderName = HeaderName::from_static("x-jobdetailsapp-params");

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.insert(name, v);
        }
        Err(_) => tracing::warn!(header = %name, "dropping header value that is not visible ASCII"),
    }
}

pub fn alert(message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ALERT_HEADER, message);
    insert(&mut headers, PARAMS_HEADER, param);
    headers
}

pub fn entity_creation_alert(entity: &str, id: i64) -> HeaderMap {
    alert(&format!("A new {} is created with identifier {}", entity, id), &id.to_string())
}

pub fn entity_update_alert(entity: &str, id: i64) -> HeaderMap {
    alert(&format!("A {} is updated with identifier {}", entity, id), &id.to_string())
}

pub fn entity_deletion_alert(entity: &str, id: i64) -> HeaderMap {
    alert(&format!("A {} is deleted with identifier {}", entity, id), &id.to_string())
}

pub fn failure_alert(entity: &str, message: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ERROR_HEADER, message);
    insert(&mut headers, PARAMS_HEADER, entity);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_carry_application_prefix() {
        let prefix = format!("x-{}-", APPLICATION_NAME.to_lowercase());
        assert!(ALERT_HEADER.as_str().starts_with(&prefix));
        assert!(ERROR_HEADER.as_str().starts_with(&prefix));
        assert!(PARAMS_HEADER.as_str().starts_with(&prefix));
    }

    #[test]
    fn creation_alert_names_entity_and_identifier() {
        let headers = entity_creation_alert("title", 12);
        assert_eq!(headers[ALERT_HEADER], "A new title is created with identifier 12");
        assert_eq!(headers[PARAMS_HEADER], "12");
    }

    #[test]
    fn deletion_alert_uses_deleted_wording() {
        let headers = entity_deletion_alert("company", 3);
        assert_eq!(headers[ALERT_HEADER], "A company is deleted with identifier 3");
    }

    #[test]
    fn non_ascii_value_is_dropped() {
        let headers = failure_alert("title", "bad\nvalue");
        assert!(headers.get(ERROR_HEADER).is_none());
        assert_eq!(headers[PARAMS_HEADER], "title");
    }
}
