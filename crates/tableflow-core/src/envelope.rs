//! # Event Envelope
//!
//! Decoding of events arriving as JSON from the views.
//!
//! ```text
//! {"type": "MARK_READY", "payload": {"orderItemId": "item-1"}}  ──► Ok(Some(event))
//! {"type": "TIP_WAITER", "payload": {...}}                     ──► Ok(None)
//! {"type": "MARK_READY", "payload": {"id": 4}}                 ──► Err(MalformedEvent)
//! ```
//!
//! Unknown kinds are not an error: the store treats them as a no-op.

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::event::RestaurantEvent;

#[derive(Debug, Deserialize)]
struct Header {
    #[serde(rename = "type")]
    kind: String,
}

/// Decodes one event from JSON.
pub fn decode_event(json: &str) -> CoreResult<Option<RestaurantEvent>> {
    let header: Header = serde_json::from_str(json).map_err(|e| CoreError::MalformedEvent {
        kind: "<unknown>".to_string(),
        reason: e.to_string(),
    })?;

    if !RestaurantEvent::KINDS.contains(&header.kind.as_str()) {
        return Ok(None);
    }

    serde_json::from_str(json)
        .map(Some)
        .map_err(|e| CoreError::MalformedEvent {
            kind: header.kind,
            reason: e.to_string(),
        })
}

/// Encodes an event in the same envelope shape.
pub fn encode_event(event: &RestaurantEvent) -> CoreResult<String> {
    serde_json::to_string(event).map_err(|e| CoreError::MalformedEvent {
        kind: event.kind().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_event() {
        let json = r#"{"type":"CUSTOMER_LEFT","payload":{"tableId":"table-4"}}"#;
        assert_eq!(
            decode_event(json).unwrap(),
            Some(RestaurantEvent::customer_left("table-4"))
        );
    }

    #[test]
    fn test_decode_place_order() {
        let json = r#"{
            "type": "PLACE_ORDER",
            "payload": {
                "tableId": "table-3",
                "items": [{
                    "menuItem": {
                        "id": "sth-1", "name": "Masala Dosa", "category": "South Indian",
                        "prepTime": 10, "price": 15000
                    },
                    "quantity": 2
                }],
                "totalAmount": 30000
            }
        }"#;
        match decode_event(json).unwrap() {
            Some(RestaurantEvent::PlaceOrder(order)) => {
                assert_eq!(order.items[0].quantity, 2);
                assert_eq!(order.total_amount.major(), 300);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_none() {
        let json = r#"{"type":"TIP_WAITER","payload":{"amount":50}}"#;
        assert_eq!(decode_event(json).unwrap(), None);
    }

    #[test]
    fn test_malformed_payload_is_error() {
        let json = r#"{"type":"MARK_READY","payload":{"id":4}}"#;
        let err = decode_event(json).unwrap_err();
        assert!(matches!(err, CoreError::MalformedEvent { ref kind, .. } if kind == "MARK_READY"));

        assert!(decode_event("not json").is_err());
    }

    #[test]
    fn test_encode_then_decode() {
        let event = RestaurantEvent::check_timer("table-2");
        let json = encode_event(&event).unwrap();
        assert_eq!(decode_event(&json).unwrap(), Some(event));
    }
}
