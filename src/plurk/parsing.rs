//! Extraction helpers for Plurk API responses.

use log::warn;
use serde_json::Value;

/// Identifier of a plurk, as returned in the `plurk_id` field.
pub type PlurkId = u64;

/// Extracts the `plurk_id` of every item in a search response's `plurks` list.
///
/// Response order is preserved. A missing or empty `plurks` list yields an
/// empty vector. Items without a numeric `plurk_id` are skipped.
///
/// # Example
///
/// ```rust
/// use replurker::plurk::extract_plurk_ids;
/// use serde_json::json;
///
/// let response = json!({"plurks": [{"plurk_id": 111}, {"plurk_id": 222}]});
/// assert_eq!(extract_plurk_ids(&response), vec![111, 222]);
/// ```
pub fn extract_plurk_ids(response: &Value) -> Vec<PlurkId> {
    let Some(plurks) = response.get("plurks").and_then(Value::as_array) else {
        return Vec::new();
    };

    plurks
        .iter()
        .filter_map(|plurk| {
            let id = plurk.get("plurk_id").and_then(Value::as_u64);
            if id.is_none() {
                warn!("Skipping search result without a numeric plurk_id");
            }
            id
        })
        .collect()
}

/// Encodes ids the way the replurk endpoint expects them: a compact JSON array.
pub fn encode_ids(ids: &[PlurkId]) -> String {
    Value::from(ids.to_vec()).to_string()
}

/// One-line summary of a replurk response for the logs.
///
/// Plurk answers with `{"success": bool, "errors": {id: reason, ...}}`.
pub fn summarize_replurk_response(response: &Value) -> String {
    let success = response
        .get("success")
        .and_then(Value::as_bool)
        .map_or_else(|| "unknown".to_string(), |s| s.to_string());
    let errors = response
        .get("errors")
        .and_then(Value::as_object)
        .map_or(0, |errors| errors.len());
    format!("success={}, errors={}", success, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_plurk_ids() {
        assert!(extract_plurk_ids(&json!({"plurks": []})).is_empty());
        assert!(extract_plurk_ids(&json!({"users": {}})).is_empty());
        assert!(extract_plurk_ids(&json!({"plurks": null})).is_empty());
        assert_eq!(
            extract_plurk_ids(&json!({"plurks": [{"plurk_id": 222}, {"plurk_id": 111}]})),
            vec![222, 111]
        );
    }

    #[test]
    fn test_extract_plurk_ids_skips_malformed_items() {
        let response = json!({"plurks": [
            {"plurk_id": 1},
            {"content": "x"},
            {"plurk_id": "2"},
            {"plurk_id": 3}
        ]});
        assert_eq!(extract_plurk_ids(&response), vec![1, 3]);
    }

    #[test]
    fn test_encode_ids() {
        assert_eq!(encode_ids(&[111, 222]), "[111,222]");
        assert_eq!(encode_ids(&[]), "[]");
    }

    #[test]
    fn test_summarize_replurk_response() {
        assert_eq!(
            summarize_replurk_response(&json!({"success": true, "errors": {}})),
            "success=true, errors=0"
        );
        assert_eq!(
            summarize_replurk_response(
                &json!({"success": false, "errors": {"111": "no permission"}})
            ),
            "success=false, errors=1"
        );
        assert_eq!(
            summarize_replurk_response(&json!({})),
            "success=unknown, errors=0"
        );
    }
}
