//! Output schema sent with every extraction request

use saladoc_domain::{DocStatus, DocType};
use serde_json::{json, Value};

/// Wire names of the fields the model may return
pub const OUTPUT_FIELDS: [&str; 7] = [
    "referenceNumber",
    "title",
    "originDept",
    "date",
    "summary",
    "type",
    "status",
];

/// Fields the model must always return
pub const REQUIRED_FIELDS: [&str; 3] = ["title", "summary", "type"];

/// JSON schema constraining the model's reply
///
/// Enumerated fields list exactly the domain's wire names, and no properties
/// beyond [`OUTPUT_FIELDS`] are permitted.
pub fn output_schema() -> Value {
    let types: Vec<&str> = DocType::ALL.iter().map(DocType::as_str).collect();
    let statuses: Vec<&str> = DocStatus::ALL.iter().map(DocStatus::as_str).collect();

    json!({
        "type": "object",
        "properties": {
            "referenceNumber": {
                "type": "string",
                "description": "The document reference number or ID"
            },
            "title": {
                "type": "string",
                "description": "The main subject or title of the document"
            },
            "originDept": {
                "type": "string",
                "description": "Sender department or person"
            },
            "date": {
                "type": "string",
                "description": "Date in YYYY-MM-DD format"
            },
            "summary": {
                "type": "string",
                "description": "A brief summary of the content"
            },
            "type": {
                "type": "string",
                "enum": types,
                "description": "Type of document"
            },
            "status": {
                "type": "string",
                "enum": statuses,
                "description": "Current status inferred from the content"
            }
        },
        "required": REQUIRED_FIELDS,
        "additionalProperties": false
    })
}
