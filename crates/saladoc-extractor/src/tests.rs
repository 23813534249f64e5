//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{Extractor, ExtractorConfig, ExtractorError, ExtractionRequest, OUTPUT_FIELDS};
    use saladoc_domain::{DocStatus, DocType, DocumentDraft, DocumentId};
    use saladoc_llm::{cancellation, GatewayError, MockGateway, RequestKind};
    use std::time::Duration;

    const CONTRACT_REPLY: &str = r#"{
        "referenceNumber": "EXT-2024-045",
        "title": "IT development partnership contract",
        "originDept": "Lao Telecom",
        "date": "2024-05-10",
        "summary": "Draft contract for installing the office network.",
        "type": "Contract",
        "status": "Pending"
    }"#;

    fn pdf_request() -> ExtractionRequest {
        ExtractionRequest::new(b"%PDF-1.7 fake".to_vec(), "application/pdf")
    }

    #[tokio::test]
    async fn test_full_extraction_flow() {
        let gateway = MockGateway::new().with_structured(CONTRACT_REPLY);
        let extractor = Extractor::new(gateway.clone(), ExtractorConfig::default());

        let request = pdf_request().with_file_name("contract.pdf");
        let result = extractor.extract(&request).await.unwrap();

        assert_eq!(result.title.as_deref(), Some("IT development partnership contract"));
        assert_eq!(result.doc_type, Some(DocType::Contract));
        assert_eq!(result.status, Some(DocStatus::Pending));
        assert_eq!(result.file_name.as_deref(), Some("contract.pdf"));

        // One structured request carrying the file and the schema
        assert_eq!(gateway.call_count(), 1);
        let sent = gateway.last_request().unwrap();
        assert_eq!(sent.kind, RequestKind::Structured);
        assert_eq!(sent.media_type.as_deref(), Some("application/pdf"));
        assert_eq!(sent.attachment_len, request.data.len());
        assert!(sent.prompt.contains("summary in Lao"));
        assert!(sent.prompt.contains("contract.pdf"));

        let schema = sent.schema.unwrap();
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["properties"].as_object().unwrap().len(), OUTPUT_FIELDS.len());
    }

    #[tokio::test]
    async fn test_successful_extraction_has_required_fields() {
        let replies = [
            r#"{"title":"A","summary":"B","type":"Incoming"}"#,
            r#"{"title":"A","summary":"B","type":"Outgoing","status":"Draft","date":"2024-02-29"}"#,
            CONTRACT_REPLY,
        ];

        for reply in replies {
            let extractor = Extractor::new(
                MockGateway::new().with_structured(reply),
                ExtractorConfig::default(),
            );
            let result = extractor.extract(&pdf_request()).await.unwrap();
            assert!(result.title.as_deref().is_some_and(|t| !t.is_empty()));
            assert!(result.summary.as_deref().is_some_and(|s| !s.is_empty()));
            assert!(result.doc_type.is_some());
        }
    }

    #[tokio::test]
    async fn test_extraction_with_invalid_enum() {
        let gateway = MockGateway::new()
            .with_structured(r#"{"title":"X","summary":"Y","type":"InvalidValue"}"#);
        let extractor = Extractor::new(gateway, ExtractorConfig::default());

        let err = extractor.extract(&pdf_request()).await.unwrap_err();
        assert!(matches!(err, ExtractorError::SchemaViolation(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_extraction_with_invalid_json() {
        let gateway = MockGateway::new().with_structured("This is not JSON");
        let extractor = Extractor::new(gateway, ExtractorConfig::default());

        let err = extractor.extract(&pdf_request()).await.unwrap_err();
        assert!(matches!(err, ExtractorError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn test_extraction_with_empty_reply() {
        let extractor = Extractor::new(MockGateway::new(), ExtractorConfig::default());

        let err = extractor.extract(&pdf_request()).await.unwrap_err();
        assert!(matches!(err, ExtractorError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected_before_calling_model() {
        let gateway = MockGateway::new().with_structured(CONTRACT_REPLY);
        let extractor = Extractor::new(gateway.clone(), ExtractorConfig::default());

        let err = extractor
            .extract(&ExtractionRequest::new(Vec::new(), "image/png"))
            .await
            .unwrap_err();
        assert_eq!(err, ExtractorError::EmptyInput);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_media_type() {
        let gateway = MockGateway::new().with_structured(CONTRACT_REPLY);
        let extractor = Extractor::new(gateway.clone(), ExtractorConfig::default());

        let err = extractor
            .extract(&ExtractionRequest::new(vec![1, 2, 3], "application/zip"))
            .await
            .unwrap_err();
        assert_eq!(err, ExtractorError::UnsupportedMediaType("application/zip".to_string()));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates() {
        let gateway = MockGateway::new().with_structured_error(GatewayError::PayloadTooLarge {
            size: 30_000_000,
            max: 20_971_520,
        });
        let extractor = Extractor::new(gateway.clone(), ExtractorConfig::default());

        let err = extractor.extract(&pdf_request()).await.unwrap_err();
        assert!(matches!(err, ExtractorError::Gateway(ref m) if m.contains("Payload too large")));
        assert!(err.is_retryable());

        // No retry inside the extractor
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_gateway_error() {
        let gateway = MockGateway::new()
            .with_structured(CONTRACT_REPLY)
            .with_delay(Duration::from_secs(5));
        let config = ExtractorConfig {
            extraction_timeout_secs: 1,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(gateway.clone(), config);

        let err = extractor.extract(&pdf_request()).await.unwrap_err();
        assert!(matches!(err, ExtractorError::Gateway(ref m) if m.contains("timed out")));
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cancellation() {
        let gateway = MockGateway::new()
            .with_structured(CONTRACT_REPLY)
            .with_delay(Duration::from_secs(5));
        let extractor = Extractor::new(gateway, ExtractorConfig::default());
        let (handle, signal) = cancellation();

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        });

        let err = extractor.extract_with_cancel(&pdf_request(), &signal).await.unwrap_err();
        assert_eq!(err, ExtractorError::Cancelled);
        canceller.await.unwrap();
    }

    #[test]
    fn test_extract_then_merge_into_intake_form() {
        let gateway = MockGateway::new()
            .with_structured(r#"{"title":"Contract X","summary":"","type":"Contract"}"#);
        let extractor = Extractor::new(gateway, ExtractorConfig::default());

        // A blank summary is a schema violation, not an empty override
        let err = tokio_test::block_on(extractor.extract(&pdf_request())).unwrap_err();
        assert!(matches!(err, ExtractorError::SchemaViolation(_)));

        let gateway = MockGateway::new()
            .with_structured(r#"{"title":"Contract X","summary":"Network","type":"Contract","originDept":""}"#);
        let extractor = Extractor::new(gateway, ExtractorConfig::default());
        let extracted = tokio_test::block_on(extractor.extract(&pdf_request())).unwrap();

        let defaults = DocumentDraft {
            reference_number: String::new(),
            title: "Untitled".to_string(),
            doc_type: DocType::Internal,
            origin_dept: "Unknown".to_string(),
            date: "2024-01-01".to_string(),
            status: DocStatus::Draft,
            summary: String::new(),
            file_name: None,
        };
        let record = saladoc_domain::merge::merge(DocumentId::new("DOC-1"), &defaults, &extracted);

        assert_eq!(record.title, "Contract X");
        assert_eq!(record.doc_type, DocType::Contract);
        assert_eq!(record.origin_dept, "Unknown");
        assert_eq!(record.status, DocStatus::Draft);
        assert_eq!(record.summary, "Network");
    }
}
