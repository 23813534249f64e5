//! Prompt construction for metadata extraction

/// Builds the instruction prompt that accompanies an uploaded file
pub struct PromptBuilder {
    language: String,
    file_name: Option<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder for the target language
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            file_name: None,
        }
    }

    /// Mention the uploaded file name as a hint
    pub fn with_file_name(mut self, file_name: Option<&str>) -> Self {
        self.file_name = file_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Task
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Target language
        prompt.push_str(&format!(
            "Write the title, originDept and summary in {}. \
             Translate information into {} where appropriate for these fields.\n",
            self.language, self.language
        ));
        prompt.push_str(&format!("Provide a short summary in {}.\n\n", self.language));

        // 3. Optional upload hint
        if let Some(name) = &self.file_name {
            prompt.push_str(&format!("The uploaded file is named \"{}\".\n\n", name));
        }

        // 4. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Analyze the attached office document and extract its metadata.

Identify:
- referenceNumber: the reference number or ID printed on the document, if any
- title: the main subject of the document
- originDept: the sending department, organisation or person
- date: the date of the document
- summary: what the document is about

Determine the document type and status from context:
- type is one of Incoming, Outgoing, Internal, Contract, Other
- status is one of Draft, Pending, Approved, Completed, Rejected"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Rules:
- Use the exact English enumeration values for type and status
- Dates use the format YYYY-MM-DD
- Omit a field you cannot find instead of guessing; title, summary and type are always required

Return ONLY a JSON object matching the response schema, no markdown code blocks, no explanations."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_language() {
        let prompt = PromptBuilder::new("Lao").build();
        assert!(prompt.contains("summary in Lao"));
        assert!(!prompt.contains("uploaded file is named"));
    }

    #[test]
    fn test_prompt_includes_instructions() {
        let prompt = PromptBuilder::new("English").build();
        assert!(prompt.contains("extract its metadata"));
        assert!(prompt.contains("Incoming, Outgoing, Internal, Contract, Other"));
        assert!(prompt.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_prompt_includes_file_name() {
        let prompt = PromptBuilder::new("Lao")
            .with_file_name(Some("contract-x.pdf"))
            .build();
        assert!(prompt.contains("\"contract-x.pdf\""));
    }

    #[test]
    fn test_blank_file_name_is_ignored() {
        let prompt = PromptBuilder::new("Lao").with_file_name(Some("  ")).build();
        assert!(!prompt.contains("uploaded file is named"));
    }
}
