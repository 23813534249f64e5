//! Prompt construction for corpus questions

/// Builds the prompt for answering a question from the supplied documents
pub struct QueryPromptBuilder {
    language: String,
}

impl QueryPromptBuilder {
    /// Create a new prompt builder for the target language
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    /// Build the prompt around a serialized corpus and the verbatim question
    pub fn build(&self, question: &str, corpus_json: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str(ASSISTANT_ROLE);
        prompt.push_str("\n\n");

        prompt.push_str("Here is the list of available documents in JSON format:\n");
        prompt.push_str(corpus_json);
        prompt.push_str("\n\n");

        prompt.push_str("User question:\n");
        prompt.push_str("---\n");
        prompt.push_str(question);
        prompt.push_str("\n---\n\n");

        prompt.push_str(GROUNDING_RULES);
        prompt.push('\n');
        prompt.push_str(&format!(
            "Answer in {}. Be professional and concise.",
            self.language
        ));

        prompt
    }
}

const ASSISTANT_ROLE: &str =
    "You are an intelligent assistant for an office document register.";

const GROUNDING_RULES: &str = r#"Answer the user's question based ONLY on the documents provided above.
Do not invent documents, reference numbers, dates or people.
If the answer is not found in the documents, state that clearly."#;
