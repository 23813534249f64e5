//! Target language for generated text and user-facing fallback messages

use serde::{Deserialize, Serialize};

/// Language the model writes in, plus the fixed messages shown when no
/// model answer is available
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    /// Language name interpolated into prompts, e.g. "Lao"
    pub language: String,

    /// Shown when the corpus is empty
    pub no_documents: String,

    /// Shown when the model returns nothing
    pub empty_response: String,

    /// Shown when the model could not be reached
    pub gateway_error: String,

    /// Shown when a scanned document could not be analyzed and the record
    /// has to be completed by hand
    pub extraction_failed: String,

    /// Opening line of a chat session
    pub greeting: String,
}

impl Locale {
    /// Lao, the language of the register's users
    pub fn lao() -> Self {
        Self {
            language: "Lao".to_string(),
            no_documents: "ຍັງບໍ່ມີເອກະສານໃນລະບົບ, ຈຶ່ງບໍ່ສາມາດຕອບຄຳຖາມໄດ້.".to_string(),
            empty_response: "ຂໍອະໄພ, ບໍ່ສາມາດປະມວນຜົນໄດ້ໃນຂະນະນີ້.".to_string(),
            gateway_error: "ເກີດຂໍ້ຜິດພາດໃນການເຊື່ອມຕໍ່ກັບ AI.".to_string(),
            extraction_failed: "ການວິເຄາະດ້ວຍ AI ລົ້ມເຫຼວ, ກະລຸນາປ້ອນຂໍ້ມູນດ້ວຍຕົນເອງ.".to_string(),
            greeting: "ສະບາຍດີ! ຂ້ອຍແມ່ນ AI ຜູ້ຊ່ວຍຄົ້ນຫາເອກະສານ. ທ່ານຕ້ອງການຮູ້ຂໍ້ມູນຫຍັງກ່ຽວກັບເອກະສານທີ່ມີໃນລະບົບ?"
                .to_string(),
        }
    }

    /// English
    pub fn english() -> Self {
        Self {
            language: "English".to_string(),
            no_documents: "There are no documents in the register yet, so this question cannot be answered."
                .to_string(),
            empty_response: "Sorry, the request could not be processed right now.".to_string(),
            gateway_error: "An error occurred while connecting to the AI service.".to_string(),
            extraction_failed: "AI analysis failed, please enter the details manually.".to_string(),
            greeting: "Hello! I am the document search assistant. What would you like to know about the documents in the register?"
                .to_string(),
        }
    }

    /// Validate the locale
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("language", &self.language),
            ("no_documents", &self.no_documents),
            ("empty_response", &self.empty_response),
            ("gateway_error", &self.gateway_error),
            ("extraction_failed", &self.extraction_failed),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(format!("locale.{} must not be empty", name));
            }
        }
        Ok(())
    }

    /// Fill every blank field from [`Locale::default`]
    pub fn or_defaults(self) -> Self {
        let defaults = Self::default();
        Self {
            language: non_blank_or(self.language, defaults.language),
            no_documents: non_blank_or(self.no_documents, defaults.no_documents),
            empty_response: non_blank_or(self.empty_response, defaults.empty_response),
            gateway_error: non_blank_or(self.gateway_error, defaults.gateway_error),
            extraction_failed: non_blank_or(self.extraction_failed, defaults.extraction_failed),
            greeting: non_blank_or(self.greeting, defaults.greeting),
        }
    }
}

fn non_blank_or(value: String, default: String) -> String {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::lao()
    }
}
