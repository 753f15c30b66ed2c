//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Main configuration for the nfitem pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NfitemConfig {
    /// Item extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report configuration.
    pub report: ReportConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// Item extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Recognized unit tokens, in scan order.
    pub unit_tokens: Vec<String>,

    /// Exact product descriptions searched for line by line.
    pub targets: Vec<String>,

    /// Characters searched before the unit token on a targeted line.
    pub target_lookback_chars: usize,

    /// Characters searched before the unit token on a product section line.
    pub bulk_lookback_chars: usize,

    /// Header that opens the product section.
    pub section_start: String,

    /// Header that closes the product section.
    pub section_end: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            unit_tokens: ["UN", "PT", "PC", "FD", "KG", "LT"]
                .into_iter()
                .map(String::from)
                .collect(),
            targets: vec![
                "ACUCAR CRISTAL 5KG PAINEIRAS".to_string(),
                "CAFE TRAD FORTE ALMOFADA 250GR CAFUSO".to_string(),
                "FILTRO DE PAPEL N103 30UND BRIGITTA".to_string(),
            ],
            target_lookback_chars: 120,
            bulk_lookback_chars: 80,
            section_start: "DADOS DOS PRODUTOS/SERVIÇOS".to_string(),
            section_end: "ICMS RETIDO".to_string(),
        }
    }
}

impl ExtractionConfig {
    /// Check unit tokens and targets before they are compiled into matchers.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.unit_tokens.is_empty() {
            return Err(ExtractionError::NoUnitTokens);
        }
        for token in &self.unit_tokens {
            if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ExtractionError::InvalidUnitToken(token.clone()));
            }
        }
        if let Some(pos) = self.targets.iter().position(|t| t.is_empty()) {
            return Err(ExtractionError::EmptyTarget(pos));
        }
        Ok(())
    }
}

/// Report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// How many remaining items are listed, highest unit price first.
    pub top_n: usize,

    /// Supplier name printed at the end of each paragraph.
    pub supplier: String,

    /// Reference period such as `Dezembro/2025`. Derived from the current
    /// date when absent.
    pub reference_period: Option<String>,

    /// Purpose printed in the target paragraph.
    pub target_purpose: String,

    /// Purpose printed in the remaining items paragraph.
    pub remaining_purpose: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 2,
            supplier: "Coletar".to_string(),
            reference_period: None,
            target_purpose: "copa e cozinha".to_string(),
            remaining_purpose: "limpeza".to_string(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider a PDF as text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

impl NfitemConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = NfitemConfig::default();
        assert!(config.extraction.validate().is_ok());
        assert_eq!(config.extraction.unit_tokens.len(), 6);
        assert_eq!(config.report.top_n, 2);
    }

    #[test]
    fn test_validate_rejects_bad_tokens() {
        let mut config = ExtractionConfig::default();
        config.unit_tokens = vec!["UN".to_string(), "K G".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ExtractionError::InvalidUnitToken(t)) if t == "K G"
        ));

        config.unit_tokens.clear();
        assert!(matches!(config.validate(), Err(ExtractionError::NoUnitTokens)));
    }

    #[test]
    fn test_validate_rejects_empty_target() {
        let mut config = ExtractionConfig::default();
        config.targets.push(String::new());
        assert!(matches!(config.validate(), Err(ExtractionError::EmptyTarget(3))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: NfitemConfig =
            serde_json::from_str(r#"{"report": {"top_n": 5}}"#).unwrap();
        assert_eq!(config.report.top_n, 5);
        assert_eq!(config.report.supplier, "Coletar");
        assert_eq!(config.extraction.target_lookback_chars, 120);
    }
}
