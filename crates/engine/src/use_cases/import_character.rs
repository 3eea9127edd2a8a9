//! Import character use case - derives a stat block from a raw payload and writes it out.

use std::sync::Arc;

use statblock_domain::{
    error_document, validate_for_storage, DerivedStatBlock, DomainError, StatBlockEngine,
};

use crate::config::OutputFormat;
use crate::infrastructure::ports::{PayloadSource, PortError, StatBlockSink};
use crate::render;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Port(#[from] PortError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ImportError {
    /// True when the source held no character at all.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, ImportError::Domain(DomainError::MissingInput(_)))
    }
}

/// Loads a payload, derives the stat block, validates it for storage and
/// writes the rendered result.
///
/// An absent payload still produces output: the `{"error": ...}` document is
/// written before the error is returned, so downstream readers always see a
/// document.
pub struct ImportCharacter {
    source: Arc<dyn PayloadSource>,
    sink: Arc<dyn StatBlockSink>,
    engine: StatBlockEngine,
    format: OutputFormat,
    validate: bool,
}

impl ImportCharacter {
    pub fn new(source: Arc<dyn PayloadSource>, sink: Arc<dyn StatBlockSink>) -> Self {
        Self {
            source,
            sink,
            engine: StatBlockEngine::new(),
            format: OutputFormat::default(),
            validate: true,
        }
    }

    pub fn with_engine(mut self, engine: StatBlockEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn execute(&self) -> Result<DerivedStatBlock, ImportError> {
        let payload = self.source.load()?;

        let block = match self.engine.derive_from_value(&payload) {
            Ok(block) => block,
            Err(e) => {
                tracing::warn!(
                    source = %self.source.describe(),
                    error = %e,
                    "No character derived"
                );
                let rendered = render::render_document(&error_document(&e), self.format)?;
                self.sink.write(&rendered)?;
                return Err(e.into());
            }
        };

        if self.validate {
            validate_for_storage(&block)?;
        }

        self.sink.write(&render::render(&block, self.format)?)?;

        tracing::info!(
            source = %self.source.describe(),
            name = %block.stats.name,
            level = block.stats.level,
            format = %self.format,
            "Stat block written"
        );

        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockPayloadSource, MockStatBlockSink};
    use crate::test_fixtures;
    use mockall::predicate::eq;
    use serde_json::{json, Value};
    use statblock_domain::{CalculationEngine, ProficiencyLevel};

    fn source_returning(payload: Value) -> MockPayloadSource {
        let mut source = MockPayloadSource::new();
        source.expect_load().returning(move || Ok(payload.clone()));
        source
            .expect_describe()
            .returning(|| "fixture".to_string());
        source
    }

    #[test]
    fn writes_the_derived_stat_block() {
        let mut sink = MockStatBlockSink::new();
        sink.expect_write()
            .withf(|rendered: &str| {
                let document: Value = serde_json::from_str(rendered).unwrap();
                document["stats"][0]["character_name"] == "Seraphine Vale"
                    && document["skills"].as_array().map(Vec::len) == Some(18)
            })
            .times(1)
            .returning(|_| Ok(()));

        let use_case = ImportCharacter::new(
            Arc::new(source_returning(test_fixtures::sample_character())),
            Arc::new(sink),
        )
        .with_format(OutputFormat::Json);

        let block = use_case.execute().unwrap();
        assert_eq!(block.stats.level, 6);
    }

    #[test]
    fn uses_the_configured_engine() {
        struct FixedBonusRules;
        impl CalculationEngine for FixedBonusRules {
            fn system_id(&self) -> &str {
                "fixed-bonus"
            }
            fn ability_modifier(&self, _score: i64) -> i64 {
                0
            }
            fn proficiency_bonus(&self, _level: u32) -> i64 {
                9
            }
            fn skill_value(&self, modifier: i64, _bonus: i64, _level: ProficiencyLevel) -> i64 {
                modifier
            }
            fn saving_throw_value(&self, modifier: i64, _bonus: i64, _proficient: bool) -> i64 {
                modifier
            }
        }

        let mut sink = MockStatBlockSink::new();
        sink.expect_write().times(1).returning(|_| Ok(()));

        let use_case = ImportCharacter::new(
            Arc::new(source_returning(test_fixtures::sample_character())),
            Arc::new(sink),
        )
        .with_engine(StatBlockEngine::with_rules(Arc::new(FixedBonusRules)));

        let block = use_case.execute().unwrap();
        assert_eq!(block.stats.proficiency_bonus, 9);
        assert!(block.attributes.iter().all(|a| a.modifier == 0));
    }

    #[test]
    fn empty_payload_writes_error_document() {
        let mut sink = MockStatBlockSink::new();
        sink.expect_write()
            .with(eq(r#"{"error":"No data found."}"#))
            .times(1)
            .returning(|_| Ok(()));

        let use_case = ImportCharacter::new(Arc::new(source_returning(json!({}))), Arc::new(sink))
            .with_format(OutputFormat::Json);

        let err = use_case.execute().unwrap_err();
        assert!(err.is_missing_input());
        assert_eq!(err.to_string(), "No data found.");
    }

    #[test]
    fn storage_violations_are_returned_without_writing() {
        let long_name = "A".repeat(60);
        let mut sink = MockStatBlockSink::new();
        sink.expect_write().times(0);

        let use_case = ImportCharacter::new(
            Arc::new(source_returning(json!({"name": long_name}))),
            Arc::new(sink),
        );

        let err = use_case.execute().unwrap_err();
        match err {
            ImportError::Domain(DomainError::ValidationErrors(violations)) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "stats.character_name");
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[test]
    fn validation_can_be_disabled() {
        let mut sink = MockStatBlockSink::new();
        sink.expect_write().times(1).returning(|_| Ok(()));

        let use_case = ImportCharacter::new(
            Arc::new(source_returning(json!({"name": "B".repeat(60)}))),
            Arc::new(sink),
        )
        .with_validation(false);

        assert!(use_case.execute().is_ok());
    }

    #[test]
    fn source_failures_propagate() {
        let mut source = MockPayloadSource::new();
        source
            .expect_load()
            .returning(|| Err(PortError::serialization("expected value at line 1")));
        let mut sink = MockStatBlockSink::new();
        sink.expect_write().times(0);

        let err = ImportCharacter::new(Arc::new(source), Arc::new(sink))
            .execute()
            .unwrap_err();

        assert!(matches!(err, ImportError::Port(PortError::Serialization(_))));
        assert!(!err.is_missing_input());
    }
}
