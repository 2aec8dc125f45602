use super::serialization::write_text_artifact;
use super::source::SourceDeck;
use crate::config::DeckConfig;
use crate::domain::{DeckArtifact, DeckError, DeckKind, DeckResult, GenerateRequest};
use tracing::info;

/// Renders one deck to text. Rendering never touches the output directory.
pub trait DeckGenerator {
    fn deck(&self) -> DeckKind;

    /// Decks built purely from configuration skip loading the source deck.
    fn reads_source(&self) -> bool {
        true
    }

    fn render(&self, source: &SourceDeck, config: &DeckConfig) -> DeckResult<String>;
}

pub trait DeckExecutor {
    fn execute(
        &self,
        request: &GenerateRequest,
        config: &DeckConfig,
    ) -> DeckResult<Vec<DeckArtifact>>;
}

impl<T> DeckExecutor for T
where
    T: DeckGenerator,
{
    fn execute(
        &self,
        request: &GenerateRequest,
        config: &DeckConfig,
    ) -> DeckResult<Vec<DeckArtifact>> {
        if request.deck != self.deck() {
            return Err(DeckError::config(
                "INPUT.DECK_MISMATCH",
                format!(
                    "{} generator received a request for {}",
                    self.deck(),
                    request.deck
                ),
            ));
        }

        let source = if self.reads_source() {
            SourceDeck::load(&request.source_path, &config.mesh)?
        } else {
            SourceDeck::default()
        };
        let text = self.render(&source, config)?;
        let output_path = request.output_path();
        write_text_artifact(&output_path, &text)?;
        info!(deck = %request.deck, path = %output_path.display(), "wrote deck");
        Ok(vec![DeckArtifact::new(request.deck.file_name())])
    }
}

#[cfg(test)]
mod tests {
    use super::{DeckExecutor, DeckGenerator};
    use crate::config::DeckConfig;
    use crate::domain::{DeckError, DeckErrorKind, DeckKind, DeckResult, GenerateRequest};
    use crate::modules::SourceDeck;
    use std::fs;
    use tempfile::TempDir;

    struct FailingGenerator;

    impl DeckGenerator for FailingGenerator {
        fn deck(&self) -> DeckKind {
            DeckKind::Solute
        }

        fn reads_source(&self) -> bool {
            false
        }

        fn render(&self, _source: &SourceDeck, _config: &DeckConfig) -> DeckResult<String> {
            Err(DeckError::encoding("ENCODE.FIELD_OVERFLOW", "value too wide"))
        }
    }

    #[test]
    fn render_failures_leave_no_deck_behind() {
        let temp = TempDir::new().expect("tempdir should be created");
        let request = GenerateRequest::new(DeckKind::Solute, "unused.dat", temp.path());
        let error = FailingGenerator
            .execute(&request, &DeckConfig::default())
            .expect_err("render should fail");

        assert_eq!(error.kind(), DeckErrorKind::Encoding);
        assert_eq!(error.exit_code(), 4);
        assert!(!request.output_path().exists());
        assert_eq!(
            fs::read_dir(temp.path()).expect("listable").count(),
            0,
            "nothing is staged before rendering succeeds"
        );
    }

    #[test]
    fn mismatched_requests_are_rejected() {
        let request = GenerateRequest::new(DeckKind::Flow, "unused.dat", "out");
        let error = FailingGenerator
            .execute(&request, &DeckConfig::default())
            .expect_err("deck kinds differ");
        assert_eq!(error.code(), "INPUT.DECK_MISMATCH");
    }
}
