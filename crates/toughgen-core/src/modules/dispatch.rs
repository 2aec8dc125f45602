use super::chemical::ChemicalModule;
use super::flow::FlowModule;
use super::incon::InconModule;
use super::mesh_deck::MeshDeckModule;
use super::serialization::write_text_artifact;
use super::solute::SoluteModule;
use super::source::SourceDeck;
use super::traits::{DeckExecutor, DeckGenerator};
use crate::config::DeckConfig;
use crate::domain::{DeckArtifact, DeckKind, DeckResult, GenerateRequest};
use std::path::Path;
use tracing::info;

/// The decks a plain `generate` run produces; `chemical.inp` is opt-in.
pub const SIMULATOR_DECKS: [DeckKind; 4] = [
    DeckKind::Mesh,
    DeckKind::Flow,
    DeckKind::Incon,
    DeckKind::Solute,
];

pub fn deck_generator(deck: DeckKind) -> &'static dyn DeckGenerator {
    match deck {
        DeckKind::Mesh => &MeshDeckModule,
        DeckKind::Flow => &FlowModule,
        DeckKind::Incon => &InconModule,
        DeckKind::Solute => &SoluteModule,
        DeckKind::Chemical => &ChemicalModule,
    }
}

pub fn execute_deck(
    request: &GenerateRequest,
    config: &DeckConfig,
) -> DeckResult<Vec<DeckArtifact>> {
    match request.deck {
        DeckKind::Mesh => MeshDeckModule.execute(request, config),
        DeckKind::Flow => FlowModule.execute(request, config),
        DeckKind::Incon => InconModule.execute(request, config),
        DeckKind::Solute => SoluteModule.execute(request, config),
        DeckKind::Chemical => ChemicalModule.execute(request, config),
    }
}

/// Renders every requested deck from one read of the source deck and only
/// then writes them, so a deck that fails to render leaves the output
/// directory untouched. Each write is atomic on its own; a failed write can
/// follow decks already persisted in the same call.
pub fn generate_decks(
    source_path: &Path,
    output_dir: &Path,
    config: &DeckConfig,
    decks: &[DeckKind],
) -> DeckResult<Vec<DeckArtifact>> {
    let generators: Vec<&dyn DeckGenerator> =
        decks.iter().map(|&deck| deck_generator(deck)).collect();

    let source = if generators.iter().any(|generator| generator.reads_source()) {
        let source = SourceDeck::load(source_path, &config.mesh)?;
        info!(
            path = %source_path.display(),
            elements = source.mesh.len(),
            "loaded source deck"
        );
        source
    } else {
        SourceDeck::default()
    };

    let rendered = generators
        .iter()
        .map(|generator| Ok((generator.deck(), generator.render(&source, config)?)))
        .collect::<DeckResult<Vec<_>>>()?;

    let mut artifacts = Vec::with_capacity(rendered.len());
    for (deck, text) in rendered {
        let request = GenerateRequest::new(deck, source_path, output_dir);
        let output_path = request.output_path();
        write_text_artifact(&output_path, &text)?;
        info!(deck = %deck, path = %output_path.display(), "wrote deck");
        artifacts.push(DeckArtifact::new(deck.file_name()));
    }
    Ok(artifacts)
}
