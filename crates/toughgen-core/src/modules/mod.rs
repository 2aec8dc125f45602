pub mod chemical;
pub mod flow;
pub mod incon;
pub mod mesh_deck;
pub mod rock_scan;
pub mod serialization;
pub mod solute;
pub mod tecplot;

mod dispatch;
mod source;
mod traits;

pub use dispatch::{SIMULATOR_DECKS, deck_generator, execute_deck, generate_decks};
pub use source::SourceDeck;
pub use traits::{DeckExecutor, DeckGenerator};
