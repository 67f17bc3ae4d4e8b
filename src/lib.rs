//! Sentence-diagram cards.
//!
//! A card labels each annotated chunk of a sentence inline and draws elbow
//! arrows from modifiers to the chunk they describe. The pipeline is
//! [`classify`] → [`containment`] → [`segment`] → [`layout`] → [`overlay`],
//! driven by [`card::CardView`]; [`render`] turns the result into SVG or HTML.
//!
//! The binary `syntaxcard` reads card JSON and writes HTML, SVG or an analysis dump.

pub mod arrow;
pub mod card;
pub mod classify;
pub mod containment;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod overlay;
pub mod render;
pub mod segment;
pub mod source;
pub mod style;

pub use card::{CardView, RenderOptions};
pub use model::{Chunk, ChunkKey, SyntaxData, SyntaxDocument};
