//! Hierarchical document navigator for RC 128 articles.
//!
//! Flat article records go in through the [`RecordStore`]; the
//! [`build_outline`] pass turns them into a three-level outline; the
//! [`Navigator`] keeps expand/collapse and highlight state in sync with the
//! article being read.

pub mod controller;
pub mod outline;
pub mod render;
pub mod state;
pub mod store;

pub use controller::{Navigator, Selection, Toggle};
pub use outline::{
    BuildReport, DuplicateArticle, Outline, OutlineBuild, OutlineNode, SkippedRecord,
    build_outline, natural_cmp,
};
pub use render::{RenderOptions, render_outline, render_outline_with};
pub use state::{NavigationPhase, NavigationState, PendingOrigin, PendingSelection};
pub use store::{RecordSource, RecordStore, StoreEvent, SubscriptionId};
