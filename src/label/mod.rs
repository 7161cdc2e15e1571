//! Ground-truth labeling: browse a batch of local images, assign a
//! primary/secondary/accent color to each and export the labeled set.

pub mod batch;
pub mod editor;
pub mod script;
pub mod session;
pub mod store;
pub mod types;

pub use batch::{ImageHandle, LabelBatch};
pub use editor::LabelEditor;
pub use session::LabelSession;
pub use store::LabelStore;
pub use types::{HexColor, LabelColors, LabeledImage};
