pub mod error;
pub mod log;
pub mod normalize;
pub mod panel;
pub mod recorder;
pub mod selection;

pub use error::TagError;
pub use log::{TagLog, summarize};
pub use normalize::{ImageExtent, norm};
pub use panel::{Button, ButtonPanel};
pub use recorder::{ClickOutcome, IgnoreReason, Recorder, RecorderState, SelectOutcome, UndoOutcome};
pub use selection::{Selection, SelectionField};
