use std::path::Path;

use pitchtag_config::{ConfigEditor, Roster, Settings};
use pitchtag_core::{ButtonPanel, ImageExtent, Recorder, TagLog};

/// Opens a file or folder with the desktop's default handler
pub trait Revealer: Send {
    fn reveal(&self, path: &Path) -> std::io::Result<()>;
}

pub struct SystemRevealer;

impl Revealer for SystemRevealer {
    fn reveal(&self, path: &Path) -> std::io::Result<()> {
        open::that(path)
    }
}

/// Everything the event loop mutates. Owned by the loop and handed to each
/// handler in turn, so events are applied strictly one at a time.
pub struct AppState {
    pub settings: Settings,
    pub recorder: Recorder,
    pub panel: ButtonPanel,
    pub log: TagLog,
    /// Open config editor form, if any
    pub editor: Option<ConfigEditor>,
    pub revealer: Box<dyn Revealer>,
}

impl AppState {
    pub fn new(settings: Settings, roster: Roster, extent: ImageExtent) -> Self {
        Self::with_revealer(settings, roster, extent, Box::new(SystemRevealer))
    }

    pub fn with_revealer(
        settings: Settings,
        roster: Roster,
        extent: ImageExtent,
        revealer: Box<dyn Revealer>,
    ) -> Self {
        let panel = ButtonPanel::from_roster(&roster);
        let log = TagLog::new(settings.paths.log.clone());
        let recorder = Recorder::new(roster, extent, settings.recorder.pending_point);

        Self {
            settings,
            recorder,
            panel,
            log,
            editor: None,
            revealer,
        }
    }
}
