//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// RedLilium decal parameter editor.
#[derive(Parser, Debug, Default)]
#[command(
    name = "RedLilium Editor",
    about = "Headless decal parameter editor with undo/redo",
    long_about = "Edits the parameters of one decal through bound widgets and an undo history.\n\n\
        Widget interaction is read from a script, one command per line:\n\
        \n\
          type <property> <text>        focus, type and commit\n\
          drag <property> <pos>...      drag a slider through positions\n\
          cancel <property> <pos>...    drag, then abort the gesture\n\
          toggle <property>             click a check box\n\
          undo | redo | save | print\n\
          tick [n]                      let n frames pass\n\
        \n\
        Without --script a built-in demonstration script runs.\n\
        \n\
        EXAMPLES:\n\
          # Run the demonstration\n\
          ./redlilium-editor\n\
        \n\
          # Run a script with custom slider ranges\n\
          ./redlilium-editor --settings editor.toml --script edits.txt",
    version
)]
pub struct EditorArgs {
    /// Settings file (TOML). Defaults are used when omitted.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Script of widget interactions to replay.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Exit after N frames even if the script has not finished.
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Undo depth. Overrides the settings file.
    #[arg(long)]
    pub max_undo: Option<usize>,
}
