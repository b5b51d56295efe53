mod args;
mod decal;
mod editor;
mod panel;
mod script;
mod settings;

use std::process::ExitCode;

use clap::Parser;

use args::EditorArgs;
use editor::{Editor, FrameStatus};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    redlilium_core::init();

    let args = EditorArgs::parse();
    let mut settings = settings::load_or_default(args.settings.as_deref());
    if let Some(max_undo) = args.max_undo {
        settings.history.max_undo = max_undo;
    }

    let script = match &args.script {
        Some(path) => match script::load_script(path) {
            Ok(script) => script,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("No script given, running the built-in demonstration");
            match script::parse_script(script::DEFAULT_SCRIPT) {
                Ok(script) => script,
                Err(e) => {
                    log::error!("Built-in script: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    let mut editor = Editor::new(&settings, script);
    loop {
        if let Some(max_frames) = args.max_frames
            && editor.frame_number() >= max_frames
        {
            log::info!("Reached max frames limit ({max_frames}), exiting");
            break;
        }
        match editor.tick() {
            Ok(FrameStatus::Running) => {}
            Ok(FrameStatus::Finished) => {
                log::info!("Script finished after {} frames", editor.frame_number());
                break;
            }
            Err(e) => {
                log::error!("Script failed at {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    for line in editor.report() {
        log::info!("{line}");
    }
    if editor.history().borrow().has_unsaved_changes() {
        log::warn!("Exiting with unsaved changes");
    }
    ExitCode::SUCCESS
}
