//! Command line interface of the harness

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec2;
use lightpaint_ipc::{InputEvent, OperatorCall};
use painting::{
    report, run_literal, MemoryScene, ModalEvent, ModalOperator, ModalPhase, OperatorRegistry,
    Scene, ViewTransform,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::HarnessConfig;

#[derive(Parser)]
#[command(name = "lightpaint", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SceneArgs {
    /// Scene JSON file (defaults to the startup cube scene)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Operator request JSON file (`{"operator": ..., "params": ...}`)
    #[arg(long)]
    request: PathBuf,

    /// Harness config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// View JSON file; defaults to looking through the scene camera
    #[arg(long)]
    view: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Write the resulting scene here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an operator on the request's recorded mouse path
    Run(SceneArgs),

    /// Drive an operator through a recorded list of input events
    Replay {
        #[command(flatten)]
        args: SceneArgs,

        /// Input events JSON file (array of events)
        #[arg(long)]
        events: PathBuf,
    },

    /// List the registered operators
    Operators,

    /// Print the startup cube scene
    DefaultScene,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let registry = OperatorRegistry::with_all()?;

    match cli.command {
        Commands::Run(args) => {
            let mut session = Session::load(&args, &registry)?;
            let result = run_literal(
                &session.call,
                session.call.mouse_path(),
                &session.view,
                &mut session.scene,
                &session.config.paint,
            );
            info!("{}", report(&session.call, &result).to_json()?);
            let outcome = result.with_context(|| format!("{} failed", session.call.id()))?;
            debug!("Outcome: {:?}", outcome);
            write_json(&session.scene, args.out.as_deref())?;
        }
        Commands::Replay { args, events } => {
            let mut session = Session::load(&args, &registry)?;
            let events: Vec<InputEvent> = read_json(&events)?;
            session.replay(&events)?;
            write_json(&session.scene, args.out.as_deref())?;
        }
        Commands::Operators => {
            for info in registry.iter() {
                println!("{:<28} {:<14} {}", info.id(), info.label, info.description);
            }
        }
        Commands::DefaultScene => write_json(&MemoryScene::default_cube(), None)?,
    }
    Ok(())
}

/// Everything needed to run one operator
struct Session {
    call: OperatorCall,
    scene: MemoryScene,
    view: ViewTransform,
    config: HarnessConfig,
}

impl Session {
    fn load(args: &SceneArgs, registry: &OperatorRegistry) -> Result<Self> {
        let config = HarnessConfig::load(args.config.as_deref())?.with_viewport(args.width, args.height);
        let call: OperatorCall = read_json(&args.request)?;
        registry.ensure_registered(&call.id())?;

        let scene = match &args.scene {
            Some(path) => read_json(path)?,
            None => MemoryScene::default_cube(),
        };
        let view = match &args.view {
            Some(path) => read_json(path)?,
            None => {
                let camera = scene
                    .active_camera()
                    .ok_or_else(|| anyhow!("Scene has no camera; pass --view"))?;
                let viewport = Vec2::new(config.viewport.width_f32(), config.viewport.height_f32());
                ViewTransform::from_camera(&camera, viewport)
            }
        };

        info!("Running {} on {} objects", call.id(), scene.objects().len());
        Ok(Self {
            call,
            scene,
            view,
            config,
        })
    }

    /// Feed recorded input events to a modal run of the call.
    /// Succeeds only if the run committed.
    fn replay(&mut self, events: &[InputEvent]) -> Result<()> {
        let mut modal = ModalOperator::new(self.call.clone(), self.view, self.config.paint.clone());
        for event in events.iter().filter_map(ModalEvent::from_input) {
            if modal.on_event(event, &mut self.scene).is_terminal() {
                break;
            }
        }
        if let Some(report) = modal.report() {
            info!("{}", report.to_json()?);
        }
        match modal.phase() {
            ModalPhase::Committed => Ok(()),
            ModalPhase::Cancelled => match modal.error() {
                Some(err) => bail!("{} failed: {}", self.call.id(), err),
                None => bail!("{} cancelled", self.call.id()),
            },
            phase => bail!("Event stream ended while {:?}", phase),
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(file, value)?;
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
