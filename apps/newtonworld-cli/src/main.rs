use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use newtonworld_author::{ActionKind, LifecycleError, LifecycleState, WorldLifecycle};
use newtonworld_common::AddonConfig;
use newtonworld_engine::{PhysicsEngine, SandboxEngine};
use newtonworld_scene::Scene;
use newtonworld_tools::{AddonInfo, DispatchError, NewtonPanel, OperatorRegistry, SceneInspector};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "newtonworld-cli",
    about = "Drive the Newton world lifecycle against an in-memory scene"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Add-on configuration (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print add-on info and registered operators
    Info,
    /// Apply steps in order to a fresh scene, drawing the panel after each
    Run {
        #[arg(value_enum, required = true)]
        steps: Vec<Step>,
        /// Print the final panel as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the reference create/destroy scenario and check every outcome
    Scenario,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Step {
    CreateHome,
    CreateWorld,
    DestroyWorld,
    /// Remove the home object the way a user deleting it in the host would
    DeleteHome,
}

impl Step {
    fn action(self) -> Option<ActionKind> {
        match self {
            Step::CreateHome => Some(ActionKind::CreateHome),
            Step::CreateWorld => Some(ActionKind::CreateWorld),
            Step::DestroyWorld => Some(ActionKind::DestroyWorld),
            Step::DeleteHome => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => AddonConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AddonConfig::default(),
    };
    let registry = OperatorRegistry::with_lifecycle_operators(WorldLifecycle::new(&config));

    match cli.command {
        Commands::Info => {
            println!("newtonworld-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", AddonInfo::newton());
            println!(
                "home: '{}' in collection '{}'",
                config.home_name, config.collection_name
            );
            println!(
                "engine: sub_steps={} solver_iterations={} worker_threads={}",
                config.engine.sub_steps,
                config.engine.solver_iterations,
                config.engine.worker_threads
            );
            println!("operators:");
            for op in registry.operators() {
                println!("  {:<34} {:<14} {}", op.id_name, op.label, op.description);
            }
        }
        Commands::Run { steps, json } => {
            let mut scene = Scene::new("Scene");
            let mut engine = SandboxEngine::new();
            let mut failures = 0;

            for step in steps {
                println!("> {step:?}");
                if let Err(e) = run_step(step, &registry, &mut scene, &mut engine) {
                    failures += 1;
                    println!("  cancelled: {e}");
                }
                if !json {
                    print!("{}", NewtonPanel::draw(&scene, &registry));
                }
            }

            println!("{}", SceneInspector::summary(&scene, registry.lifecycle()));
            if json {
                let layout = NewtonPanel::draw(&scene, &registry);
                println!("{}", serde_json::to_string_pretty(&layout)?);
            }
            if failures > 0 {
                println!("{failures} step(s) cancelled");
            }
            release_world(&registry, &mut scene, &mut engine);
        }
        Commands::Scenario => run_scenario(&registry)?,
    }

    Ok(())
}

fn run_step(
    step: Step,
    registry: &OperatorRegistry,
    scene: &mut Scene,
    engine: &mut dyn PhysicsEngine,
) -> Result<(), DispatchError> {
    let Some(action) = step.action() else {
        let home = registry
            .lifecycle()
            .locator()
            .find_home(&*scene)
            .map(|o| o.id);
        match home {
            Some(id) => {
                scene.unlink_object(id);
                tracing::info!(%id, "home object deleted");
            }
            None => println!("  no home object to delete"),
        }
        return Ok(());
    };
    let descriptor = registry
        .operator_for(action)
        .ok_or_else(|| DispatchError::UnknownOperator(action.label().to_owned()))?;
    let outcome = registry.invoke(&descriptor.id_name, scene, engine)?;
    println!("  {} -> {:?}", outcome.id_name, outcome.state);
    Ok(())
}

/// Scenes do not release their world on teardown; do it before exiting.
fn release_world(registry: &OperatorRegistry, scene: &mut Scene, engine: &mut SandboxEngine) {
    if scene.world().is_some() {
        tracing::debug!("releasing bound world before exit");
        if let Err(e) = registry.lifecycle().destroy_world(scene, engine) {
            tracing::error!(error = %e, "failed to release world");
        }
    }
}

fn run_scenario(registry: &OperatorRegistry) -> anyhow::Result<()> {
    let lifecycle = registry.lifecycle();
    let mut scene = Scene::new("Scene");
    let mut engine = SandboxEngine::new();

    expect_state(lifecycle, &scene, LifecycleState::NoHome, "empty scene")?;

    lifecycle.create_home(&mut scene)?;
    expect_state(lifecycle, &scene, LifecycleState::HomeOnly, "after create home")?;
    match lifecycle.locator().find_home(&scene) {
        Some(home) => println!("ok   home found: '{}'", home.name),
        None => bail!("home object not found after create home"),
    }

    lifecycle.create_world(&mut scene, &mut engine)?;
    expect_state(lifecycle, &scene, LifecycleState::WorldBound, "after create world")?;

    expect_error(
        lifecycle.create_world(&mut scene, &mut engine),
        LifecycleError::AlreadyBound,
        "second create world",
    )?;

    lifecycle.destroy_world(&mut scene, &mut engine)?;
    expect_state(lifecycle, &scene, LifecycleState::HomeOnly, "after destroy world")?;
    if lifecycle.locator().find_home(&scene).is_none() {
        bail!("destroy world removed the home object");
    }
    println!("ok   home survives destroy world");

    expect_error(
        lifecycle.destroy_world(&mut scene, &mut engine),
        LifecycleError::NotBound,
        "second destroy world",
    )?;

    if engine.live_worlds() != 0 {
        bail!("{} engine world(s) leaked", engine.live_worlds());
    }
    println!(
        "scenario passed: {} created, {} destroyed",
        engine.created_total(),
        engine.destroyed_total()
    );
    Ok(())
}

fn expect_state(
    lifecycle: &WorldLifecycle,
    scene: &Scene,
    expected: LifecycleState,
    step: &str,
) -> anyhow::Result<()> {
    let actual = lifecycle.state(scene);
    if actual != expected {
        bail!("{step}: expected {expected:?}, got {actual:?}");
    }
    println!("ok   {step}: {actual:?}");
    Ok(())
}

fn expect_error(
    result: Result<(), LifecycleError>,
    expected: LifecycleError,
    step: &str,
) -> anyhow::Result<()> {
    match result {
        Err(e) if e == expected => {
            println!("ok   {step} refused: {e}");
            Ok(())
        }
        Err(e) => bail!("{step}: expected {expected:?}, got {e:?}"),
        Ok(()) => bail!("{step}: expected {expected:?}, but it succeeded"),
    }
}
