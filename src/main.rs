use std::path::PathBuf;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use tracing_subscriber::EnvFilter;

use vr_interaction::ecs::InteractionSet;
use vr_interaction::plugins::input::GamepadInputPlugin;
use vr_interaction::scripted_input::{ScriptedInputPlayer, apply_scripted_input};
use vr_interaction::{CorePlugin, demo_scene, settings::SettingsPlugin};

const FRAME_RATE: f64 = 72.0;

fn main() -> anyhow::Result<()> {
    // Respect RUST_LOG if set, otherwise default to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init()
        .ok();

    let frame = Duration::from_secs_f64(1.0 / FRAME_RATE);
    let script = std::env::args().nth(1).map(PathBuf::from);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)))
        .add_plugins((SettingsPlugin, CorePlugin))
        .add_systems(Startup, demo_scene::spawn_demo_scene);

    match script {
        Some(path) => {
            let player = ScriptedInputPlayer::from_path(&path)?;
            let frames = (player.total_duration() as f64 * FRAME_RATE).ceil() as usize + 2;
            tracing::info!(
                "Playing {:?} ({:.2}s, {} frames)",
                path,
                player.total_duration(),
                frames
            );

            app.insert_resource(player)
                .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
                .add_systems(Update, apply_scripted_input.in_set(InteractionSet::Input));
            app.finish();
            app.cleanup();

            for _ in 0..frames {
                app.update();
                let finished = app
                    .world()
                    .get_resource::<ScriptedInputPlayer>()
                    .is_none_or(ScriptedInputPlayer::is_finished);
                if finished {
                    break;
                }
            }
            demo_scene::log_demo_summary(app.world());
        }
        None => {
            tracing::info!("No input script given; reading controllers from the first gamepad");
            app.add_plugins(GamepadInputPlugin);
            app.run();
        }
    }

    Ok(())
}
