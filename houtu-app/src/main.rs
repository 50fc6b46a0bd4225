//! Headless tour through every scene mode, logging each morph.
//!
//! Pass a JSON settings file as the first argument to override the defaults.
use std::{collections::VecDeque, time::Duration};

use bevy::{app::AppExit, app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};
use houtu::{
    scene::SceneMode, MorphCompleted, MorphRequest, SceneTransitionerPlugin, SettingsError,
    TransitionerSettings,
};

#[derive(Resource, Debug)]
struct Tour(VecDeque<SceneMode>);

fn main() -> Result<(), SettingsError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => TransitionerSettings::from_file(path)?,
        None => TransitionerSettings {
            default_duration: 1.0,
            ..Default::default()
        },
    };

    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
            LogPlugin::default(),
            SceneTransitionerPlugin::new(settings),
        ))
        .insert_resource(Tour(VecDeque::from([
            SceneMode::ColumbusView,
            SceneMode::Scene2D,
            SceneMode::Scene3D,
            SceneMode::Scene2D,
            SceneMode::ColumbusView,
            SceneMode::Scene3D,
        ])))
        .add_systems(Startup, start_tour)
        .add_systems(Update, continue_tour)
        .run();
    Ok(())
}

fn start_tour(mut tour: ResMut<Tour>, mut requests: EventWriter<MorphRequest>) {
    if let Some(mode) = tour.0.pop_front() {
        requests.send(MorphRequest::new(mode));
    }
}

fn continue_tour(
    mut tour: ResMut<Tour>,
    mut completed: EventReader<MorphCompleted>,
    mut requests: EventWriter<MorphRequest>,
    mut exit: EventWriter<AppExit>,
) {
    for MorphCompleted(event) in completed.iter() {
        info!("arrived in {}", event.target_mode);
        match tour.0.pop_front() {
            Some(mode) => requests.send(MorphRequest::new(mode)),
            None => exit.send(AppExit),
        }
    }
}
