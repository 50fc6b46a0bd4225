use async_channel::Receiver;
use bevy::{
    input::{mouse::MouseWheel, Input},
    log::{error, info},
    prelude::*,
};
use houtu_scene::{
    ListenerId, MorphComplete, MorphInput, MorphStart, Scene, SceneTransitioner,
};

use crate::{MorphCompleted, MorphRequest, MorphStarted, TransitionerSettings};

/// Systems that drive morphs, in order: requests, user input, tween updates,
/// event forwarding.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MorphSystems;

/// The plugin's subscriptions to the scene's morph notifications, and the
/// channels they feed until the notifications are sent as Bevy events.
#[derive(Resource)]
pub(crate) struct MorphListeners {
    pub start: ListenerId,
    pub complete: ListenerId,
    pub started: Receiver<MorphStart>,
    pub completed: Receiver<MorphComplete>,
}

impl MorphListeners {
    pub fn subscribe(scene: &mut Scene) -> Self {
        let (start_sender, started) = async_channel::unbounded::<MorphStart>();
        let start = scene.morph_start.add_event_listener(move |event| {
            if start_sender.try_send(*event).is_err() {
                error!("dropped morph start event, receiver closed");
            }
        });
        let (complete_sender, completed) = async_channel::unbounded::<MorphComplete>();
        let complete = scene.morph_complete.add_event_listener(move |event| {
            if complete_sender.try_send(*event).is_err() {
                error!("dropped morph complete event, receiver closed");
            }
        });
        Self {
            start,
            complete,
            started,
            completed,
        }
    }

    pub fn unsubscribe(self, scene: &mut Scene) {
        scene.morph_start.remove_event_listener(self.start);
        scene.morph_complete.remove_event_listener(self.complete);
    }
}

pub(crate) fn handle_morph_requests(
    mut requests: EventReader<MorphRequest>,
    settings: Res<TransitionerSettings>,
    mut scene: ResMut<Scene>,
    mut transitioner: ResMut<SceneTransitioner>,
) {
    let ellipsoid = settings.ellipsoid();
    for request in requests.iter() {
        let duration = request.duration.unwrap_or(settings.default_duration);
        if let Err(err) = transitioner.morph_to(&mut scene, request.mode, duration, &ellipsoid) {
            error!("morph to {} failed: {}", request.mode, err);
        }
    }
}

pub(crate) fn complete_morph_on_input(
    buttons: Res<Input<MouseButton>>,
    mut wheel: EventReader<MouseWheel>,
    mut scene: ResMut<Scene>,
    mut transitioner: ResMut<SceneTransitioner>,
) {
    let mut inputs = Vec::new();
    for (button, input) in [
        (MouseButton::Left, MorphInput::LeftDown),
        (MouseButton::Middle, MorphInput::MiddleDown),
        (MouseButton::Right, MorphInput::RightDown),
    ] {
        if buttons.just_pressed(button) {
            inputs.push(input);
        }
    }
    if wheel.iter().count() > 0 {
        inputs.push(MorphInput::Wheel);
    }

    if !transitioner.is_morphing() {
        return;
    }
    for input in inputs {
        if transitioner.handle_input(&mut scene, input) {
            info!("morph completed early by {:?}", input);
            break;
        }
    }
}

pub(crate) fn advance_morph_tweens(
    time: Res<Time>,
    mut scene: ResMut<Scene>,
    mut transitioner: ResMut<SceneTransitioner>,
) {
    if scene.tweens.is_empty() {
        return;
    }
    transitioner.update(&mut scene, time.elapsed_seconds_f64());
}

pub(crate) fn forward_morph_events(
    listeners: Res<MorphListeners>,
    mut started: EventWriter<MorphStarted>,
    mut completed: EventWriter<MorphCompleted>,
) {
    while let Ok(event) = listeners.started.try_recv() {
        info!("morph {} -> {} started", event.previous_mode, event.target_mode);
        started.send(MorphStarted(event));
    }
    while let Ok(event) = listeners.completed.try_recv() {
        info!("morph {} -> {} complete", event.previous_mode, event.target_mode);
        completed.send(MorphCompleted(event));
    }
}
