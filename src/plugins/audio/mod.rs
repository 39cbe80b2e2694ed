//! Audio plugin (render-only): plays cues named by `Feedback::Audio`.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::session::{AudioCue, Feedback};

#[derive(Component)]
pub struct AmbientMusic;

#[derive(Resource, Debug, Clone)]
pub struct AudioHandles {
    pub ambient: Handle<AudioSource>,
    pub hit: Handle<AudioSource>,
    pub victory: Handle<AudioSource>,
    pub defeat: Handle<AudioSource>,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, load_audio).add_systems(
        Update,
        play_cues.run_if(in_state(GameState::InGame)),
    );
}

fn load_audio(mut commands: Commands, assets: Res<AssetServer>) {
    commands.insert_resource(AudioHandles {
        ambient: assets.load("audio/ambient.ogg"),
        hit: assets.load("audio/hit.ogg"),
        victory: assets.load("audio/victory.ogg"),
        defeat: assets.load("audio/defeat.ogg"),
    });
}

fn play_cues(
    mut reader: MessageReader<Feedback>,
    handles: Option<Res<AudioHandles>>,
    q_ambient: Query<Entity, With<AmbientMusic>>,
    mut commands: Commands,
) {
    let Some(handles) = handles else {
        return;
    };

    for fb in reader.read() {
        let Feedback::Audio(cue) = fb else {
            continue;
        };
        match cue {
            AudioCue::StartAmbient => {
                if q_ambient.is_empty() {
                    commands.spawn((
                        AmbientMusic,
                        AudioPlayer::new(handles.ambient.clone()),
                        PlaybackSettings::LOOP,
                    ));
                }
            }
            AudioCue::StopAmbient => {
                for e in &q_ambient {
                    commands.entity(e).despawn();
                }
            }
            AudioCue::Hit => {
                commands.spawn((AudioPlayer::new(handles.hit.clone()), PlaybackSettings::DESPAWN));
            }
            AudioCue::Victory => {
                commands.spawn((
                    AudioPlayer::new(handles.victory.clone()),
                    PlaybackSettings::DESPAWN,
                ));
            }
            AudioCue::Defeat => {
                commands.spawn((
                    AudioPlayer::new(handles.defeat.clone()),
                    PlaybackSettings::DESPAWN,
                ));
            }
        }
    }
}
