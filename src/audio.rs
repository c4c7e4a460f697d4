//! Audio
//!
//! Game events are mapped to music and effect playback here. The actual
//! playing is done by an [`AudioBackend`]; any error it reports is logged and
//! dropped so sound can never interrupt the game.

use crate::assets::AssetId;
use crate::error::PlaybackError;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Coin collected
    Coin,
}

impl SoundEffect {
    pub fn asset(self) -> AssetId {
        match self {
            SoundEffect::Coin => AssetId::CoinSound,
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Start or continue the looping background track
    fn play_music(&mut self, from_start: bool, volume: f32) -> Result<(), PlaybackError>;

    fn pause_music(&mut self);

    /// Change the volume of the background track, playing or not
    fn set_music_volume(&mut self, volume: f32);

    /// Play an effect from its beginning, cutting off a previous instance
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) -> Result<(), PlaybackError>;
}

/// Backend that plays nothing (native runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play_music(&mut self, _from_start: bool, _volume: f32) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn pause_music(&mut self) {}

    fn set_music_volume(&mut self, _volume: f32) {}

    fn play_effect(&mut self, _effect: SoundEffect, _volume: f32) -> Result<(), PlaybackError> {
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    music_volume: f32,
    sfx_volume: f32,
    /// Browsers refuse to start audio before the first user gesture
    user_interacted: bool,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        Self {
            backend,
            music_volume: settings.effective_music_volume(),
            sfx_volume: settings.effective_sfx_volume(),
            user_interacted: false,
        }
    }

    /// New volumes; a track that is already playing follows at once
    pub fn apply_settings(&mut self, settings: &Settings) {
        let music_volume = settings.effective_music_volume();
        if music_volume != self.music_volume {
            self.backend.set_music_volume(music_volume);
        }
        self.music_volume = music_volume;
        self.sfx_volume = settings.effective_sfx_volume();
    }

    /// Record that the user has pressed something
    pub fn mark_user_interaction(&mut self) {
        self.user_interacted = true;
    }

    pub fn user_interacted(&self) -> bool {
        self.user_interacted
    }

    /// React to a game event
    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SessionStarted => {
                if self.user_interacted {
                    let result = self.backend.play_music(true, self.music_volume);
                    report(result);
                }
            }
            GameEvent::Resumed => {
                if self.user_interacted {
                    let result = self.backend.play_music(false, self.music_volume);
                    report(result);
                }
            }
            GameEvent::Paused | GameEvent::GameOver { .. } => self.backend.pause_music(),
            GameEvent::CoinCollected { .. } => self.play(SoundEffect::Coin),
            _ => {}
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let result = self.backend.play_effect(effect, self.sfx_volume);
        report(result);
    }
}

fn report(result: Result<(), PlaybackError>) {
    if let Err(e) = result {
        log::error!("Audio playback failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Music { from_start: bool, volume: f32 },
        Pause,
        MusicVolume(f32),
        Effect(SoundEffect),
    }

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<Call>>>,
        fail: bool,
    }

    impl AudioBackend for Recorder {
        fn play_music(&mut self, from_start: bool, volume: f32) -> Result<(), PlaybackError> {
            self.calls.borrow_mut().push(Call::Music { from_start, volume });
            if self.fail {
                return Err(PlaybackError::Rejected {
                    asset: AssetId::BackgroundMusic,
                    reason: "NotAllowedError".into(),
                });
            }
            Ok(())
        }

        fn pause_music(&mut self) {
            self.calls.borrow_mut().push(Call::Pause);
        }

        fn set_music_volume(&mut self, volume: f32) {
            self.calls.borrow_mut().push(Call::MusicVolume(volume));
        }

        fn play_effect(&mut self, effect: SoundEffect, _volume: f32) -> Result<(), PlaybackError> {
            self.calls.borrow_mut().push(Call::Effect(effect));
            if self.fail {
                return Err(PlaybackError::NotReady(effect.asset()));
            }
            Ok(())
        }
    }

    fn manager(fail: bool) -> (AudioManager, Rc<RefCell<Vec<Call>>>) {
        let recorder = Recorder {
            fail,
            ..Recorder::default()
        };
        let calls = recorder.calls.clone();
        (AudioManager::new(Box::new(recorder), &Settings::default()), calls)
    }

    #[test]
    fn music_waits_for_interaction() {
        let (mut audio, calls) = manager(false);
        audio.handle(&GameEvent::SessionStarted);
        assert!(calls.borrow().is_empty());

        audio.mark_user_interaction();
        audio.handle(&GameEvent::SessionStarted);
        assert_eq!(
            *calls.borrow(),
            vec![Call::Music {
                from_start: true,
                volume: 0.5
            }]
        );
    }

    #[test]
    fn pause_and_resume_follow_the_session() {
        let (mut audio, calls) = manager(false);
        audio.mark_user_interaction();
        audio.handle(&GameEvent::Paused);
        audio.handle(&GameEvent::Resumed);
        audio.handle(&GameEvent::GameOver { score: 3 });
        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Pause,
                Call::Music {
                    from_start: false,
                    volume: 0.5
                },
                Call::Pause
            ]
        );
    }

    #[test]
    fn coin_plays_effect() {
        let (mut audio, calls) = manager(false);
        audio.handle(&GameEvent::CoinCollected { value: 1 });
        assert_eq!(*calls.borrow(), vec![Call::Effect(SoundEffect::Coin)]);
    }

    #[test]
    fn failures_are_swallowed() {
        let (mut audio, calls) = manager(true);
        audio.mark_user_interaction();
        audio.handle(&GameEvent::SessionStarted);
        audio.handle(&GameEvent::CoinCollected { value: 1 });
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn muting_silences_playing_music() {
        let (mut audio, calls) = manager(false);
        audio.mark_user_interaction();
        audio.handle(&GameEvent::SessionStarted);
        calls.borrow_mut().clear();

        let muted = Settings {
            muted: true,
            ..Settings::default()
        };
        audio.apply_settings(&muted);
        assert_eq!(*calls.borrow(), vec![Call::MusicVolume(0.0)]);

        // Same volume again is not re-sent
        audio.apply_settings(&muted);
        assert_eq!(calls.borrow().len(), 1);

        audio.apply_settings(&Settings::default());
        assert_eq!(calls.borrow().last(), Some(&Call::MusicVolume(0.5)));
    }

    #[test]
    fn muted_skips_effects() {
        let recorder = Recorder::default();
        let calls = recorder.calls.clone();
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(Box::new(recorder), &settings);
        audio.play(SoundEffect::Coin);
        assert!(calls.borrow().is_empty());
    }
}
