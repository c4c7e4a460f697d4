//! Asset readiness tracking
//!
//! Loading itself happens outside the simulation (the browser fetches images
//! and sounds in the background). This registry only records what the loader
//! reports, so the frame step can ask "is this handle usable?" without ever
//! blocking. A failed asset stays failed for the session; drawing falls back
//! to solid colors.

use serde::{Deserialize, Serialize};

use crate::error::{AssetError, StartupError};

/// Every image and sound the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetId {
    DinoNormal,
    DinoDuck,
    Cactus,
    Pterodactyl,
    BackgroundDay,
    BackgroundNight,
    BackgroundMusic,
    Boulder,
    SnakePit,
    ShieldIcon,
    ShieldEffect,
    MagnetIcon,
    Coin,
    DinoAltNormal,
    DinoAltDuck,
    CoinSound,
}

/// Whether a handle is drawn or played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Audio,
}

impl AssetId {
    pub const ALL: [AssetId; 16] = [
        AssetId::DinoNormal,
        AssetId::DinoDuck,
        AssetId::Cactus,
        AssetId::Pterodactyl,
        AssetId::BackgroundDay,
        AssetId::BackgroundNight,
        AssetId::BackgroundMusic,
        AssetId::Boulder,
        AssetId::SnakePit,
        AssetId::ShieldIcon,
        AssetId::ShieldEffect,
        AssetId::MagnetIcon,
        AssetId::Coin,
        AssetId::DinoAltNormal,
        AssetId::DinoAltDuck,
        AssetId::CoinSound,
    ];

    /// File the loader fetches for this asset
    pub fn file_name(self) -> &'static str {
        match self {
            AssetId::DinoNormal => "dino.png.png",
            AssetId::DinoDuck => "dino_duck.png.png",
            AssetId::Cactus => "cactus.png.png",
            AssetId::Pterodactyl => "pterodactyl.png.png",
            AssetId::BackgroundDay => "background_day.png",
            AssetId::BackgroundNight => "background_night.png",
            AssetId::BackgroundMusic => "background_music.ogg",
            AssetId::Boulder => "boulder.png",
            AssetId::SnakePit => "snake_pit.png",
            AssetId::ShieldIcon => "shield_icon.png",
            AssetId::ShieldEffect => "shield_effect.png",
            AssetId::MagnetIcon => "magnet_icon.png",
            AssetId::Coin => "coin.png",
            AssetId::DinoAltNormal => "dino_alt_normal.png",
            AssetId::DinoAltDuck => "dino_alt_duck.png",
            AssetId::CoinSound => "coin_sound.wav",
        }
    }

    pub fn kind(self) -> AssetKind {
        match self {
            AssetId::BackgroundMusic | AssetId::CoinSound => AssetKind::Audio,
            _ => AssetKind::Image,
        }
    }

    /// Assets without which the game refuses to start after a timeout
    pub fn is_critical(self) -> bool {
        matches!(self, AssetId::DinoNormal | AssetId::DinoDuck)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Load state of one handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetStatus {
    #[default]
    Pending,
    Ready,
    Failed,
}

/// Outcome of polling the loader
#[derive(Debug, Clone, PartialEq)]
pub enum LoadProgress {
    /// Still waiting on some assets
    Loading { settled: usize, total: usize },
    /// Every asset reported back, successfully or not
    Settled { failed: usize },
    /// Timed out, but nothing critical is missing
    TimedOut { pending: Vec<AssetId> },
    /// Timed out with a critical asset unavailable
    Failed(StartupError),
}

/// Readiness of every known asset
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    status: [AssetStatus; AssetId::ALL.len()],
    failures: Vec<AssetError>,
    settled_count: usize,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every asset already usable (headless runs, tests)
    pub fn all_ready() -> Self {
        let mut registry = Self::new();
        for id in AssetId::ALL {
            registry.mark_ready(id);
        }
        registry
    }

    pub fn status(&self, id: AssetId) -> AssetStatus {
        self.status[id.index()]
    }

    #[inline]
    pub fn is_ready(&self, id: AssetId) -> bool {
        self.status(id) == AssetStatus::Ready
    }

    /// Loader callback: the asset decoded and can be used
    pub fn mark_ready(&mut self, id: AssetId) {
        if self.settle(id, AssetStatus::Ready) {
            log::debug!("Asset {:?} ready", id);
        }
    }

    /// Loader callback: the asset failed; it will not be retried
    pub fn mark_failed(&mut self, id: AssetId, reason: impl Into<String>) {
        if self.settle(id, AssetStatus::Failed) {
            let error = AssetError::LoadFailed {
                asset: id,
                file: id.file_name(),
                reason: reason.into(),
            };
            log::warn!("{error}");
            self.failures.push(error);
        }
    }

    /// Record a terminal status once; later reports for the same asset are ignored
    fn settle(&mut self, id: AssetId, status: AssetStatus) -> bool {
        let slot = &mut self.status[id.index()];
        if *slot != AssetStatus::Pending {
            return false;
        }
        *slot = status;
        self.settled_count += 1;
        if self.all_settled() {
            log::info!(
                "Asset loading complete: {}/{} processed, {} failed",
                self.settled_count,
                AssetId::ALL.len(),
                self.failures.len() + usize::from(status == AssetStatus::Failed)
            );
        }
        true
    }

    pub fn all_settled(&self) -> bool {
        self.settled_count == AssetId::ALL.len()
    }

    pub fn failures(&self) -> &[AssetError] {
        &self.failures
    }

    pub fn pending(&self) -> Vec<AssetId> {
        AssetId::ALL
            .into_iter()
            .filter(|id| self.status(*id) == AssetStatus::Pending)
            .collect()
    }

    /// Non-blocking check used by the loading screen each frame
    pub fn poll(&self, waited_ms: f64, timeout_ms: f64) -> LoadProgress {
        if self.all_settled() {
            return LoadProgress::Settled {
                failed: self.failures.len(),
            };
        }
        if waited_ms < timeout_ms {
            return LoadProgress::Loading {
                settled: self.settled_count,
                total: AssetId::ALL.len(),
            };
        }

        let pending = self.pending();
        if let Some(missing) = AssetId::ALL
            .into_iter()
            .find(|id| id.is_critical() && !self.is_ready(*id))
        {
            log::error!("Asset loading timed out; {:?} unavailable", missing);
            if pending.contains(&missing) {
                return LoadProgress::Failed(StartupError::Timeout { waited_ms, pending });
            }
            return LoadProgress::Failed(StartupError::CriticalAssetMissing(missing));
        }
        log::warn!("Asset loading timed out; continuing without {:?}", pending);
        LoadProgress::TimedOut { pending }
    }
}
