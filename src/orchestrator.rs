//! Модуль выбора пути озвучивания
//!
//! Для каждого предложения решает, воспроизводить ли оригинальную
//! запись через [`BoundedSegmentPlayer`] или уйти на резервный путь
//! синтеза речи. Сам оркестратор только маршрутизирует; неудача
//! точного воспроизведения для ученика ошибкой не выглядит.

use std::sync::Arc;

use log::warn;
use serde::Serialize;

use crate::config::PracticeConfig;
use crate::media::AudioHandle;
use crate::playback::BoundedSegmentPlayer;
use crate::segment::Segment;
use crate::speech::{SpeechOptions, SpeechSynthesizer};

/// Каким путём было озвучено предложение
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlaybackPath {
    /// Оригинальная запись урока
    Original,
    /// Резервный синтез речи
    Fallback,
}

/// Оркестратор демонстрации предложения
pub struct PlaybackOrchestrator {
    player: BoundedSegmentPlayer,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    speech_options: SpeechOptions,
}

impl PlaybackOrchestrator {
    /// Создать оркестратор с указанной конфигурацией и синтезатором
    pub fn new(config: PracticeConfig, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            player: BoundedSegmentPlayer::new(config),
            synthesizer,
            speech_options: SpeechOptions::default(),
        }
    }

    /// Задать параметры резервного синтеза речи
    pub fn with_speech_options(mut self, options: SpeechOptions) -> Self {
        self.speech_options = options;
        self
    }

    /// Продемонстрировать предложение ученику.
    ///
    /// Сегмент без корректных границ или без аудиоресурса сразу уходит
    /// на резервный путь, проигрыватель при этом не вызывается. Если
    /// точное воспроизведение запущено, больше ничего делать не нужно:
    /// наблюдатель границы остановит его сам.
    pub async fn play_reference(
        &self,
        segment: &Segment,
        handle: Option<&AudioHandle>,
        source_url: Option<&str>,
    ) -> PlaybackPath {
        let Some((start, end)) = segment.bounds() else {
            return self.fall_back(&segment.text).await;
        };

        let (Some(handle), Some(source_url)) = (handle, source_url) else {
            return self.fall_back(&segment.text).await;
        };

        if self.player.play(handle, source_url, start, end).await {
            PlaybackPath::Original
        } else {
            self.fall_back(&segment.text).await
        }
    }

    async fn fall_back(&self, text: &str) -> PlaybackPath {
        if let Err(e) = self.synthesizer.speak(text, &self.speech_options).await {
            warn!("Fallback speech synthesis failed: {}", e);
        }
        PlaybackPath::Fallback
    }
}
