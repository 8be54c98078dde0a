//! Основной файл библиотеки practice-sync
//!
//! Библиотека реализует ядро речевой практики урока: демонстрацию
//! предложения точным воспроизведением фрагмента общей аудиодорожки
//! (с резервным синтезом речи) и оценку повторения ученика по
//! расстоянию Левенштейна. Распознавание речи, хранение уроков и
//! интерфейс остаются за вызывающей стороной.

pub mod config;
pub mod error;
pub mod evaluate;
pub mod media;
pub mod orchestrator;
pub mod playback;
pub mod segment;
pub mod speech;

use std::sync::Arc;

pub use crate::config::PracticeConfig;
pub use crate::error::{PracticeError, Result};
pub use crate::evaluate::{evaluate_transcript, feedback_for, Feedback, Rating};
pub use crate::media::{AudioHandle, MediaElement, MediaEvent};
pub use crate::orchestrator::{PlaybackOrchestrator, PlaybackPath};
pub use crate::playback::BoundedSegmentPlayer;
pub use crate::segment::Segment;
pub use crate::speech::{SpeechOptions, SpeechSynthesizer, UnavailableSynthesizer};

/// Основная структура для работы с библиотекой.
///
/// Объединяет оценку повторения и демонстрацию предложения в один
/// явно создаваемый сервисный объект: никакого глобального состояния,
/// зависимости внедряются при конструировании.
pub struct PracticeSync {
    config: PracticeConfig,
    orchestrator: PlaybackOrchestrator,
}

impl PracticeSync {
    /// Создать новый экземпляр PracticeSync с указанной конфигурацией
    pub fn new(config: PracticeConfig, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            orchestrator: PlaybackOrchestrator::new(config.clone(), synthesizer),
            config,
        }
    }

    /// Создать экземпляр с настройками по умолчанию
    pub fn with_defaults(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self::new(PracticeConfig::default(), synthesizer)
    }

    /// Задать параметры резервного синтеза речи
    pub fn with_speech_options(mut self, options: SpeechOptions) -> Self {
        self.orchestrator = self.orchestrator.with_speech_options(options);
        self
    }

    /// Конфигурация библиотеки
    pub fn config(&self) -> &PracticeConfig {
        &self.config
    }

    /// Оценить распознанное повторение относительно эталона
    pub fn evaluate(&self, target: &str, candidate: &str) -> Rating {
        evaluate_transcript(target, candidate, &self.config)
    }

    /// Отзыв для ученика по оценке
    pub fn feedback(&self, rating: Rating) -> Feedback {
        feedback_for(rating)
    }

    /// Продемонстрировать предложение ученику
    pub async fn play_reference(
        &self,
        segment: &Segment,
        handle: Option<&AudioHandle>,
        source_url: Option<&str>,
    ) -> PlaybackPath {
        self.orchestrator
            .play_reference(segment, handle, source_url)
            .await
    }
}

/// Публичный API для удобного использования: оценка одной попытки
/// с конфигурацией по умолчанию
pub fn rate_attempt(target: &str, candidate: &str) -> Rating {
    evaluate_transcript(target, candidate, &PracticeConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::sim::SimulatedMedia;

    #[test]
    fn test_rate_attempt_uses_default_thresholds() {
        assert_eq!(rate_attempt("你好，世界！", "你好世界"), Rating::Good);
        assert_eq!(rate_attempt("你好世界", ""), Rating::Retry);
    }

    #[tokio::test(start_paused = true)]
    async fn test_facade_practice_turn() {
        let media = Arc::new(SimulatedMedia::new(60.0));
        let handle = AudioHandle::new(media.clone());
        let practice = PracticeSync::with_defaults(Arc::new(UnavailableSynthesizer));

        let segment = Segment::new(Some(2.0), Some(4.5), "小猫在睡觉");
        let path = practice
            .play_reference(&segment, Some(&handle), Some("/files/lesson-7.mp3"))
            .await;
        assert_eq!(path, PlaybackPath::Original);

        let rating = practice.evaluate(&segment.text, "小猫在睡觉");
        assert_eq!(rating, Rating::Good);
        assert_eq!(practice.feedback(rating).title, "很棒！");
    }
}
