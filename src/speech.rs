//! Модуль синтеза речи
//!
//! Резервный путь озвучивания предложения, когда точное воспроизведение
//! оригинальной записи невозможно. Сам синтезатор предоставляется
//! окружением; доступность возможности решается один раз при старте,
//! а не проверяется при каждом вызове.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{PracticeError, Result};

/// Параметры синтеза речи
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechOptions {
    /// Код языка произношения
    pub lang: String,
    /// Скорость речи; по умолчанию чуть замедлена для детей
    pub rate: f32,
    /// Высота голоса
    pub pitch: f32,
    /// Громкость
    pub volume: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            lang: "zh-CN".to_string(),
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl SpeechOptions {
    /// Параметры для английской озвучки
    pub fn english() -> Self {
        Self {
            lang: "en-US".to_string(),
            ..Self::default()
        }
    }
}

/// Трейт синтезатора речи.
///
/// Реализация обязана отменить незавершённое произнесение перед
/// началом нового.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Произнести текст с указанными параметрами
    async fn speak(&self, text: &str, options: &SpeechOptions) -> Result<()>;
}

/// Вариант «синтез недоступен» для окружений без синтезатора.
///
/// Внедряется вместо реального синтезатора, чтобы отсутствие
/// возможности было явным состоянием, а не результатом проверок
/// на каждом вызове.
pub struct UnavailableSynthesizer;

#[async_trait]
impl SpeechSynthesizer for UnavailableSynthesizer {
    async fn speak(&self, _text: &str, _options: &SpeechOptions) -> Result<()> {
        Err(PracticeError::SynthesisUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_suit_young_learners() {
        let options = SpeechOptions::default();
        assert_eq!(options.lang, "zh-CN");
        assert!(options.rate < 1.0);
    }

    #[tokio::test]
    async fn test_unavailable_synthesizer_reports_absence() {
        let synthesizer = UnavailableSynthesizer;
        let result = synthesizer.speak("你好", &SpeechOptions::default()).await;
        assert!(matches!(result, Err(PracticeError::SynthesisUnavailable)));
    }
}
