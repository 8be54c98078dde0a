//! Модуль обработки ошибок библиотеки practice-sync
//!
//! Этот модуль содержит типы ошибок, которые могут возникнуть при работе библиотеки.

use thiserror::Error;

/// Ошибки библиотеки practice-sync
#[derive(Debug, Error)]
pub enum PracticeError {
    /// Ошибка загрузки медиаресурса
    #[error("Media load error: {0}")]
    MediaLoad(String),

    /// Превышено время ожидания метаданных медиаресурса
    #[error("Timed out waiting for media metadata")]
    MediaLoadTimeout,

    /// Ошибка позиционирования в медиаресурсе
    #[error("Seek error: {0}")]
    Seek(String),

    /// Ошибка воспроизведения
    #[error("Playback error: {0}")]
    Playback(String),

    /// Синтез речи недоступен в данном окружении
    #[error("Speech synthesis is not available")]
    SynthesisUnavailable,

    /// Ошибка синтеза речи
    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    /// Другая ошибка
    #[error("Other error: {0}")]
    Other(String),
}

impl From<&str> for PracticeError {
    fn from(s: &str) -> Self {
        PracticeError::Other(s.to_string())
    }
}

impl From<String> for PracticeError {
    fn from(s: String) -> Self {
        PracticeError::Other(s)
    }
}

/// Тип Result для библиотеки practice-sync
pub type Result<T> = std::result::Result<T, PracticeError>;
