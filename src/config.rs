//! Модуль конфигурации библиотеки practice-sync
//!
//! Все пороги и тайминги подобраны эмпирически; они намеренно вынесены
//! в конфигурацию как настраиваемые значения, а не жёсткие инварианты.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Конфигурация библиотеки
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeConfig {
    /// Порог схожести (в процентах), начиная с которого попытка оценивается как GOOD
    pub good_threshold: f64,
    /// Порог схожести (в процентах), начиная с которого попытка оценивается как OK
    pub ok_threshold: f64,
    /// Максимальная длительность сегмента (в секундах), при которой используется
    /// точный покадровый опрос позиции вместо грубого интервального
    pub short_segment_cutoff: f64,
    /// Допуск (в секундах) при сравнении текущей позиции с границей сегмента
    pub boundary_epsilon: f64,
    /// Максимальное время ожидания метаданных медиаресурса
    pub metadata_timeout: Duration,
    /// Максимальное время ожидания завершения позиционирования;
    /// по истечении продолжаем оптимистично, так как не все платформы
    /// надёжно сообщают о завершении seek
    pub seek_timeout: Duration,
    /// Период точного опроса позиции для коротких сегментов (частота кадра)
    pub frame_poll_interval: Duration,
    /// Период грубого опроса позиции для длинных сегментов
    pub coarse_poll_interval: Duration,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            good_threshold: 70.0,
            ok_threshold: 30.0,
            short_segment_cutoff: 1.5,
            boundary_epsilon: 0.002,
            metadata_timeout: Duration::from_secs(5),
            seek_timeout: Duration::from_millis(150),
            frame_poll_interval: Duration::from_millis(16),
            coarse_poll_interval: Duration::from_millis(40),
        }
    }
}
