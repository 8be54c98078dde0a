//! Модуль с описанием сегмента урока
//!
//! Сегмент — это одно предложение урока: текст и временные границы
//! в исходной аудиодорожке. Сегменты принадлежат вызывающей стороне,
//! библиотека их только читает.

use serde::{Deserialize, Serialize};

/// Сегмент урока: предложение с временными границами в аудиодорожке
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Время начала сегмента в секундах (может отсутствовать)
    pub start_time: Option<f64>,
    /// Время окончания сегмента в секундах (может отсутствовать)
    pub end_time: Option<f64>,
    /// Текст предложения
    pub text: String,
}

impl Segment {
    /// Создать новый сегмент
    pub fn new(start_time: Option<f64>, end_time: Option<f64>, text: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// Вернуть границы сегмента, если они заданы и корректны.
    ///
    /// Сегмент без начала, без конца или с нулевой/отрицательной
    /// длительностью считается непригодным для точного воспроизведения.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if end - start > 0.0 => Some((start, end)),
            _ => None,
        }
    }

    /// Длительность сегмента в секундах, если границы корректны
    pub fn duration(&self) -> Option<f64> {
        self.bounds().map(|(start, end)| end - start)
    }
}
