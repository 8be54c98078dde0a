//! Модуль оценки попытки повторения
//!
//! Сравнивает распознанный текст ученика с эталонным предложением и
//! возвращает трёхуровневую оценку. Функция чистая: без состояния,
//! без ввода-вывода, никогда не завершается ошибкой.

use serde::{Deserialize, Serialize};
use strsim::levenshtein;

use crate::config::PracticeConfig;

/// Оценка попытки повторения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rating {
    /// Отличное совпадение с эталоном
    Good,
    /// Частичное совпадение, стоит попробовать ещё раз
    Ok,
    /// Совпадение не распознано, нужна новая попытка
    Retry,
}

/// Оценить распознанный текст относительно эталонного предложения.
///
/// Алгоритм: нормализация обоих текстов (регистр, пунктуация и пробелы
/// не значимы, китайские иероглифы значимы), затем расстояние Левенштейна
/// и классификация по порогам схожести из конфигурации.
pub fn evaluate_transcript(target: &str, candidate: &str, config: &PracticeConfig) -> Rating {
    // Ученик ничего не сказал или распознавание не сработало
    if candidate.trim().is_empty() {
        return Rating::Retry;
    }

    let normalized_target = normalize_text(target);
    let normalized_candidate = normalize_text(candidate);

    // Полное совпадение
    if normalized_target == normalized_candidate {
        return Rating::Good;
    }

    let similarity = similarity_percent(&normalized_target, &normalized_candidate);

    if similarity >= config.good_threshold {
        Rating::Good
    } else if similarity >= config.ok_threshold {
        Rating::Ok
    } else {
        Rating::Retry
    }
}

/// Нормализация текста перед сравнением: нижний регистр, затем удаление
/// всего, кроме латинских букв, цифр, подчёркивания и иероглифов CJK
/// (U+4E00..U+9FA5). Пробелы удаляются полностью.
fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || ('\u{4e00}'..='\u{9fa5}').contains(c))
        .collect()
}

/// Схожесть двух нормализованных строк в процентах.
///
/// Длина измеряется в логических символах, а не в байтах, иначе
/// иероглифы искажали бы результат.
fn similarity_percent(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    let distance = levenshtein(a, b);
    (1.0 - distance as f64 / max_len as f64) * 100.0
}

/// Отзыв для ученика по итогам оценки
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    /// Эмодзи отзыва
    pub emoji: &'static str,
    /// Заголовок отзыва
    pub title: &'static str,
    /// Текст отзыва
    pub message: &'static str,
    /// CSS-класс цвета для отображения
    pub color: &'static str,
}

/// Получить текст отзыва и эмодзи для оценки
pub fn feedback_for(rating: Rating) -> Feedback {
    match rating {
        Rating::Good => Feedback {
            emoji: "👍",
            title: "很棒！",
            message: "你读得非常好！继续保持！",
            color: "text-green-600",
        },
        Rating::Ok => Feedback {
            emoji: "🙂",
            title: "不错！",
            message: "再来一次，你会更好的！",
            color: "text-yellow-600",
        },
        Rating::Retry => Feedback {
            emoji: "🔁",
            title: "再试一次",
            message: "让老师再示范一遍吧！",
            color: "text-blue-600",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(target: &str, candidate: &str) -> Rating {
        evaluate_transcript(target, candidate, &PracticeConfig::default())
    }

    #[test]
    fn test_identical_text_is_good() {
        assert_eq!(evaluate("小猫在睡觉", "小猫在睡觉"), Rating::Good);
        assert_eq!(evaluate("The cat sleeps", "The cat sleeps"), Rating::Good);
    }

    #[test]
    fn test_empty_candidate_is_retry() {
        assert_eq!(evaluate("小猫在睡觉", ""), Rating::Retry);
        assert_eq!(evaluate("小猫在睡觉", "   "), Rating::Retry);
        assert_eq!(evaluate("小猫在睡觉", "\t\n"), Rating::Retry);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        assert_eq!(evaluate("Hello, World!", "hello world"), Rating::Good);
        assert_eq!(evaluate("Don't stop!", "dont stop"), Rating::Good);
    }

    #[test]
    fn test_cjk_preserving_normalization() {
        // Пунктуация удаляется, иероглифы сохраняются
        assert_eq!(evaluate("你好，世界！", "你好世界"), Rating::Good);
    }

    #[test]
    fn test_cjk_length_is_logical_characters() {
        // 2 различия из 4 иероглифов: схожесть 50% -> OK.
        // При побайтовой длине результат был бы искажён.
        assert_eq!(evaluate("你好世界", "你好天空"), Rating::Ok);
    }

    #[test]
    fn test_good_threshold_boundary() {
        // Расстояние 3 при длине 10: схожесть ровно 70% -> GOOD
        assert_eq!(evaluate("abcdefghij", "abcdefgxyz"), Rating::Good);
        // Расстояние 4 при длине 10: схожесть 60% -> OK
        assert_eq!(evaluate("abcdefghij", "abcdefwxyz"), Rating::Ok);
    }

    #[test]
    fn test_ok_threshold_boundary() {
        // Расстояние 7 при длине 10: схожесть ровно 30% -> OK
        assert_eq!(evaluate("abcdefghij", "abctuvwxyz"), Rating::Ok);
        // Расстояние 8 при длине 10: схожесть 20% -> RETRY
        assert_eq!(evaluate("abcdefghij", "abstuvwxyz"), Rating::Retry);
    }

    #[test]
    fn test_unrelated_text_is_retry() {
        assert_eq!(evaluate("小猫在睡觉", "qqqqqqqqqq"), Rating::Retry);
    }

    #[test]
    fn test_punctuation_only_target() {
        // Оба текста нормализуются в пустые строки и совпадают
        assert_eq!(evaluate("...", "!!!"), Rating::Good);
    }

    #[test]
    fn test_rating_serialization() {
        assert_eq!(serde_json::to_string(&Rating::Good).unwrap(), "\"GOOD\"");
        assert_eq!(serde_json::to_string(&Rating::Retry).unwrap(), "\"RETRY\"");
    }

    #[test]
    fn test_feedback_messages() {
        assert_eq!(feedback_for(Rating::Good).title, "很棒！");
        assert_eq!(feedback_for(Rating::Ok).emoji, "🙂");
        assert_eq!(feedback_for(Rating::Retry).message, "让老师再示范一遍吧！");
    }
}
