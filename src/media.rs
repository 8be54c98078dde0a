//! Модуль абстракции медиаресурса
//!
//! Библиотека не привязана к конкретной аудиоподсистеме: проигрыватель
//! работает через трейт [`MediaElement`], который внедряется вызывающей
//! стороной один раз при старте. События элемента раздаются через
//! broadcast-канал; отписка — это просто уничтожение приёмника, поэтому
//! снятие наблюдателя сводится к одному детерминированному действию.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use url::Url;

use crate::error::Result;
use crate::playback::PlaybackSession;

/// События медиаэлемента
#[derive(Debug, Clone)]
pub enum MediaEvent {
    /// Метаданные загружены, длительность известна
    LoadedMetadata,
    /// Позиция воспроизведения продвинулась
    TimeUpdate,
    /// Позиционирование завершено
    Seeked,
    /// Дорожка доиграла до конца
    Ended,
    /// Ошибка загрузки или декодирования
    Error(String),
}

/// Трейт воспроизводимого медиаресурса с возможностью позиционирования.
///
/// Реализация предоставляется окружением (нативный плеер, тестовая
/// заглушка). Все методы неблокирующие; о ходе асинхронных операций
/// элемент сообщает событиями [`MediaEvent`].
pub trait MediaElement: Send + Sync {
    /// Текущий загруженный источник
    fn source(&self) -> Option<String>;
    /// Назначить новый источник
    fn set_source(&self, url: &str);
    /// Начать загрузку назначенного источника
    fn load(&self);
    /// Начать воспроизведение
    fn play(&self) -> Result<()>;
    /// Приостановить воспроизведение
    fn pause(&self);
    /// Текущая позиция воспроизведения в секундах
    fn position(&self) -> f64;
    /// Начать позиционирование; о завершении сообщает событие `Seeked`
    fn set_position(&self, position: f64);
    /// Длительность дорожки, если метаданные уже известны
    fn duration(&self) -> Option<f64>;
    /// Известны ли метаданные дорожки
    fn has_metadata(&self) -> bool;
    /// Подписаться на события элемента
    fn subscribe(&self) -> broadcast::Receiver<MediaEvent>;
}

/// Дескриптор общего аудиоресурса урока.
///
/// Владеет медиаэлементом и слотом активной сессии воспроизведения.
/// Инвариант: на один дескриптор — не более одной живой сессии;
/// установка новой сначала отменяет предыдущую.
pub struct AudioHandle {
    element: Arc<dyn MediaElement>,
    session: Mutex<Option<PlaybackSession>>,
}

impl AudioHandle {
    /// Создать дескриптор поверх медиаэлемента
    pub fn new(element: Arc<dyn MediaElement>) -> Self {
        Self {
            element,
            session: Mutex::new(None),
        }
    }

    /// Медиаэлемент дескриптора
    pub fn element(&self) -> &Arc<dyn MediaElement> {
        &self.element
    }

    /// Отменить активную сессию воспроизведения, если она есть.
    ///
    /// Снимает наблюдателя границы синхронно; вызывается и самим
    /// проигрывателем перед новым запуском, и вызывающей стороной
    /// при уходе со страницы или перезапуске записи.
    pub fn cancel(&self) {
        if let Some(session) = self.session.lock().take() {
            session.cancel();
        }
    }

    /// Есть ли на дескрипторе живая сессия воспроизведения
    pub fn has_active_session(&self) -> bool {
        self.session
            .lock()
            .as_ref()
            .map_or(false, |session| session.is_live())
    }

    /// Установить новую сессию, отменив предыдущую
    pub(crate) fn install(&self, session: PlaybackSession) {
        let mut slot = self.session.lock();
        if let Some(previous) = slot.take() {
            previous.cancel();
        }
        *slot = Some(session);
    }
}

/// Привести источник к сопоставимому виду: для абсолютных URL берём
/// путь и строку запроса, относительные оставляем как есть. Источник
/// урока раздаётся через файловый прокси, поэтому хост не значим.
pub(crate) fn normalize_source(source: &str) -> String {
    match Url::parse(source) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        },
        Err(_) => source.to_string(),
    }
}
