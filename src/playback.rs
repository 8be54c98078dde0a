//! Модуль точного воспроизведения сегмента
//!
//! Проигрыватель воспроизводит ограниченный диапазон общей аудиодорожки:
//! позиционируется на начало сегмента и останавливается точно на его
//! границе. Стратегия наблюдения за границей зависит от длины сегмента:
//! для коротких реплик событий самого элемента недостаточно, поэтому
//! добавляется покадровый опрос; для длинных достаточно грубого
//! интервального, ошибка в десятки миллисекунд там не ощущается.

use std::sync::Arc;

use log::{debug, error};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::config::PracticeConfig;
use crate::error::{PracticeError, Result};
use crate::media::{normalize_source, AudioHandle, MediaElement, MediaEvent};

/// Эфемерная сессия ограниченного воспроизведения.
///
/// Живёт от запуска воспроизведения до остановки: естественной на
/// границе, из-за окончания дорожки или по явной отмене. Владеет
/// задачей-наблюдателем; отмена сессии синхронно снимает наблюдателя
/// вместе с его подпиской на события и таймером.
pub struct PlaybackSession {
    watcher: JoinHandle<()>,
}

impl PlaybackSession {
    fn new(watcher: JoinHandle<()>) -> Self {
        Self { watcher }
    }

    /// Отменить сессию и снять наблюдателя границы
    pub(crate) fn cancel(&self) {
        self.watcher.abort();
    }

    /// Жив ли ещё наблюдатель сессии
    pub(crate) fn is_live(&self) -> bool {
        !self.watcher.is_finished()
    }
}

/// Проигрыватель ограниченного диапазона общей аудиодорожки
pub struct BoundedSegmentPlayer {
    config: PracticeConfig,
}

impl BoundedSegmentPlayer {
    /// Создать проигрыватель с указанной конфигурацией
    pub fn new(config: PracticeConfig) -> Self {
        Self { config }
    }

    /// Воспроизвести диапазон `[start, end)` дорожки `source_url`.
    ///
    /// Возвращает `true`, если воспроизведение запущено; `false` — если
    /// границы непригодны или любой шаг подготовки не удался. Ошибки
    /// наружу не выбрасываются: вызывающая сторона по `false` уходит
    /// на резервный путь озвучивания.
    pub async fn play(&self, handle: &AudioHandle, source_url: &str, start: f64, end: f64) -> bool {
        if end <= start {
            debug!("Segment [{:.3}; {:.3}] has no usable bounds, skipping", start, end);
            return false;
        }

        // Предыдущий наблюдатель снимается до любых действий с ресурсом,
        // иначе два наблюдателя могли бы гоняться за остановкой
        handle.cancel();

        match self.try_play(handle, source_url, start, end).await {
            Ok(()) => true,
            Err(e) => {
                error!("Bounded playback of [{:.3}; {:.3}] failed: {}", start, end, e);
                handle.cancel();
                false
            }
        }
    }

    async fn try_play(
        &self,
        handle: &AudioHandle,
        source_url: &str,
        start: f64,
        end: f64,
    ) -> Result<()> {
        let element = Arc::clone(handle.element());

        sync_source(element.as_ref(), source_url);
        self.wait_for_metadata(element.as_ref()).await?;
        self.seek_to(element.as_ref(), start.max(0.0)).await?;

        let session = self.spawn_watcher(Arc::clone(&element), start, end);

        if let Err(e) = element.play() {
            session.cancel();
            return Err(e);
        }

        handle.install(session);
        Ok(())
    }

    /// Дождаться метаданных дорожки.
    ///
    /// Подписка оформляется до повторной проверки готовности, чтобы не
    /// пропустить событие между проверкой и подпиской. Истечение таймаута
    /// считается ошибкой загрузки, а не зависанием.
    async fn wait_for_metadata(&self, element: &dyn MediaElement) -> Result<()> {
        if element.has_metadata() && element.duration().is_some() {
            return Ok(());
        }

        let mut events = element.subscribe();
        if element.has_metadata() && element.duration().is_some() {
            return Ok(());
        }

        let wait = async {
            loop {
                match events.recv().await {
                    Ok(MediaEvent::LoadedMetadata) => return Ok(()),
                    Ok(MediaEvent::Error(e)) => return Err(PracticeError::MediaLoad(e)),
                    Ok(_) => {}
                    Err(RecvError::Lagged(_)) => {
                        if element.has_metadata() {
                            return Ok(());
                        }
                    }
                    Err(RecvError::Closed) => {
                        return Err(PracticeError::MediaLoad("media element is gone".to_string()))
                    }
                }
            }
        };

        timeout(self.config.metadata_timeout, wait)
            .await
            .map_err(|_| PracticeError::MediaLoadTimeout)?
    }

    /// Позиционироваться на начало сегмента.
    ///
    /// Ожидание подтверждения ограничено коротким таймаутом: не все
    /// платформы надёжно сообщают о завершении seek, поэтому по
    /// истечении продолжаем оптимистично.
    async fn seek_to(&self, element: &dyn MediaElement, position: f64) -> Result<()> {
        let mut events = element.subscribe();
        element.set_position(position);

        let wait = async {
            loop {
                match events.recv().await {
                    Ok(MediaEvent::Seeked) => return Ok(()),
                    Ok(MediaEvent::Error(e)) => return Err(PracticeError::Seek(e)),
                    Ok(_) => {}
                    Err(_) => return Ok(()),
                }
            }
        };

        match timeout(self.config.seek_timeout, wait).await {
            Ok(result) => result,
            Err(_) => {
                debug!("Seek to {:.3} was not confirmed in time, continuing", position);
                Ok(())
            }
        }
    }

    /// Запустить наблюдателя границы сегмента.
    ///
    /// Наблюдатель реагирует на события элемента и дополнительно
    /// опрашивает позицию сам; какой путь остановки сработает первым,
    /// тот и побеждает, остальные умирают вместе с задачей.
    fn spawn_watcher(
        &self,
        element: Arc<dyn MediaElement>,
        start: f64,
        end: f64,
    ) -> PlaybackSession {
        let epsilon = self.config.boundary_epsilon;
        let tick = if end - start <= self.config.short_segment_cutoff {
            self.config.frame_poll_interval
        } else {
            self.config.coarse_poll_interval
        };

        let watcher = tokio::spawn(async move {
            let mut events = element.subscribe();
            let mut ticker = interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                let should_stop = tokio::select! {
                    event = events.recv() => match event {
                        Ok(MediaEvent::Ended) => true,
                        Ok(MediaEvent::TimeUpdate) => reached_boundary(element.as_ref(), end, epsilon),
                        Ok(_) => false,
                        Err(RecvError::Lagged(_)) => reached_boundary(element.as_ref(), end, epsilon),
                        Err(RecvError::Closed) => return,
                    },
                    _ = ticker.tick() => reached_boundary(element.as_ref(), end, epsilon),
                };

                if should_stop {
                    stop_at_boundary(element.as_ref(), end);
                    return;
                }
            }
        });

        PlaybackSession::new(watcher)
    }
}

/// Сопоставить загруженный источник с целевым и перезагрузить при
/// несовпадении. Совпадающий источник переиспользуется, чтобы не
/// загружать и не декодировать дорожку заново.
fn sync_source(element: &dyn MediaElement, source_url: &str) {
    let target = normalize_source(source_url);
    let current = element.source().map(|s| normalize_source(&s));

    if current.as_deref() != Some(target.as_str()) {
        element.pause();
        element.set_source(source_url);
        element.load();
    }
}

fn reached_boundary(element: &dyn MediaElement, end: f64, epsilon: f64) -> bool {
    element.position() + epsilon >= end
}

/// Остановиться на границе: пауза и прижатие позиции к границе,
/// но не дальше конца дорожки
fn stop_at_boundary(element: &dyn MediaElement, end: f64) {
    element.pause();
    let clamped = match element.duration() {
        Some(duration) => end.min(duration),
        None => end,
    };
    element.set_position(clamped);
    debug!("Stopped segment playback at {:.3}", clamped);
}
