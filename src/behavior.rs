//! Human-behavior simulation
//!
//! Capability functions that synthesize human-like timing, pointer paths,
//! scrolling and keystroke pacing, plus the [`Behavior`] module that gates
//! each of them behind a [`BehaviorConfig`] flag.
//!
//! Every operation reads its flag at call time. A disabled operation returns
//! immediately with its inert value: no sleep, no dispatch call, no
//! randomness consumed.

use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;

use rand::Rng;
use smallvec::SmallVec;
use tokio::time::sleep;

use crate::config::{BehaviorConfig, Shared};
use crate::input::{InputEvent, MouseButton};
use crate::status::ModuleStatus;

// Thread-local RNG
thread_local! {
    static RNG: RefCell<rand::rngs::ThreadRng> = RefCell::new(rand::thread_rng());
}

fn random_range(min: u64, max: u64) -> u64 {
    if max <= min {
        return min;
    }
    RNG.with(|rng| rng.borrow_mut().gen_range(min..max))
}

fn random_f64_range(min: f64, max: f64) -> f64 {
    RNG.with(|rng| rng.borrow_mut().gen_range(min..max))
}

fn random_bool(probability: f64) -> bool {
    RNG.with(|rng| rng.borrow_mut().gen_bool(probability))
}

/// Point in viewport coordinates
pub type Point = (f64, f64);

/// Stack-allocated storage for typical pointer paths
pub type PointVec = SmallVec<[Point; 64]>;

/// One synthesized scroll segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollStep {
    /// Wheel delta for this segment.
    pub delta_y: f64,
    /// Pause after the segment lands.
    pub pause: Duration,
}

/// Uniformly jittered delay in `[min_ms, max_ms)`.
pub fn jittered_delay(min_ms: u64, max_ms: u64) -> Duration {
    Duration::from_millis(random_range(min_ms, max_ms))
}

/// Synthesize a pointer path from `from` to `to`.
///
/// Cubic bezier with randomized control points; point density scales with
/// travel distance so short hops stay cheap and long travels stay smooth.
/// First and last points land exactly on `from` and `to`.
pub fn human_path(from: Point, to: Point) -> PointVec {
    let distance = ((to.0 - from.0).powi(2) + (to.1 - from.1).powi(2)).sqrt();
    let steps = ((distance / 10.0) as usize).clamp(12, 48);

    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let cp1 = (
        from.0 + dx * random_f64_range(0.2, 0.4) + random_f64_range(-40.0, 40.0),
        from.1 + dy * random_f64_range(0.1, 0.3) + random_f64_range(-40.0, 40.0),
    );
    let cp2 = (
        from.0 + dx * random_f64_range(0.6, 0.8) + random_f64_range(-40.0, 40.0),
        from.1 + dy * random_f64_range(0.7, 0.9) + random_f64_range(-40.0, 40.0),
    );

    let mut path = PointVec::new();
    for i in 0..steps {
        let t = i as f64 / (steps - 1) as f64;
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        path.push((
            mt3 * from.0 + 3.0 * mt2 * t * cp1.0 + 3.0 * mt * t2 * cp2.0 + t3 * to.0,
            mt3 * from.1 + 3.0 * mt2 * t * cp1.1 + 3.0 * mt * t2 * cp2.1 + t3 * to.1,
        ));
    }
    path
}

/// Break a total wheel delta into jittered segments with pauses.
pub fn scroll_steps(total_delta_y: f64) -> Vec<ScrollStep> {
    let segments = random_range(3, 8);
    let per_segment = total_delta_y / segments as f64;

    (0..segments)
        .map(|_| ScrollStep {
            delta_y: per_segment + random_f64_range(-12.0, 12.0),
            pause: jittered_delay(30, 100),
        })
        .collect()
}

/// Pacing for one typed character.
///
/// Whitespace and punctuation land slower than letters; a small fraction of
/// keystrokes carries a longer thinking pause.
fn keystroke_delay(ch: char) -> Duration {
    let base = if ch == ' ' {
        random_range(80, 180)
    } else if ch.is_ascii_punctuation() {
        random_range(100, 200)
    } else {
        random_range(50, 150)
    };

    let ms = if random_bool(0.05) {
        base + random_range(200, 500)
    } else {
        base
    };
    Duration::from_millis(ms)
}

/// Human-behavior capability module.
///
/// Binds a shared [`BehaviorConfig`] to the behavior capability functions.
/// Safe to call unconditionally: operations whose group is disabled are
/// no-ops, and no operation fails because of configuration state.
#[derive(Debug, Clone)]
pub struct Behavior {
    config: Shared<BehaviorConfig>,
}

impl Behavior {
    /// Module with a fresh all-disabled record.
    pub fn new() -> Self {
        Self::with_config(Shared::default())
    }

    /// Module bound to an existing shared record.
    ///
    /// Modules built from clones of one handle share the record: a flag
    /// flipped through any of them is visible to all on the next call.
    pub fn with_config(config: Shared<BehaviorConfig>) -> Self {
        Self { config }
    }

    /// Handle to the bound record, for runtime mutation.
    pub fn config(&self) -> Shared<BehaviorConfig> {
        self.config.clone()
    }

    /// Brief pause between fine-grained actions (40-120ms).
    pub async fn micro_wait(&self) {
        self.wait_between(40, 120).await;
    }

    /// Pause between related actions (150-400ms).
    pub async fn short_wait(&self) {
        self.wait_between(150, 400).await;
    }

    /// Pause between page-level actions (400-1200ms).
    pub async fn medium_wait(&self) {
        self.wait_between(400, 1200).await;
    }

    /// Pause for a caller-chosen jitter range.
    pub async fn random_human_wait(&self, min_ms: u64, max_ms: u64) {
        self.wait_between(min_ms, max_ms).await;
    }

    async fn wait_between(&self, min_ms: u64, max_ms: u64) {
        if !self.config.read(|c| c.wait) {
            tracing::trace!("wait disabled, skipping pause");
            return;
        }
        sleep(jittered_delay(min_ms, max_ms)).await;
    }

    /// Synthesized pointer path from `from` to `to`.
    ///
    /// Empty when `mouse` is disabled.
    pub fn generate_human_path(&self, from: Point, to: Point) -> PointVec {
        if !self.config.read(|c| c.mouse) {
            return PointVec::new();
        }
        human_path(from, to)
    }

    /// Move the pointer along a synthesized path, one `MouseMove` per point.
    ///
    /// The dispatch function is never invoked when `mouse` is disabled.
    pub async fn move_mouse<D, F, E>(
        &self,
        from: Point,
        to: Point,
        mut dispatch: D,
    ) -> Result<(), E>
    where
        D: FnMut(InputEvent) -> F,
        F: Future<Output = Result<(), E>>,
    {
        if !self.config.read(|c| c.mouse) {
            tracing::trace!("mouse disabled, skipping move");
            return Ok(());
        }

        for (x, y) in human_path(from, to) {
            dispatch(InputEvent::MouseMove { x, y }).await?;
            sleep(jittered_delay(4, 24)).await;
        }
        Ok(())
    }

    /// Move the pointer to `target` and click it.
    ///
    /// Emits the move path, then press and release with slight positional
    /// jitter. No events when `mouse` is disabled.
    pub async fn click<D, F, E>(
        &self,
        from: Point,
        target: Point,
        mut dispatch: D,
    ) -> Result<(), E>
    where
        D: FnMut(InputEvent) -> F,
        F: Future<Output = Result<(), E>>,
    {
        if !self.config.read(|c| c.mouse) {
            tracing::trace!("mouse disabled, skipping click");
            return Ok(());
        }

        for (x, y) in human_path(from, target) {
            dispatch(InputEvent::MouseMove { x, y }).await?;
            sleep(jittered_delay(4, 24)).await;
        }
        sleep(jittered_delay(50, 150)).await;

        let x = target.0 + random_f64_range(-2.0, 2.0);
        let y = target.1 + random_f64_range(-2.0, 2.0);
        dispatch(InputEvent::MouseDown {
            x,
            y,
            button: MouseButton::Left,
        })
        .await?;
        sleep(jittered_delay(50, 120)).await;
        dispatch(InputEvent::MouseUp {
            x,
            y,
            button: MouseButton::Left,
        })
        .await?;
        Ok(())
    }

    /// Synthesized scroll segments totalling roughly `delta_y`.
    ///
    /// Empty when `scroll` is disabled.
    pub fn generate_human_scroll(&self, delta_y: f64) -> Vec<ScrollStep> {
        if !self.config.read(|c| c.scroll) {
            return Vec::new();
        }
        scroll_steps(delta_y)
    }

    /// Emit wheel events for a synthesized scroll.
    ///
    /// No events when `scroll` is disabled.
    pub async fn scroll<D, F, E>(&self, delta_y: f64, mut dispatch: D) -> Result<(), E>
    where
        D: FnMut(InputEvent) -> F,
        F: Future<Output = Result<(), E>>,
    {
        if !self.config.read(|c| c.scroll) {
            tracing::trace!("scroll disabled, skipping");
            return Ok(());
        }

        let x = random_f64_range(400.0, 800.0);
        let y = random_f64_range(300.0, 600.0);
        for step in scroll_steps(delta_y) {
            dispatch(InputEvent::Wheel {
                x,
                y,
                delta_y: step.delta_y,
            })
            .await?;
            sleep(step.pause).await;
        }
        Ok(())
    }

    /// Type text one character at a time with human pacing.
    ///
    /// The dispatch function receives one `Char` event per character; it is
    /// never invoked when `typing` is disabled.
    pub async fn type_like_human<D, F, E>(
        &self,
        text: &str,
        mut dispatch: D,
    ) -> Result<(), E>
    where
        D: FnMut(InputEvent) -> F,
        F: Future<Output = Result<(), E>>,
    {
        if !self.config.read(|c| c.typing) {
            tracing::trace!("typing disabled, skipping {} chars", text.chars().count());
            return Ok(());
        }

        for ch in text.chars() {
            dispatch(InputEvent::Char { ch }).await?;
            sleep(keystroke_delay(ch)).await;
        }
        Ok(())
    }

    /// Press and release a named key (e.g. "Enter").
    ///
    /// No events when `typing` is disabled.
    pub async fn press_key<D, F, E>(&self, key: &str, mut dispatch: D) -> Result<(), E>
    where
        D: FnMut(InputEvent) -> F,
        F: Future<Output = Result<(), E>>,
    {
        if !self.config.read(|c| c.typing) {
            tracing::trace!("typing disabled, skipping key press");
            return Ok(());
        }

        dispatch(InputEvent::KeyDown {
            key: key.to_string(),
        })
        .await?;
        sleep(jittered_delay(40, 110)).await;
        dispatch(InputEvent::KeyUp {
            key: key.to_string(),
        })
        .await?;
        Ok(())
    }

    /// Focus the element matching `selector`, then settle briefly.
    ///
    /// No events when `focus` is disabled.
    pub async fn focus_element<D, F, E>(
        &self,
        selector: &str,
        mut dispatch: D,
    ) -> Result<(), E>
    where
        D: FnMut(InputEvent) -> F,
        F: Future<Output = Result<(), E>>,
    {
        if !self.config.read(|c| c.focus) {
            tracing::trace!("focus disabled, skipping {}", selector);
            return Ok(());
        }

        dispatch(InputEvent::Focus {
            selector: selector.to_string(),
        })
        .await?;
        sleep(jittered_delay(60, 180)).await;
        Ok(())
    }

    /// Registry listing plus a copy of the current flags.
    pub fn get_status(&self) -> ModuleStatus {
        ModuleStatus::new(BehaviorConfig::GROUPS, self.config.read(|c| c.flags()))
    }
}

impl Default for Behavior {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_path_endpoints() {
        let from = (50.0, 75.0);
        let to = (620.0, 340.0);

        let path = human_path(from, to);

        let first = path.first().unwrap();
        assert!((first.0 - from.0).abs() < 0.001);
        assert!((first.1 - from.1).abs() < 0.001);

        let last = path.last().unwrap();
        assert!((last.0 - to.0).abs() < 0.001);
        assert!((last.1 - to.1).abs() < 0.001);
    }

    #[test]
    fn test_human_path_density_scales_with_distance() {
        let short = human_path((0.0, 0.0), (30.0, 0.0));
        let long = human_path((0.0, 0.0), (900.0, 0.0));
        assert!(short.len() < long.len());
        assert_eq!(short.len(), 12);
        assert_eq!(long.len(), 48);
    }

    #[test]
    fn test_scroll_steps_sum_near_total() {
        let steps = scroll_steps(600.0);
        assert!((3..8).contains(&steps.len()));
        let total: f64 = steps.iter().map(|s| s.delta_y).sum();
        // Each segment carries at most ±12 jitter.
        assert!((total - 600.0).abs() <= 12.0 * steps.len() as f64);
    }

    #[test]
    fn test_jittered_delay_within_range() {
        for _ in 0..50 {
            let delay = jittered_delay(50, 200);
            assert!(delay >= Duration::from_millis(50));
            assert!(delay < Duration::from_millis(200));
        }
    }

    #[test]
    fn test_jittered_delay_degenerate_range() {
        assert_eq!(jittered_delay(100, 100), Duration::from_millis(100));
    }

    #[test]
    fn test_disabled_path_is_empty_and_idempotent() {
        let behavior = Behavior::new();
        assert!(behavior.generate_human_path((0.0, 0.0), (100.0, 100.0)).is_empty());
        assert!(behavior.generate_human_path((0.0, 0.0), (100.0, 100.0)).is_empty());
        assert!(behavior.generate_human_scroll(500.0).is_empty());
    }

    #[tokio::test]
    async fn test_disabled_typing_never_dispatches() {
        let behavior = Behavior::new();
        let mut calls = 0u32;
        behavior
            .type_like_human("hello world", |_| {
                calls += 1;
                std::future::ready(Ok::<(), std::convert::Infallible>(()))
            })
            .await
            .unwrap();
        assert_eq!(calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enabled_typing_dispatches_once_per_char() {
        let behavior = Behavior::with_config(Shared::new(BehaviorConfig::basic()));
        let mut typed = String::new();
        behavior
            .type_like_human("abc def.", |event| {
                if let InputEvent::Char { ch } = event {
                    typed.push(ch);
                }
                std::future::ready(Ok::<(), std::convert::Infallible>(()))
            })
            .await
            .unwrap();
        assert_eq!(typed, "abc def.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_key_emits_down_then_up() {
        let behavior = Behavior::with_config(Shared::new(BehaviorConfig::basic()));
        let mut events = Vec::new();
        behavior
            .press_key("Enter", |event| {
                events.push(event);
                std::future::ready(Ok::<(), std::convert::Infallible>(()))
            })
            .await
            .unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyDown {
                    key: "Enter".to_string()
                },
                InputEvent::KeyUp {
                    key: "Enter".to_string()
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_ends_with_press_release() {
        let behavior = Behavior::with_config(Shared::new(BehaviorConfig::full()));
        let mut events = Vec::new();
        behavior
            .click((0.0, 0.0), (300.0, 200.0), |event| {
                events.push(event);
                std::future::ready(Ok::<(), std::convert::Infallible>(()))
            })
            .await
            .unwrap();

        assert!(matches!(events.first(), Some(InputEvent::MouseMove { .. })));
        let n = events.len();
        assert!(matches!(events[n - 2], InputEvent::MouseDown { .. }));
        assert!(matches!(events[n - 1], InputEvent::MouseUp { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_callback_error_passes_through() {
        #[derive(Debug, PartialEq)]
        struct Boom(&'static str);

        let behavior = Behavior::with_config(Shared::new(BehaviorConfig::full()));
        let err = behavior
            .focus_element("#q", |_| std::future::ready(Err(Boom("backend gone"))))
            .await
            .unwrap_err();
        assert_eq!(err, Boom("backend gone"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_waits_return_immediately() {
        let behavior = Behavior::new();
        let before = tokio::time::Instant::now();
        behavior.micro_wait().await;
        behavior.short_wait().await;
        behavior.medium_wait().await;
        behavior.random_human_wait(10_000, 20_000).await;
        assert_eq!(tokio::time::Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enabled_wait_sleeps_within_range() {
        let behavior = Behavior::with_config(Shared::new(BehaviorConfig::minimal()));
        let before = tokio::time::Instant::now();
        behavior.random_human_wait(100, 200).await;
        let elapsed = tokio::time::Instant::now() - before;
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(200));
    }

    #[test]
    fn test_status_reflects_config() {
        let behavior = Behavior::with_config(Shared::new(BehaviorConfig::basic()));
        let status = behavior.get_status();
        assert_eq!(status.available, BehaviorConfig::GROUPS);
        assert!(status.enabled("wait"));
        assert!(status.enabled("typing"));
        assert!(!status.enabled("mouse"));
    }
}
