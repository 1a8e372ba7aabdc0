// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted synthesis client fake for deterministic testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use redecor_core::{GeneratedImage, RedecorError, SynthesisClient, SynthesisResult};

/// A [`SynthesisClient`] that returns pre-scripted outcomes.
///
/// Outcomes are popped from a FIFO queue; when the queue is empty a default
/// successful image is returned. Received instructions and the total call
/// count are recorded so tests can assert on what (and whether) the handler
/// sent.
#[derive(Default)]
pub struct ScriptedSynthesis {
    outcomes: Mutex<VecDeque<Result<SynthesisResult, RedecorError>>>,
    instructions: Mutex<Vec<String>>,
    calls: AtomicUsize,
    delay: Mutex<Option<Duration>>,
}

/// The image every exhausted queue falls back to.
pub fn sample_image() -> SynthesisResult {
    SynthesisResult::Image(GeneratedImage {
        data: b"redecorated".to_vec(),
        mime_type: "image/png".to_string(),
    })
}

impl ScriptedSynthesis {
    /// Create a fake with an empty queue (every call succeeds).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fake pre-loaded with the given outcomes.
    pub fn with_outcomes(
        outcomes: Vec<Result<SynthesisResult, RedecorError>>,
    ) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::from(outcomes)),
            ..Self::default()
        }
    }

    /// Append an outcome to the queue.
    pub async fn push_outcome(&self, outcome: Result<SynthesisResult, RedecorError>) {
        self.outcomes.lock().await.push_back(outcome);
    }

    /// Delay every call by `delay` before answering (timeout tests).
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.lock().await = Some(delay);
    }

    /// Number of `synthesize` calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Instructions received so far, in call order.
    pub async fn instructions(&self) -> Vec<String> {
        self.instructions.lock().await.clone()
    }
}

#[async_trait]
impl SynthesisClient for ScriptedSynthesis {
    async fn synthesize(
        &self,
        _image: &[u8],
        _mime_type: &str,
        instruction: &str,
    ) -> Result<SynthesisResult, RedecorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.instructions.lock().await.push(instruction.to_string());

        let delay = *self.delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(sample_image()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_outcome_when_queue_empty() {
        let synthesis = ScriptedSynthesis::new();
        let result = synthesis
            .synthesize(b"img", "image/jpeg", "make it nice")
            .await
            .unwrap();
        assert_eq!(result, sample_image());
        assert_eq!(synthesis.call_count(), 1);
        assert_eq!(synthesis.instructions().await, vec!["make it nice"]);
    }

    #[tokio::test]
    async fn scripted_outcomes_returned_in_order() {
        let synthesis = ScriptedSynthesis::with_outcomes(vec![
            Ok(SynthesisResult::NoImage),
            Err(RedecorError::RateLimited),
        ]);

        assert_eq!(
            synthesis.synthesize(b"i", "image/png", "a").await.unwrap(),
            SynthesisResult::NoImage
        );
        assert!(matches!(
            synthesis.synthesize(b"i", "image/png", "b").await,
            Err(RedecorError::RateLimited)
        ));
        // Queue exhausted, falls back to the default image.
        assert_eq!(
            synthesis.synthesize(b"i", "image/png", "c").await.unwrap(),
            sample_image()
        );
    }
}
