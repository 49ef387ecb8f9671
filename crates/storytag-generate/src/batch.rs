use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use storytag_engine::Story;
use tokio::task::JoinSet;

use crate::generator::{GenerationError, TestGenerator};

#[derive(Debug, Clone, Copy)]
pub struct BatchSettings {
    /// Upper bound for a single story's generation
    pub timeout: Duration,
    pub max_concurrent: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_concurrent: 4,
        }
    }
}

/// Generation outcome for one story.
#[derive(Debug)]
pub struct GeneratedStub {
    pub story_id: String,
    pub outcome: Result<String, GenerationError>,
}

impl GeneratedStub {
    pub fn code(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }
}

/// All outcomes of a batch, in the order the stories were given.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub stubs: Vec<GeneratedStub>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.stubs.iter().filter(|stub| stub.outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.stubs.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

type TaskOutput = (usize, Result<String, GenerationError>);

/// Generate a stub for every story.
///
/// Requests run concurrently up to `max_concurrent`, each bounded by
/// `timeout`. A failing story only affects its own entry; the report lists
/// stories in input order regardless of completion order.
pub async fn generate_batch(
    generator: Arc<dyn TestGenerator>,
    stories: &[Story],
    settings: BatchSettings,
) -> BatchReport {
    let mut outcomes: Vec<Option<Result<String, GenerationError>>> =
        stories.iter().map(|_| None).collect();

    let mut join_set: JoinSet<TaskOutput> = JoinSet::new();
    let mut queue: VecDeque<(usize, Story)> = stories.iter().cloned().enumerate().collect();
    let limit = settings.max_concurrent.max(1);

    while let Some((order, story)) = queue.pop_front() {
        spawn_generation(&mut join_set, Arc::clone(&generator), order, story, settings.timeout);

        if join_set.len() >= limit {
            consume_next(&mut join_set, &mut outcomes).await;
        }
    }

    while !join_set.is_empty() {
        consume_next(&mut join_set, &mut outcomes).await;
    }

    let stubs: Vec<GeneratedStub> = stories
        .iter()
        .zip(outcomes)
        .map(|(story, outcome)| GeneratedStub {
            story_id: story.id().to_string(),
            outcome: outcome.unwrap_or(Err(GenerationError::TaskFailed)),
        })
        .collect();

    for stub in &stubs {
        if let Err(error) = &stub.outcome {
            log::warn!("No test generated for user story {}: {error}", stub.story_id);
        }
    }

    let report = BatchReport { stubs };
    log::info!(
        "Generated {} of {} test stubs",
        report.succeeded(),
        report.stubs.len()
    );
    report
}

fn spawn_generation(
    join_set: &mut JoinSet<TaskOutput>,
    generator: Arc<dyn TestGenerator>,
    order: usize,
    story: Story,
    timeout: Duration,
) {
    join_set.spawn(async move {
        let result = match tokio::time::timeout(timeout, generator.generate(&story)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::TimedOut(timeout)),
        };
        (order, result)
    });
}

async fn consume_next(
    join_set: &mut JoinSet<TaskOutput>,
    outcomes: &mut [Option<Result<String, GenerationError>>],
) {
    match join_set.join_next().await {
        Some(Ok((order, result))) => outcomes[order] = Some(result),
        // The slot stays empty and is reported as a task failure
        Some(Err(join_error)) => log::warn!("Generation task failed: {join_error}"),
        None => {}
    }
}
