// src/quiz/host.rs

//! Runs one [`TestRunner`] per session and owns its timers.
//!
//! At most one timer task exists per runner: the loading delay, the quiz
//! countdown, or the redirect countdown. Replacing or dropping a runner's
//! timer aborts the old task.

use std::{collections::HashMap, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{course::derive_key, test_result::TestResult, user::User},
    quiz::runner::{QuizStatus, QuizView, TestRunner, TickOutcome},
    state::AppState,
};

struct HostedRunner {
    runner: TestRunner,
    timer: Option<JoinHandle<()>>,
}

impl HostedRunner {
    fn replace_timer(&mut self, timer: Option<JoinHandle<()>>) {
        if let Some(old) = std::mem::replace(&mut self.timer, timer) {
            old.abort();
        }
    }
}

impl Drop for HostedRunner {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Test runners by session id.
#[derive(Default)]
pub struct QuizHost {
    runners: HashMap<Uuid, HostedRunner>,
}

impl QuizHost {
    fn runner_mut(&mut self, session_id: Uuid, user: &User) -> &mut HostedRunner {
        self.runners.entry(session_id).or_insert_with(|| HostedRunner {
            runner: TestRunner::new(&user.email, &user.course),
            timer: None,
        })
    }

    /// Drops the session's runner and cancels its timer.
    pub fn remove(&mut self, session_id: Uuid) {
        self.runners.remove(&session_id);
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }
}

pub async fn view(state: &AppState, session_id: Uuid, user: &User) -> QuizView {
    let mut host = state.quizzes.lock().await;
    host.runner_mut(session_id, user).runner.view()
}

pub async fn show_instructions(
    state: &AppState,
    session_id: Uuid,
    user: &User,
) -> Result<QuizView, AppError> {
    let mut host = state.quizzes.lock().await;
    let hosted = host.runner_mut(session_id, user);
    hosted.runner.show_instructions()?;
    // Leaving Finished stops the redirect countdown.
    hosted.replace_timer(None);
    Ok(hosted.runner.view())
}

/// Loads the user's course questions and schedules activation.
pub async fn start(state: &AppState, session_id: Uuid, user: &User) -> Result<QuizView, AppError> {
    let snapshot = {
        let bank = state.questions.read().await;
        bank.get(&derive_key(&user.course)).map(<[_]>::to_vec)
    };

    let mut host = state.quizzes.lock().await;
    let hosted = host.runner_mut(session_id, user);
    if let Err(e) = hosted.runner.load(snapshot.as_deref()) {
        tracing::warn!("Quiz start failed for {}: {}", user.email, e);
        return Err(e);
    }
    let attempt = hosted.runner.attempt();
    tracing::info!(
        "Quiz loaded for {} ({}, attempt {})",
        user.email,
        user.course,
        attempt
    );

    let delay = Duration::from_millis(state.config.quiz_loading_delay_ms);
    if delay.is_zero() {
        hosted.runner.activate()?;
        let timer = spawn_countdown(state.clone(), session_id, attempt);
        hosted.replace_timer(Some(timer));
    } else {
        let timer = spawn_activation(state.clone(), session_id, attempt, delay);
        hosted.replace_timer(Some(timer));
    }
    Ok(hosted.runner.view())
}

pub async fn select(
    state: &AppState,
    session_id: Uuid,
    user: &User,
    option: usize,
) -> Result<QuizView, AppError> {
    let mut host = state.quizzes.lock().await;
    let hosted = host.runner_mut(session_id, user);
    hosted.runner.select(option)?;
    Ok(hosted.runner.view())
}

pub async fn next(state: &AppState, session_id: Uuid, user: &User) -> Result<QuizView, AppError> {
    let mut host = state.quizzes.lock().await;
    let hosted = host.runner_mut(session_id, user);
    hosted.runner.next()?;
    Ok(hosted.runner.view())
}

pub async fn previous(
    state: &AppState,
    session_id: Uuid,
    user: &User,
) -> Result<QuizView, AppError> {
    let mut host = state.quizzes.lock().await;
    let hosted = host.runner_mut(session_id, user);
    hosted.runner.previous()?;
    Ok(hosted.runner.view())
}

/// Explicit finish. Persists the result on the first call only.
pub async fn finish(state: &AppState, session_id: Uuid, user: &User) -> Result<QuizView, AppError> {
    let (view, result) = {
        let mut host = state.quizzes.lock().await;
        let hosted = host.runner_mut(session_id, user);
        let result = hosted.runner.finish()?;
        if result.is_some() {
            let timer = spawn_redirect(state.clone(), session_id, hosted.runner.attempt());
            hosted.replace_timer(Some(timer));
        }
        (hosted.runner.view(), result)
    };

    if let Some(result) = result {
        record(state, result).await;
    }
    Ok(view)
}

async fn record(state: &AppState, result: TestResult) {
    tracing::info!(
        "Recording result for {} in {}: {}/{} ({}% discount)",
        result.user_email,
        result.course,
        result.score,
        result.total_questions,
        result.discount
    );
    state.results.write().await.upsert(result);
}

fn spawn_activation(
    state: AppState,
    session_id: Uuid,
    attempt: u64,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let mut host = state.quizzes.lock().await;
        let Some(hosted) = host.runners.get_mut(&session_id) else {
            return;
        };
        if hosted.runner.attempt() != attempt || hosted.runner.activate().is_err() {
            return;
        }
        // This task is ending; detach its own handle instead of aborting it.
        hosted.timer.take();
        hosted.timer = Some(spawn_countdown(state.clone(), session_id, attempt));
    })
}

fn spawn_countdown(state: AppState, session_id: Uuid, attempt: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = every_second();
        loop {
            interval.tick().await;

            let result = {
                let mut host = state.quizzes.lock().await;
                let Some(hosted) = host.runners.get_mut(&session_id) else {
                    return;
                };
                if hosted.runner.attempt() != attempt
                    || hosted.runner.status() != QuizStatus::Active
                {
                    return;
                }
                match hosted.runner.tick() {
                    TickOutcome::Finished(result) => {
                        hosted.timer.take();
                        hosted.timer = Some(spawn_redirect(state.clone(), session_id, attempt));
                        result
                    }
                    _ => continue,
                }
            };

            tracing::info!("Quiz time expired for {}", result.user_email);
            record(&state, result).await;
            return;
        }
    })
}

fn spawn_redirect(state: AppState, session_id: Uuid, attempt: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = every_second();
        loop {
            interval.tick().await;

            let mut host = state.quizzes.lock().await;
            let Some(hosted) = host.runners.get_mut(&session_id) else {
                return;
            };
            if hosted.runner.attempt() != attempt
                || hosted.runner.status() != QuizStatus::Finished
            {
                return;
            }
            if let TickOutcome::Redirect | TickOutcome::Idle = hosted.runner.tick() {
                hosted.timer.take();
                return;
            }
        }
    })
}

/// One-second interval whose first tick is one second from now.
fn every_second() -> tokio::time::Interval {
    let period = Duration::from_secs(1);
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
